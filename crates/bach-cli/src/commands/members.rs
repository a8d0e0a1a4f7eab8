//! Interface inspection command

use std::path::PathBuf;

use bach_abi::MemberKind;
use clap::Args;
use serde_json::json;

use super::load_table;
use crate::{output::Output, CliError};

/// List the members of an interface document
#[derive(Debug, Args)]
pub struct MembersArgs {
    /// Interface document (JSON)
    #[arg(long)]
    abi: PathBuf,
}

impl MembersArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let table = load_table(&self.abi)?;

        let mut lines = Vec::new();
        let mut entries = Vec::new();
        for member in table.members() {
            let signature = member.signature();
            let id = match member.kind() {
                MemberKind::Function | MemberKind::Error => {
                    Some(format!("0x{}", hex::encode(member.selector())))
                }
                MemberKind::Event => Some(member.topic().to_hex()),
                _ => None,
            };

            let mut line = match &id {
                Some(id) => format!("{:<12}{}  {}", member.kind(), signature, id),
                None => format!("{:<12}{}", member.kind(), signature),
            };
            if member.is_read_only() {
                line.push_str("  (read-only)");
            }
            if member.is_anonymous() {
                line.push_str("  (anonymous)");
            }
            lines.push(line);
            entries.push(json!({
                "kind": member.kind().keyword(),
                "name": member.name(),
                "signature": signature,
                "id": id,
                "read_only": member.is_read_only(),
                "anonymous": member.is_anonymous(),
            }));
        }

        Output::new(json)
            .field("count", &entries.len())
            .field("members", &entries)
            .line(lines.join("\n"))
            .print();
        Ok(())
    }
}
