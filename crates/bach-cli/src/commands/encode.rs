//! Selector and call data encoding commands

use std::path::PathBuf;

use bach_abi::MemberKind;
use bach_crypto::{event_topic, function_selector};
use clap::{Args, ValueEnum};

use super::{load_table, parse_args};
use crate::{output::Output, CliError};

/// Print the selector of a canonical signature
#[derive(Debug, Args)]
pub struct SelectorArgs {
    /// Canonical signature, e.g. `transfer(address,uint256)`
    signature: String,

    /// Also print the full 32-byte event topic
    #[arg(long)]
    topic: bool,
}

impl SelectorArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let selector = format!("0x{}", hex::encode(function_selector(&self.signature)));
        let mut output = Output::new(json)
            .field("signature", &self.signature)
            .field("selector", &selector);

        if self.topic {
            let topic = event_topic(&self.signature).to_hex();
            output = output
                .field("topic", &topic)
                .line(&format!("{}\n{}", selector, topic));
        } else {
            output = output.line(&selector);
        }

        output.print();
        Ok(())
    }
}

/// Member kind accepted by `encode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodeKind {
    /// Function call with selector
    Function,
    /// Constructor arguments after the bytecode
    Constructor,
}

/// Encode call data for a member of an interface document
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Interface document (JSON)
    #[arg(long)]
    abi: PathBuf,

    /// Member name (required for functions)
    #[arg(long)]
    member: Option<String>,

    /// Overload index among members with the same name
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Member kind
    #[arg(long, value_enum, default_value_t = EncodeKind::Function)]
    kind: EncodeKind,

    /// Creation bytecode (constructor only)
    #[arg(long)]
    bytecode: Option<String>,

    /// Arguments as a JSON array
    #[arg(default_value = "[]")]
    args: String,
}

impl EncodeArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let table = load_table(&self.abi)?;
        let args = parse_args(&self.args)?;

        match self.kind {
            EncodeKind::Function => {
                let name = self.member.ok_or_else(|| {
                    CliError::InvalidInput("--member is required for functions".to_string())
                })?;
                let member = table.function(&name, self.index)?;
                let values = table.values_from_json(member, &args)?;
                let data = table.encode_function(&name, self.index, &values)?;
                let hex = data.to_hex();

                Output::new(json)
                    .field("signature", &member.signature())
                    .field("selector", &format!("0x{}", hex::encode(member.selector())))
                    .field("data", &hex)
                    .line(&hex)
                    .print();
            }
            EncodeKind::Constructor => {
                let values = match table.member(MemberKind::Constructor, "constructor", 0) {
                    Ok(member) => table.values_from_json(member, &args)?,
                    Err(_) if args.is_empty() => Vec::new(),
                    Err(e) => return Err(e.into()),
                };
                let bytecode = self.bytecode.unwrap_or_default();
                let data = table.encode_constructor(&bytecode, &values)?;

                Output::new(json).field("data", &data).line(&data).print();
            }
        }

        Ok(())
    }
}
