//! Return data decoding commands

use std::path::PathBuf;

use bach_abi::DataChunks;
use clap::Args;

use super::load_table;
use crate::{output::Output, CliError};

/// Decode a return payload using a member's declared outputs
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Interface document (JSON)
    #[arg(long)]
    abi: PathBuf,

    /// Function (or event with --event) name
    #[arg(long)]
    member: String,

    /// Overload index among members with the same name
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Decode the non-indexed inputs of an event instead
    #[arg(long)]
    event: bool,

    /// Hex payload
    hex: String,
}

impl DecodeArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let table = load_table(&self.abi)?;
        let values = if self.event {
            table.decode_event(&self.member, self.index, &self.hex)?
        } else {
            table.decode_output(&self.member, self.index, &self.hex)?
        };

        Output::new(json)
            .field("member", &self.member)
            .values(&values)
            .print();
        Ok(())
    }
}

/// Split a payload into 32-byte chunks
#[derive(Debug, Args)]
pub struct ChunksArgs {
    /// Hex payload
    hex: String,
}

impl ChunksArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let chunks = DataChunks::from_hex(&self.hex)?;
        let digits: Vec<String> = chunks.iter().map(|w| w.to_hex_digits()).collect();
        let lines: Vec<String> = digits
            .iter()
            .enumerate()
            .map(|(i, d)| format!("[{}] {}", i, d))
            .collect();

        Output::new(json)
            .field("count", &chunks.len())
            .field("chunks", &digits)
            .line(&lines.join("\n"))
            .print();
        Ok(())
    }
}
