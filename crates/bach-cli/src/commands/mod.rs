//! Subcommand implementations

pub mod call;
pub mod decode;
pub mod encode;
pub mod members;

use std::path::Path;

use bach_abi::DescriptorTable;
use serde_json::Value as Json;

use crate::CliError;

/// Read and index an interface document
pub(crate) fn load_table(path: &Path) -> Result<DescriptorTable, CliError> {
    let content = std::fs::read_to_string(path)?;
    let table = DescriptorTable::from_json(&content)?;
    tracing::debug!(path = %path.display(), members = table.members().len(), "interface loaded");
    Ok(table)
}

/// Parse a JSON array of arguments
pub(crate) fn parse_args(args: &str) -> Result<Vec<Json>, CliError> {
    match serde_json::from_str(args)? {
        Json::Array(items) => Ok(items),
        other => Err(CliError::InvalidInput(format!(
            "arguments must be a JSON array, got {}",
            other
        ))),
    }
}

