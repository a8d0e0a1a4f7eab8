//! Read-only contract call over RPC

use std::path::PathBuf;
use std::sync::Arc;

use bach_primitives::Address;
use bach_sdk::types::{BlockId, TransactionParams};
use bach_sdk::{ContractClient, HttpTransport};
use clap::Args;

use super::{load_table, parse_args};
use crate::{config::Config, output::Output, CliError};

/// Call a view function and decode its outputs
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Interface document (JSON)
    #[arg(long)]
    abi: PathBuf,

    /// Function name
    #[arg(long)]
    member: String,

    /// Overload index among functions with the same name
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Contract address
    #[arg(long)]
    to: String,

    /// Sender address
    #[arg(long)]
    from: Option<String>,

    /// Arguments as a JSON array
    #[arg(default_value = "[]")]
    args: String,
}

impl CallArgs {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let table = Arc::new(load_table(&self.abi)?);
        let to = parse_address(&self.to)?;
        let from = self.from.as_deref().map(parse_address).transpose()?;
        let block: BlockId = config
            .default_block
            .parse()
            .map_err(CliError::Config)?;

        let args = parse_args(&self.args)?;
        let member = table.function(&self.member, self.index)?;
        let values = table.values_from_json(member, &args)?;

        tracing::debug!(rpc = %config.rpc_url, member = %self.member, "calling contract");
        let client = ContractClient::new(table.clone(), HttpTransport::new(&config.rpc_url))
            .at(to)
            .with_block(block);
        let params = TransactionParams {
            from,
            ..Default::default()
        };
        let decoded = client
            .call_decoded(params, &self.member, self.index, &values)
            .await?;

        Output::new(json)
            .field("member", &self.member)
            .values(&decoded)
            .print();
        Ok(())
    }
}

fn parse_address(s: &str) -> Result<Address, CliError> {
    Address::from_hex(s).map_err(|e| CliError::InvalidAddress(e.to_string()))
}
