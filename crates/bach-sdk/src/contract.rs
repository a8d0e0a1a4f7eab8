//! Contract interaction over a transport

use std::sync::Arc;

use bach_abi::{DataChunks, DescriptorTable, Value};
use bach_primitives::Address;

use crate::transport::Transport;
use crate::types::{BlockId, TransactionParams};
use crate::SdkError;

/// Interface document of a standard ERC20 token
pub const ERC20_INTERFACE: &str = r#"[
    {"type":"function","name":"name","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"symbol","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"decimals","inputs":[],"outputs":[{"name":"","type":"uint8"}],"stateMutability":"view"},
    {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"balanceOf","inputs":[{"name":"owner","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"approve","inputs":[{"name":"spender","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"allowance","inputs":[{"name":"owner","type":"address"},{"name":"spender","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"transferFrom","inputs":[{"name":"from","type":"address"},{"name":"to","type":"address"},{"name":"value","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
    {"type":"event","name":"Approval","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"spender","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
]"#;

/// Contract bound to a descriptor table and a transport
pub struct ContractClient {
    table: Arc<DescriptorTable>,
    transport: Box<dyn Transport>,
    address: Option<Address>,
    block: BlockId,
}

impl ContractClient {
    /// Create a client for a not yet deployed contract
    pub fn new(table: Arc<DescriptorTable>, transport: impl Transport + 'static) -> Self {
        Self {
            table,
            transport: Box::new(transport),
            address: None,
            block: BlockId::Latest,
        }
    }

    /// Bind to a deployed contract address
    pub fn at(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Block used for `eth_call`
    pub fn with_block(mut self, block: BlockId) -> Self {
        self.block = block;
        self
    }

    /// Contract address, if bound
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Descriptor table
    pub fn table(&self) -> &DescriptorTable {
        &self.table
    }

    /// Transport
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Execute a read-only call and return the raw result chunks
    pub async fn call(
        &self,
        params: TransactionParams,
        name: &str,
        index: usize,
        args: &[Value],
    ) -> Result<DataChunks, SdkError> {
        let params = self.prepare(params, name, index, args)?;
        let result = self
            .transport
            .invoke(
                "eth_call",
                vec![serde_json::to_value(&params)?, serde_json::to_value(self.block)?],
            )
            .await?;
        Ok(DataChunks::from_hex(&result)?)
    }

    /// Execute a read-only call and decode the result with the declared outputs
    pub async fn call_decoded(
        &self,
        params: TransactionParams,
        name: &str,
        index: usize,
        args: &[Value],
    ) -> Result<Vec<Value>, SdkError> {
        let params = self.prepare(params, name, index, args)?;
        let result = self
            .transport
            .invoke(
                "eth_call",
                vec![serde_json::to_value(&params)?, serde_json::to_value(self.block)?],
            )
            .await?;
        Ok(self.table.decode_output(name, index, &result)?)
    }

    /// Send a state-changing transaction, returning its hash
    pub async fn send(
        &self,
        params: TransactionParams,
        name: &str,
        index: usize,
        args: &[Value],
    ) -> Result<String, SdkError> {
        let params = self.prepare(params, name, index, args)?;
        self.transport
            .invoke("eth_sendTransaction", vec![serde_json::to_value(&params)?])
            .await
    }

    /// Deploy the contract: bytecode followed by encoded constructor arguments
    pub async fn deploy(
        &self,
        mut params: TransactionParams,
        bytecode: &str,
        args: &[Value],
    ) -> Result<String, SdkError> {
        params.clear_data();
        params.to = None;
        params.data = Some(self.table.encode_constructor(bytecode, args)?);
        tracing::debug!(args = args.len(), "deploying contract");
        self.transport
            .invoke("eth_sendTransaction", vec![serde_json::to_value(&params)?])
            .await
    }

    fn prepare(
        &self,
        mut params: TransactionParams,
        name: &str,
        index: usize,
        args: &[Value],
    ) -> Result<TransactionParams, SdkError> {
        params.clear_data();
        if let Some(address) = self.address {
            params.to = Some(address);
        }
        if params.to.is_none() {
            return Err(SdkError::MissingField("to".to_string()));
        }
        let data = self.table.encode_function(name, index, args)?;
        tracing::debug!(name, index, "prepared call data");
        params.data = Some(data.to_hex());
        Ok(params)
    }
}

/// ERC20 client for a token at `address`
pub fn erc20(transport: impl Transport + 'static, address: Address) -> Result<ContractClient, SdkError> {
    let table = DescriptorTable::from_json(ERC20_INTERFACE)?;
    Ok(ContractClient::new(Arc::new(table), transport).at(address))
}
