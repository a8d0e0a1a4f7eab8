//! # bach-sdk
//!
//! Transport glue for the BachLedger ABI codec.
//!
//! ## Features
//!
//! - **Transport**: request/response and push-payload contract, with mock and HTTP implementations
//! - **ContractClient**: encodes calls through a [`bach_abi::DescriptorTable`] and sends them
//! - **Subscription**: consumes pushed hex payloads as [`bach_abi::DataChunks`]
//!
//! ## Contract Interaction
//!
//! ```rust,no_run
//! use bach_sdk::{contract, MockTransport, Value};
//! use bach_sdk::types::TransactionParams;
//! use bach_primitives::Address;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let token = Address::from_hex("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")?;
//!     let client = contract::erc20(MockTransport::new(), token)?;
//!
//!     let owner = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d")?;
//!     let chunks = client
//!         .call(TransactionParams::from(owner), "balanceOf", 0, &[Value::Address(owner)])
//!         .await?;
//!
//!     if !chunks.is_empty() {
//!         println!("Balance: {}", chunks.decode_uint(0)?);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
mod error;
mod subscription;
mod transport;
pub mod types;

// Re-export main types
pub use contract::ContractClient;
pub use error::SdkError;
pub use subscription::Subscription;
pub use transport::{MockTransport, RecordedRequest};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export codec types for convenience
pub use bach_abi::{AbiError, DataChunks, DescriptorTable, Value};
pub use bach_primitives::{Address, U256};
