//! SDK error types

use bach_abi::AbiError;
use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// RPC error from node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Encoding or decoding failed in the codec
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Response had an unexpected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Operation the transport does not provide
    #[error("Unsupported by transport: {0}")]
    Unsupported(String),
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<bach_primitives::PrimitiveError> for SdkError {
    fn from(e: bach_primitives::PrimitiveError) -> Self {
        SdkError::InvalidAddress(e.to_string())
    }
}
