//! Common error types for primitives

use thiserror::Error;

/// Primitive operation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// Input has the wrong byte length
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Input does not fit into a single word
    #[error("{0} bytes do not fit into a 32-byte word")]
    WordOverflow(usize),
}

impl From<hex::FromHexError> for PrimitiveError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitiveError::InvalidHex(e.to_string())
    }
}
