//! ABI codec error types

use bach_primitives::PrimitiveError;
use thiserror::Error;

/// Error returned by every encode/decode operation of the codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Type string does not follow `baseName [digits] ['[' [digits] ']']`
    #[error("malformed type '{ty}': {reason}")]
    MalformedType {
        /// Offending type string
        ty: String,
        /// What was wrong with it
        reason: String,
    },

    /// Type string is well-formed but outside what the codec encodes
    #[error("unsupported type '{0}'")]
    Unsupported(String),

    /// Interface document could not be parsed
    #[error("interface parse error: {0}")]
    InterfaceParse(String),

    /// Wrong number of arguments or array elements
    #[error("expected {expected} values, got {got}")]
    Arity {
        /// Declared count
        expected: usize,
        /// Supplied count
        got: usize,
    },

    /// Numeric value does not fit its declared type
    #[error("value {value} out of range for {ty}")]
    Range {
        /// Declared type
        ty: String,
        /// Rendered value
        value: String,
    },

    /// Value variant cannot represent the declared type
    #[error("cannot encode {value} as {ty}")]
    TypeMismatch {
        /// Declared type
        ty: String,
        /// Kind of value that was supplied
        value: String,
    },

    /// No member with this name, kind and occurrence index
    #[error("unknown {kind} '{name}' at index {index}")]
    UnknownMember {
        /// Member kind looked up
        kind: String,
        /// Name or kind keyword looked up
        name: String,
        /// Occurrence index
        index: usize,
    },

    /// Payload is malformed or shorter than its layout requires
    #[error("decode error: {0}")]
    Decode(String),

    /// Chunk index outside the payload
    #[error("chunk index {index} out of range ({len} chunks)")]
    Index {
        /// Requested index
        index: usize,
        /// Number of chunks available
        len: usize,
    },
}

impl AbiError {
    pub(crate) fn malformed(ty: &str, reason: impl Into<String>) -> Self {
        AbiError::MalformedType {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn short(need: usize, have: usize) -> Self {
        AbiError::Decode(format!(
            "insufficient data: need {} bytes, have {}",
            need, have
        ))
    }
}

impl From<PrimitiveError> for AbiError {
    fn from(e: PrimitiveError) -> Self {
        AbiError::Decode(e.to_string())
    }
}

impl From<serde_json::Error> for AbiError {
    fn from(e: serde_json::Error) -> Self {
        AbiError::InterfaceParse(e.to_string())
    }
}
