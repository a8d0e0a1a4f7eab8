//! # bach-primitives
//!
//! Primitive types shared by the BachLedger ABI codec.
//!
//! - [`Word`]: the 32-byte unit of call-data layout
//! - [`Address`]: 20-byte account address
//! - hex helpers for `0x`-prefixed strings

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod encoding;
mod error;
mod word;

pub use address::Address;
pub use encoding::{decode_hex, encode_hex, strip_0x};
pub use error::PrimitiveError;
pub use word::{padded_len, Word};

// Re-export primitive-types for U256
pub use primitive_types::U256;
