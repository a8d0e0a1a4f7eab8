//! # bach-crypto
//!
//! Hashing used by the ABI codec.
//!
//! - Keccak-256 hashing
//! - Function selectors and event topics
//! - [`SignatureHasher`], the seam the call-data builder hashes through

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;

pub use hash::{event_topic, function_selector, keccak256, Keccak256Hasher, SignatureHasher};
