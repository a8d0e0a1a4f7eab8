//! # bach-abi
//!
//! Contract ABI codec for BachLedger.
//!
//! ## Features
//!
//! - **TypeDescriptor**: parsed parameter types (`uint256`, `bytes32`, `address[]`, ...)
//! - **DescriptorTable**: interface document index, looked up by kind, name and overload
//! - **CallData**: selector + head + tail assembly
//! - **DataChunks**: random access decoding of returned words
//!
//! ## Quick Start
//!
//! ```rust
//! use bach_abi::{DescriptorTable, Value};
//!
//! let table = DescriptorTable::from_json(
//!     r#"[{"type":"function","name":"foo","inputs":[
//!         {"name":"a","type":"uint256"},{"name":"b","type":"string"}]}]"#,
//! )?;
//!
//! let data = table.encode_function("foo", 0, &[Value::uint(10), Value::string("hi")])?;
//! assert_eq!(data.head().len(), 2);
//! assert!(data.to_hex().starts_with("0x"));
//! # Ok::<(), bach_abi::AbiError>(())
//! ```
//!
//! Fixed-size arrays are always encoded inline, even when their elements are
//! dynamic. Nested arrays and tuples are rejected when the type is parsed.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod calldata;
mod chunks;
pub mod codec;
mod error;
mod interface;
pub mod layout;
mod table;
mod types;
mod value;

pub use calldata::CallData;
pub use chunks::DataChunks;
pub use error::AbiError;
pub use interface::{MemberDescriptor, MemberKind, Param, StateMutability};
pub use layout::{decode_params, encode_params, Layout, TailCursor};
pub use table::DescriptorTable;
pub use types::{ArrayKind, BaseKind, TypeDescriptor};
pub use value::{Value, I256};
