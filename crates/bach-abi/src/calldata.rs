//! Call data assembly: selector, head and tail

use bach_crypto::SignatureHasher;
use bach_primitives::{strip_0x, Word};
use bytes::{BufMut, Bytes, BytesMut};

use crate::layout::{encode_params, Layout};
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::AbiError;

/// Encoded arguments of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallData {
    selector: Option<[u8; 4]>,
    head: Vec<Vec<Word>>,
    tail: Vec<Word>,
}

impl CallData {
    /// Encode a function call; the selector is hashed from `signature`
    pub fn function(
        hasher: &dyn SignatureHasher,
        signature: &str,
        types: &[TypeDescriptor],
        args: &[Value],
    ) -> Result<Self, AbiError> {
        let selector = hasher.selector(signature);
        tracing::trace!(signature, selector = %hex::encode(selector), "encoding call");
        Self::build(Some(selector), types, args)
    }

    /// Encode constructor arguments (no selector)
    pub fn constructor(types: &[TypeDescriptor], args: &[Value]) -> Result<Self, AbiError> {
        Self::build(None, types, args)
    }

    fn build(
        selector: Option<[u8; 4]>,
        types: &[TypeDescriptor],
        args: &[Value],
    ) -> Result<Self, AbiError> {
        let Layout { head, tail } = encode_params(types, args)?;
        Ok(Self {
            selector,
            head,
            tail,
        })
    }

    /// 4-byte selector, absent for constructors
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.selector
    }

    /// Head slots, one per parameter
    pub fn head(&self) -> &[Vec<Word>] {
        &self.head
    }

    /// Tail words
    pub fn tail(&self) -> &[Word] {
        &self.tail
    }

    /// Size of the head in bytes
    pub fn head_bytes(&self) -> usize {
        self.head.iter().map(Vec::len).sum::<usize>() * Word::LEN
    }

    /// Head and tail words in serialization order
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.head.iter().flatten().chain(self.tail.iter())
    }

    /// Serialized call data
    pub fn to_bytes(&self) -> Bytes {
        let words = self.head.iter().map(Vec::len).sum::<usize>() + self.tail.len();
        let mut buf = BytesMut::with_capacity(4 + words * Word::LEN);
        if let Some(selector) = self.selector {
            buf.put_slice(&selector);
        }
        for word in self.words() {
            buf.put_slice(word.as_bytes());
        }
        buf.freeze()
    }

    /// `0x`-prefixed hex of the serialized call data
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Creation payload: bytecode followed by the encoded arguments.
    ///
    /// An optional `0x` prefix and trailing newline are removed from the
    /// bytecode.
    pub fn with_bytecode(&self, bytecode: &str) -> String {
        let code = strip_0x(bytecode.trim_end_matches(['\n', '\r']));
        let mut out = String::with_capacity(2 + code.len() + self.words().count() * Word::HEX_LEN);
        out.push_str("0x");
        out.push_str(code);
        for word in self.words() {
            out.push_str(&word.to_hex_digits());
        }
        out
    }
}
