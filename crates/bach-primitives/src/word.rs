//! 32-byte ABI word

use std::fmt;

use primitive_types::U256;

use crate::encoding::{decode_hex, encode_hex};
use crate::PrimitiveError;

/// A 32-byte word, the unit every head and tail slot is measured in
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Word([u8; 32]);

impl Word {
    /// Size of a word in bytes
    pub const LEN: usize = 32;

    /// Size of a word in hex characters
    pub const HEX_LEN: usize = 64;

    /// All-zero word
    pub const ZERO: Word = Word([0u8; 32]);

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Word(bytes)
    }

    /// Create from an exactly 32-byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
        if slice.len() != Self::LEN {
            return Err(PrimitiveError::InvalidLength {
                expected: Self::LEN,
                got: slice.len(),
            });
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(Word(bytes))
    }

    /// Parse a 64-character hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        Self::from_slice(&decode_hex(s)?)
    }

    /// Big-endian encoding of an unsigned 256-bit value
    pub fn from_u256(value: &U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        Word(bytes)
    }

    /// Big-endian encoding of a length or byte offset
    pub fn from_usize(value: usize) -> Self {
        Self::from_u256(&U256::from(value))
    }

    /// Place `data` at the start of the word, zero-filling the rest
    pub fn right_padded(data: &[u8]) -> Result<Self, PrimitiveError> {
        if data.len() > Self::LEN {
            return Err(PrimitiveError::WordOverflow(data.len()));
        }
        let mut bytes = [0u8; 32];
        bytes[..data.len()].copy_from_slice(data);
        Ok(Word(bytes))
    }

    /// Split arbitrary data into words, right-padding the last one.
    ///
    /// Empty input yields no words.
    pub fn chunk_padded(data: &[u8]) -> Vec<Word> {
        data.chunks(Self::LEN)
            .map(|chunk| {
                let mut bytes = [0u8; 32];
                bytes[..chunk.len()].copy_from_slice(chunk);
                Word(bytes)
            })
            .collect()
    }

    /// Interpret the word as a big-endian unsigned integer
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Hex with 0x prefix
    pub fn to_hex(&self) -> String {
        encode_hex(self.0)
    }

    /// Bare 64-character hex, as it appears inside call data
    pub fn to_hex_digits(&self) -> String {
        hex::encode(self.0)
    }
}

/// Number of bytes `len` occupies once padded to whole words
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(Word::LEN) * Word::LEN
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.to_hex())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Word {
    fn from(bytes: [u8; 32]) -> Self {
        Word(bytes)
    }
}

impl From<Word> for [u8; 32] {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl AsRef<[u8]> for Word {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_from_u256_is_big_endian() {
        let word = Word::from_u256(&U256::from(0x0102u64));
        assert_eq!(word.as_bytes()[30], 0x01);
        assert_eq!(word.as_bytes()[31], 0x02);
        assert!(word.as_bytes()[..30].iter().all(|b| *b == 0));
        assert_eq!(word.to_u256(), U256::from(0x0102u64));
    }

    #[test]
    fn test_word_from_usize() {
        assert_eq!(
            Word::from_usize(64).to_hex_digits(),
            "0000000000000000000000000000000000000000000000000000000000000040"
        );
    }

    #[test]
    fn test_right_padding() {
        let right = Word::right_padded(&[0xaa, 0xbb]).unwrap();
        assert_eq!(&right.as_bytes()[..2], &[0xaa, 0xbb]);
        assert_eq!(right.as_bytes()[31], 0);
    }

    #[test]
    fn test_padding_overflow() {
        let data = [0u8; 33];
        assert_eq!(Word::right_padded(&data), Err(PrimitiveError::WordOverflow(33)));
    }

    #[test]
    fn test_chunk_padded() {
        assert!(Word::chunk_padded(&[]).is_empty());

        let words = Word::chunk_padded(&[0x11; 33]);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].as_bytes(), &[0x11; 32]);
        assert_eq!(words[1].as_bytes()[0], 0x11);
        assert!(words[1].as_bytes()[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 32);
        assert_eq!(padded_len(32), 32);
        assert_eq!(padded_len(33), 64);
    }

    #[test]
    fn test_word_from_hex() {
        let hex = "0x000000000000000000000000000000000000000000000000000000000000000a";
        let word = Word::from_hex(hex).unwrap();
        assert_eq!(word.to_u256(), U256::from(10));
        assert_eq!(word.to_hex(), hex);
    }

    #[test]
    fn test_word_from_hex_wrong_length() {
        assert!(matches!(
            Word::from_hex("0x0a"),
            Err(PrimitiveError::InvalidLength { expected: 32, got: 1 })
        ));
    }

    #[test]
    fn test_word_zero() {
        assert!(Word::ZERO.is_zero());
        assert!(Word::default().is_zero());
        assert!(!Word::from_usize(1).is_zero());
    }
}
