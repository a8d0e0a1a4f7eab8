//! Contract account address (20 bytes)

use std::fmt;
use std::str::FromStr;

use crate::encoding::{decode_hex, encode_hex};
use crate::{PrimitiveError, Word};

/// 20-byte account address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of address in bytes
    pub const LEN: usize = 20;

    /// Zero address (0x0000...0000)
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Create address from an exactly 20-byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
        if slice.len() != Self::LEN {
            return Err(PrimitiveError::InvalidLength {
                expected: Self::LEN,
                got: slice.len(),
            });
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Address(bytes))
    }

    /// Parse address from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        Self::from_slice(&decode_hex(s)?)
    }

    /// Take the lowest 20 bytes of a word
    pub fn from_word(word: &Word) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word.as_bytes()[32 - Self::LEN..]);
        Address(bytes)
    }

    /// Right-align in a word behind 12 zero bytes
    pub fn to_word(&self) -> Word {
        let mut bytes = [0u8; 32];
        bytes[32 - Self::LEN..].copy_from_slice(&self.0);
        Word::from_bytes(bytes)
    }

    /// Get as byte array
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Convert to lowercase hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        encode_hex(self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d";

    #[test]
    fn test_address_from_hex() {
        let addr = Address::from_hex(SAMPLE).unwrap();
        assert!(!addr.is_zero());

        let unprefixed = Address::from_hex(&SAMPLE[2..]).unwrap();
        assert_eq!(addr, unprefixed);
    }

    #[test]
    fn test_address_to_hex_is_lowercase() {
        let addr: Address = SAMPLE.parse().unwrap();
        assert_eq!(addr.to_hex(), "0x742d35cc6634c0532925a3b844bc9e7595f0ab3d");
        assert_eq!(format!("{}", addr), addr.to_hex());
    }

    #[test]
    fn test_address_wrong_length() {
        assert!(matches!(
            Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB"),
            Err(PrimitiveError::InvalidLength { expected: 20, got: 19 })
        ));
        assert!(matches!(
            Address::from_hex("0x"),
            Err(PrimitiveError::InvalidLength { expected: 20, got: 0 })
        ));
    }

    #[test]
    fn test_address_invalid_hex() {
        assert!(matches!(
            Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aGGG"),
            Err(PrimitiveError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_address_word_layout() {
        let addr = Address::from_hex(SAMPLE).unwrap();
        let word = addr.to_word();
        assert!(word.as_bytes()[..12].iter().all(|b| *b == 0));
        assert_eq!(&word.as_bytes()[12..], addr.as_bytes());
        assert_eq!(Address::from_word(&word), addr);
    }

    #[test]
    fn test_address_from_word_ignores_high_bytes() {
        let word = Word::from_bytes([0xff; 32]);
        assert_eq!(Address::from_word(&word), Address::from_bytes([0xff; 20]));
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert_eq!(Address::default(), Address::ZERO);
        assert_eq!(Address::ZERO.to_hex(), "0x0000000000000000000000000000000000000000");
    }
}
