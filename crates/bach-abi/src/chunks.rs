//! Random access to the 32-byte words of a returned payload

use bach_primitives::{strip_0x, Address, Word, U256};

use crate::codec::{decode_dynamic_bytes, decode_utf8};
use crate::value::I256;
use crate::AbiError;

/// A hex payload split into 32-byte chunks.
///
/// A trailing partial chunk is dropped. Bytes and string accessors treat the
/// indexed chunk as a length word followed by the payload chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataChunks {
    chunks: Vec<Word>,
}

impl DataChunks {
    /// Split a hex payload, with or without `0x`
    pub fn from_hex(payload: &str) -> Result<Self, AbiError> {
        let digits = strip_0x(payload.trim());
        if !digits.is_ascii() {
            return Err(AbiError::Decode("invalid hex payload".to_string()));
        }
        let whole = digits.len() - digits.len() % Word::HEX_LEN;
        let bytes = hex::decode(&digits[..whole])
            .map_err(|e| AbiError::Decode(format!("invalid hex payload: {}", e)))?;
        if digits[whole..].chars().any(|c| !c.is_ascii_hexdigit()) {
            return Err(AbiError::Decode("invalid hex payload".to_string()));
        }

        let chunks = bytes
            .chunks_exact(Word::LEN)
            .map(Word::from_slice)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { chunks })
    }

    /// Number of complete chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// No chunks at all
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk at `index`
    pub fn get(&self, index: usize) -> Result<&Word, AbiError> {
        self.chunks.get(index).ok_or(AbiError::Index {
            index,
            len: self.chunks.len(),
        })
    }

    /// All chunks in order
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.chunks.iter()
    }

    /// Unsigned integer
    pub fn decode_uint(&self, index: usize) -> Result<U256, AbiError> {
        Ok(self.get(index)?.to_u256())
    }

    /// Two's complement signed integer
    pub fn decode_int(&self, index: usize) -> Result<I256, AbiError> {
        Ok(I256::from_word(self.get(index)?))
    }

    /// Nonzero word is true
    pub fn decode_bool(&self, index: usize) -> Result<bool, AbiError> {
        Ok(!self.get(index)?.is_zero())
    }

    /// Lowest 20 bytes of the chunk
    pub fn decode_address(&self, index: usize) -> Result<Address, AbiError> {
        Ok(Address::from_word(self.get(index)?))
    }

    /// Length-prefixed bytes starting at chunk `index`
    pub fn decode_bytes(&self, index: usize) -> Result<Vec<u8>, AbiError> {
        self.get(index)?;
        let data: Vec<u8> = self.chunks[index..]
            .iter()
            .flat_map(|w| w.as_bytes().iter().copied())
            .collect();
        decode_dynamic_bytes(&data, 0).map(|(bytes, _)| bytes)
    }

    /// Length-prefixed UTF-8 string starting at chunk `index`
    pub fn decode_string(&self, index: usize) -> Result<String, AbiError> {
        decode_utf8(self.decode_bytes(index)?)
    }

    /// Raw hex digits of the chunk, without `0x`
    pub fn chunk_hex(&self, index: usize) -> Result<String, AbiError> {
        Ok(self.get(index)?.to_hex_digits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_hex(value: u64) -> String {
        format!("{:064x}", value)
    }

    #[test]
    fn test_split() {
        let payload = format!("0x{}{}", word_hex(1), word_hex(2));
        let chunks = DataChunks::from_hex(&payload).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.decode_uint(1).unwrap(), U256::from(2));
    }

    #[test]
    fn test_partial_chunk_dropped() {
        let payload = format!("{}abcd", word_hex(7));
        let chunks = DataChunks::from_hex(&payload).unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty() {
        let chunks = DataChunks::from_hex("0x").unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(DataChunks::from_hex("0xzz"), Err(AbiError::Decode(_))));
        assert!(matches!(
            DataChunks::from_hex(&"g".repeat(64)),
            Err(AbiError::Decode(_))
        ));
        assert!(matches!(DataChunks::from_hex("0xé"), Err(AbiError::Decode(_))));
    }

    #[test]
    fn test_index_out_of_range() {
        let chunks = DataChunks::from_hex(&word_hex(1)).unwrap();
        assert_eq!(
            chunks.decode_uint(1).unwrap_err(),
            AbiError::Index { index: 1, len: 1 }
        );
    }

    #[test]
    fn test_decode_int_and_bool() {
        let payload = format!("{}{}", "f".repeat(64), word_hex(0));
        let chunks = DataChunks::from_hex(&payload).unwrap();
        assert_eq!(chunks.decode_int(0).unwrap(), I256::from_i128(-1));
        assert!(chunks.decode_bool(0).unwrap());
        assert!(!chunks.decode_bool(1).unwrap());
    }

    #[test]
    fn test_decode_address() {
        let payload = format!("{}aabbccddeeff00112233445566778899aabbccdd", "0".repeat(24));
        let chunks = DataChunks::from_hex(&payload).unwrap();
        assert_eq!(
            chunks.decode_address(0).unwrap().to_hex(),
            "0xaabbccddeeff00112233445566778899aabbccdd"
        );
    }

    #[test]
    fn test_decode_string() {
        let payload = format!(
            "{}{}{:0<64}",
            word_hex(32),
            word_hex(5),
            hex::encode("hello")
        );
        let chunks = DataChunks::from_hex(&payload).unwrap();
        assert_eq!(chunks.decode_string(1).unwrap(), "hello");
        assert_eq!(chunks.decode_bytes(1).unwrap(), b"hello".to_vec());
        assert_eq!(chunks.chunk_hex(1).unwrap(), word_hex(5));
    }

    #[test]
    fn test_decode_bytes_length_past_payload() {
        let payload = format!("{}{}", word_hex(100), word_hex(0));
        let chunks = DataChunks::from_hex(&payload).unwrap();
        assert!(matches!(chunks.decode_bytes(0), Err(AbiError::Decode(_))));
    }
}
