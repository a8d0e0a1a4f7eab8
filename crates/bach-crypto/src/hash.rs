//! Keccak-256 hashing and signature digests

use bach_primitives::Word;
use sha3::{Digest, Keccak256};

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> Word {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    Word::from_bytes(result.into())
}

/// Hashes canonical signatures such as `transfer(address,uint256)`.
///
/// The call-data builder only needs the first four bytes of the digest;
/// event decoding needs the full word.
pub trait SignatureHasher: Send + Sync {
    /// Full 32-byte digest of a canonical signature
    fn hash_signature(&self, signature: &str) -> Word;

    /// First 4 bytes of the digest
    fn selector(&self, signature: &str) -> [u8; 4] {
        let digest = self.hash_signature(signature);
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&digest.as_bytes()[..4]);
        selector
    }
}

/// Keccak-256, the hash the execution engine uses for selectors
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl SignatureHasher for Keccak256Hasher {
    fn hash_signature(&self, signature: &str) -> Word {
        keccak256(signature.as_bytes())
    }
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    Keccak256Hasher.selector(signature)
}

/// Compute event topic (full keccak256(signature))
pub fn event_topic(signature: &str) -> Word {
    Keccak256Hasher.hash_signature(signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        let hash = keccak256(&[]);
        assert_eq!(
            hash.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        let hash = keccak256(b"hello");
        assert_eq!(
            hash.to_hex(),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_hex_input() {
        let data = hex::decode("deadbeef").unwrap();
        assert_eq!(
            keccak256(&data).to_hex(),
            "0xd4fd4e189132273036449fc9e11198c739161b4c0116a9a2dccdfa1c492006f1"
        );
    }

    // ==================== ERC20 selectors ====================

    #[test]
    fn test_transfer_selector() {
        assert_eq!(
            function_selector("transfer(address,uint256)"),
            [0xa9, 0x05, 0x9c, 0xbb]
        );
    }

    #[test]
    fn test_balance_of_selector() {
        assert_eq!(function_selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_approve_selector() {
        assert_eq!(
            function_selector("approve(address,uint256)"),
            [0x09, 0x5e, 0xa7, 0xb3]
        );
    }

    #[test]
    fn test_transfer_event_topic() {
        assert_eq!(
            event_topic("Transfer(address,address,uint256)").to_hex(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn test_selector_is_topic_prefix() {
        let signature = "foo(uint256,string)";
        let topic = event_topic(signature);
        assert_eq!(&function_selector(signature)[..], &topic.as_bytes()[..4]);
    }

    #[test]
    fn test_custom_hasher_through_trait() {
        struct Fixed;
        impl SignatureHasher for Fixed {
            fn hash_signature(&self, _signature: &str) -> Word {
                Word::from_bytes([0x42; 32])
            }
        }
        assert_eq!(Fixed.selector("anything()"), [0x42; 4]);
    }
}
