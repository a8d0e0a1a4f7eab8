//! Hex string helpers shared by the codec and its collaborators

use crate::PrimitiveError;

/// Strip an optional `0x`/`0X` prefix.
pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string into bytes.
///
/// Surrounding whitespace (such as the trailing newline of a compiled
/// bytecode file) and the `0x` prefix are ignored. An empty string decodes
/// to an empty vector.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, PrimitiveError> {
    let s = strip_0x(s.trim());
    if s.is_empty() {
        return Ok(Vec::new());
    }
    Ok(hex::decode(s)?)
}

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}
