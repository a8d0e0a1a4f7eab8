//! Per-type word encoders and decoders
//!
//! Every scalar occupies exactly one word except `bytes` and `string`,
//! which become a length word followed by the zero-padded content.

use bach_primitives::{padded_len, Address, Word, U256};

use crate::types::BaseKind;
use crate::value::{Value, I256};
use crate::AbiError;

/// Encode a scalar value into its word(s)
pub fn encode_scalar(base: BaseKind, value: &Value) -> Result<Vec<Word>, AbiError> {
    let word = match (base, value) {
        (BaseKind::Uint(bits) | BaseKind::Ufixed { bits, .. }, Value::Uint(v)) => {
            encode_unsigned(base, bits, v)?
        }
        (BaseKind::Uint(bits) | BaseKind::Ufixed { bits, .. }, Value::Int(v)) => {
            if v.negative {
                return Err(out_of_range(base, v));
            }
            encode_unsigned(base, bits, &v.abs)?
        }
        (BaseKind::Int(bits) | BaseKind::Fixed { bits, .. }, Value::Int(v)) => {
            encode_signed(base, bits, v)?
        }
        (BaseKind::Int(bits) | BaseKind::Fixed { bits, .. }, Value::Uint(v)) => {
            encode_signed(base, bits, &I256::new(*v, false))?
        }
        (BaseKind::Bool, Value::Bool(b)) => Word::from_usize(usize::from(*b)),
        (BaseKind::Address, Value::Address(a)) => a.to_word(),
        (BaseKind::FixedBytes(size), Value::FixedBytes(data)) => {
            if data.len() > size {
                return Err(AbiError::Range {
                    ty: base.to_string(),
                    value: format!("{} bytes", data.len()),
                });
            }
            Word::right_padded(data)?
        }
        (BaseKind::Bytes, Value::Bytes(data)) => return Ok(encode_dynamic_bytes(data)),
        (BaseKind::String, Value::String(s)) => return Ok(encode_dynamic_bytes(s.as_bytes())),
        _ => {
            return Err(AbiError::TypeMismatch {
                ty: base.to_string(),
                value: value.kind_name().to_string(),
            })
        }
    };
    Ok(vec![word])
}

fn encode_unsigned(base: BaseKind, bits: usize, value: &U256) -> Result<Word, AbiError> {
    if value.bits() > bits {
        return Err(AbiError::Range {
            ty: base.to_string(),
            value: value.to_string(),
        });
    }
    Ok(Word::from_u256(value))
}

fn encode_signed(base: BaseKind, bits: usize, value: &I256) -> Result<Word, AbiError> {
    if value.abs.bits() > bits || !fits_twos_complement(value) {
        return Err(out_of_range(base, value));
    }
    Ok(value.to_word())
}

/// Whether the value lies in [-2^255, 2^255 - 1]
fn fits_twos_complement(value: &I256) -> bool {
    let limit = U256::one() << 255;
    if value.negative {
        value.abs <= limit
    } else {
        value.abs < limit
    }
}

fn out_of_range(base: BaseKind, value: &I256) -> AbiError {
    AbiError::Range {
        ty: base.to_string(),
        value: value.to_string(),
    }
}

/// Length word followed by the content, zero-padded to a word boundary
pub fn encode_dynamic_bytes(data: &[u8]) -> Vec<Word> {
    let mut words = Vec::with_capacity(1 + padded_len(data.len()) / Word::LEN);
    words.push(Word::from_usize(data.len()));
    words.extend(Word::chunk_padded(data));
    words
}

/// Decode a static scalar from its word
pub fn decode_word(base: BaseKind, word: &Word) -> Result<Value, AbiError> {
    match base {
        BaseKind::Uint(_) | BaseKind::Ufixed { .. } => Ok(Value::Uint(word.to_u256())),
        BaseKind::Int(_) | BaseKind::Fixed { .. } => Ok(Value::Int(I256::from_word(word))),
        BaseKind::Bool => Ok(Value::Bool(!word.is_zero())),
        BaseKind::Address => Ok(Value::Address(Address::from_word(word))),
        BaseKind::FixedBytes(size) => word
            .as_bytes()
            .get(..size)
            .map(|bytes| Value::FixedBytes(bytes.to_vec()))
            .ok_or_else(|| AbiError::Decode(format!("{} is wider than a word", base))),
        BaseKind::Bytes | BaseKind::String => Err(AbiError::Decode(format!(
            "{} is not a single-word type",
            base
        ))),
    }
}

/// Read a big-endian word at byte position `at`
pub(crate) fn read_word(data: &[u8], at: usize) -> Result<Word, AbiError> {
    let end = at
        .checked_add(Word::LEN)
        .ok_or_else(|| AbiError::Decode("offset overflow".to_string()))?;
    if data.len() < end {
        return Err(AbiError::short(end, data.len()));
    }
    Ok(Word::from_slice(&data[at..end])?)
}

/// Read a length/offset word, rejecting values that cannot index memory
pub(crate) fn read_usize(data: &[u8], at: usize) -> Result<usize, AbiError> {
    let value = read_word(data, at)?.to_u256();
    if value > U256::from(u32::MAX) {
        return Err(AbiError::Decode(format!("length or offset {} too large", value)));
    }
    Ok(value.as_usize())
}

/// Read a length-prefixed byte string whose length word sits at `at`.
///
/// Returns the content and the number of bytes consumed including padding.
pub fn decode_dynamic_bytes(data: &[u8], at: usize) -> Result<(Vec<u8>, usize), AbiError> {
    let len = read_usize(data, at)?;
    let start = at + Word::LEN;
    let end = start + len;
    if data.len() < end {
        return Err(AbiError::short(end, data.len()));
    }
    Ok((data[start..end].to_vec(), Word::LEN + padded_len(len)))
}

/// UTF-8 decode, trimming control-character padding at either end
pub fn decode_utf8(bytes: Vec<u8>) -> Result<String, AbiError> {
    let s = String::from_utf8(bytes)
        .map_err(|e| AbiError::Decode(format!("invalid UTF-8: {}", e)))?;
    Ok(s.trim_matches(|c: char| c.is_control()).to_string())
}
