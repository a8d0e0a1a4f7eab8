//! Typed argument and return values

use bach_primitives::{decode_hex, encode_hex, Address, Word, U256};
use serde_json::Value as Json;

use crate::types::{ArrayKind, BaseKind, TypeDescriptor};
use crate::AbiError;

/// A typed value passed to or returned from a contract member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unsigned integer (also used for `ufixed`, pre-scaled)
    Uint(U256),
    /// Signed integer (also used for `fixed`, pre-scaled)
    Int(I256),
    /// Boolean
    Bool(bool),
    /// Address
    Address(Address),
    /// `bytesN` contents
    FixedBytes(Vec<u8>),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Elements of a fixed or dynamic array
    Array(Vec<Value>),
}

/// Signed 256-bit integer as sign and magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I256 {
    /// Absolute value
    pub abs: U256,
    /// Sign (true if negative)
    pub negative: bool,
}

impl I256 {
    /// Create a new I256; negative zero is normalized to zero
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }

    /// Two's complement word
    pub fn to_word(&self) -> Word {
        if self.negative {
            let (twos, _) = (!self.abs).overflowing_add(U256::one());
            Word::from_u256(&twos)
        } else {
            Word::from_u256(&self.abs)
        }
    }

    /// Read a two's complement word
    pub fn from_word(word: &Word) -> Self {
        let raw = word.to_u256();
        if word.as_bytes()[0] & 0x80 != 0 {
            let (abs, _) = (!raw).overflowing_add(U256::one());
            Self::new(abs, true)
        } else {
            Self::new(raw, false)
        }
    }
}

impl std::fmt::Display for I256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Uint(_) => "uint",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Address(_) => "address",
            Value::FixedBytes(_) => "fixed bytes",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Create a uint value from u128
    pub fn uint(value: u128) -> Self {
        Value::Uint(U256::from(value))
    }

    /// Create an int value from i128
    pub fn int(value: i128) -> Self {
        Value::Int(I256::from_i128(value))
    }

    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Coerce a JSON argument into a value of the declared type.
    ///
    /// Integers accept JSON numbers, decimal strings (optionally with a
    /// leading `-`) and `0x` hex strings. Byte types accept `0x` hex strings.
    /// Arrays accept JSON arrays of element arguments.
    pub fn from_json(ty: &TypeDescriptor, json: &Json) -> Result<Self, AbiError> {
        if ty.is_array() {
            let items = json.as_array().ok_or_else(|| mismatch(ty, json))?;
            if let ArrayKind::Fixed(len) = ty.array() {
                if items.len() != len {
                    return Err(AbiError::Arity {
                        expected: len,
                        got: items.len(),
                    });
                }
            }
            let element = ty.element();
            return items
                .iter()
                .map(|item| Value::from_json(&element, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }

        match ty.base() {
            BaseKind::Uint(_) | BaseKind::Ufixed { .. } | BaseKind::Int(_) | BaseKind::Fixed { .. } => {
                let int = json_integer(ty, json)?;
                if int.negative || ty.base().is_signed() {
                    Ok(Value::Int(int))
                } else {
                    Ok(Value::Uint(int.abs))
                }
            }
            BaseKind::Bool => match json {
                Json::Bool(b) => Ok(Value::Bool(*b)),
                Json::Number(n) if n.as_u64() == Some(0) => Ok(Value::Bool(false)),
                Json::Number(n) if n.as_u64() == Some(1) => Ok(Value::Bool(true)),
                _ => Err(mismatch(ty, json)),
            },
            BaseKind::Address => {
                let s = json.as_str().ok_or_else(|| mismatch(ty, json))?;
                let address = Address::from_hex(s).map_err(|_| mismatch(ty, json))?;
                Ok(Value::Address(address))
            }
            BaseKind::FixedBytes(_) => Ok(Value::FixedBytes(json_bytes(ty, json)?)),
            BaseKind::Bytes => Ok(Value::Bytes(json_bytes(ty, json)?)),
            BaseKind::String => {
                let s = json.as_str().ok_or_else(|| mismatch(ty, json))?;
                Ok(Value::String(s.to_string()))
            }
        }
    }

    /// Render as JSON: integers as decimal strings, bytes as `0x` hex
    pub fn to_json(&self) -> Json {
        match self {
            Value::Uint(v) => Json::String(v.to_string()),
            Value::Int(v) => Json::String(v.to_string()),
            Value::Bool(b) => Json::Bool(*b),
            Value::Address(a) => Json::String(a.to_hex()),
            Value::FixedBytes(b) | Value::Bytes(b) => Json::String(encode_hex(b)),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
        }
    }
}

fn mismatch(ty: &TypeDescriptor, json: &Json) -> AbiError {
    AbiError::TypeMismatch {
        ty: ty.to_string(),
        value: json.to_string(),
    }
}

fn json_integer(ty: &TypeDescriptor, json: &Json) -> Result<I256, AbiError> {
    match json {
        Json::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(I256::new(U256::from(v), false))
            } else if let Some(v) = n.as_i64() {
                Ok(I256::from_i128(v as i128))
            } else {
                Err(mismatch(ty, json))
            }
        }
        Json::String(s) => {
            let (negative, digits) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s.as_str()),
            };
            let abs = match digits.strip_prefix("0x") {
                Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16).ok(),
                None if !digits.is_empty() => U256::from_dec_str(digits).ok(),
                _ => None,
            };
            abs.map(|abs| I256::new(abs, negative))
                .ok_or_else(|| mismatch(ty, json))
        }
        _ => Err(mismatch(ty, json)),
    }
}

fn json_bytes(ty: &TypeDescriptor, json: &Json) -> Result<Vec<u8>, AbiError> {
    let s = json.as_str().ok_or_else(|| mismatch(ty, json))?;
    decode_hex(s).map_err(|_| mismatch(ty, json))
}
