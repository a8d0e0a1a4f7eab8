//! Head/tail layout of parameter lists and arrays
//!
//! Static values are written inline into their head slot. Dynamic values
//! leave an offset word in the head and append their payload to the tail.
//! The offset bookkeeping is carried by [`TailCursor`], an owned value each
//! placement consumes and returns.

use bach_primitives::Word;

use crate::codec::{
    decode_dynamic_bytes, decode_utf8, decode_word, encode_scalar, read_usize, read_word,
};
use crate::types::{ArrayKind, BaseKind, TypeDescriptor};
use crate::value::Value;
use crate::AbiError;

/// Byte offset, relative to the start of a region, where the next tail
/// payload will be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailCursor(usize);

impl TailCursor {
    /// Cursor positioned right after a head of `head_bytes`
    pub const fn new(head_bytes: usize) -> Self {
        Self(head_bytes)
    }

    /// Current offset in bytes
    pub const fn offset(&self) -> usize {
        self.0
    }

    /// Cursor after appending `words` tail words
    #[must_use]
    pub const fn advance(self, words: usize) -> Self {
        Self(self.0 + words * Word::LEN)
    }
}

/// Encoded parameter list: one head slot per parameter, then the tail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Head slots in declaration order
    pub head: Vec<Vec<Word>>,
    /// Tail payloads in declaration order
    pub tail: Vec<Word>,
}

impl Layout {
    /// Head and tail words concatenated
    pub fn into_words(self) -> Vec<Word> {
        let mut words: Vec<Word> = self.head.into_iter().flatten().collect();
        words.extend(self.tail);
        words
    }
}

/// Lay out a parameter list
pub fn encode_params(types: &[TypeDescriptor], values: &[Value]) -> Result<Layout, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::Arity {
            expected: types.len(),
            got: values.len(),
        });
    }

    let encoded = types
        .iter()
        .zip(values)
        .map(|(ty, value)| Ok((ty.is_dynamic(), encode_value(ty, value)?)))
        .collect::<Result<Vec<_>, AbiError>>()?;

    let head_bytes: usize = encoded
        .iter()
        .map(|(dynamic, words)| if *dynamic { Word::LEN } else { words.len() * Word::LEN })
        .sum();

    let mut layout = Layout::default();
    let mut cursor = TailCursor::new(head_bytes);
    for (dynamic, words) in encoded {
        cursor = place(&mut layout, cursor, dynamic, words);
    }
    Ok(layout)
}

fn place(layout: &mut Layout, cursor: TailCursor, dynamic: bool, words: Vec<Word>) -> TailCursor {
    if !dynamic {
        layout.head.push(words);
        return cursor;
    }
    layout.head.push(vec![Word::from_usize(cursor.offset())]);
    let next = cursor.advance(words.len());
    layout.tail.extend(words);
    next
}

/// Encode one value of the given type.
///
/// For dynamic types this is the tail payload; for static types the
/// inline head words.
pub fn encode_value(ty: &TypeDescriptor, value: &Value) -> Result<Vec<Word>, AbiError> {
    match ty.array() {
        ArrayKind::None => encode_scalar(ty.base(), value),
        ArrayKind::Fixed(len) => {
            let items = array_items(ty, value)?;
            if items.len() != len {
                return Err(AbiError::Arity {
                    expected: len,
                    got: items.len(),
                });
            }
            let element = ty.element();
            let mut words = Vec::new();
            for item in items {
                words.extend(encode_value(&element, item)?);
            }
            Ok(words)
        }
        ArrayKind::Dynamic => {
            let items = array_items(ty, value)?;
            let element = ty.element();
            let mut words = vec![Word::from_usize(items.len())];
            if element.is_dynamic() {
                // Elements form a nested head/tail region after the count word
                let types = vec![element; items.len()];
                words.extend(encode_params(&types, items)?.into_words());
            } else {
                for item in items {
                    words.extend(encode_value(&element, item)?);
                }
            }
            Ok(words)
        }
    }
}

fn array_items<'a>(ty: &TypeDescriptor, value: &'a Value) -> Result<&'a [Value], AbiError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(AbiError::TypeMismatch {
            ty: ty.to_string(),
            value: other.kind_name().to_string(),
        }),
    }
}

/// Decode a parameter list laid out from the start of `data`
pub fn decode_params(types: &[TypeDescriptor], data: &[u8]) -> Result<Vec<Value>, AbiError> {
    decode_region(types, data, 0).map(|(values, _)| values)
}

/// Decode a head/tail region starting at `base`, returning the values and
/// the end position of the furthest encoding read
fn decode_region(
    types: &[TypeDescriptor],
    data: &[u8],
    base: usize,
) -> Result<(Vec<Value>, usize), AbiError> {
    let mut values = Vec::with_capacity(types.len());
    let mut head = base;
    let mut end = base;

    for ty in types {
        if ty.is_dynamic() {
            let at = base + read_usize(data, head)?;
            let (value, consumed) = decode_inline(ty, data, at)?;
            values.push(value);
            end = end.max(at + consumed);
            head += Word::LEN;
        } else {
            let (value, consumed) = decode_inline(ty, data, head)?;
            values.push(value);
            head += consumed;
        }
    }

    Ok((values, end.max(head)))
}

/// Decode a value whose encoding starts at `at`, returning the value and
/// the number of bytes its encoding occupies there
pub fn decode_inline(
    ty: &TypeDescriptor,
    data: &[u8],
    at: usize,
) -> Result<(Value, usize), AbiError> {
    match ty.array() {
        ArrayKind::None => match ty.base() {
            BaseKind::Bytes => {
                let (bytes, consumed) = decode_dynamic_bytes(data, at)?;
                Ok((Value::Bytes(bytes), consumed))
            }
            BaseKind::String => {
                let (bytes, consumed) = decode_dynamic_bytes(data, at)?;
                Ok((Value::String(decode_utf8(bytes)?), consumed))
            }
            base => Ok((decode_word(base, &read_word(data, at)?)?, Word::LEN)),
        },
        ArrayKind::Fixed(len) => {
            let element = ty.element();
            let mut items = Vec::new();
            let mut consumed = 0;
            for _ in 0..len {
                let (item, used) = decode_inline(&element, data, at + consumed)?;
                items.push(item);
                consumed += used;
            }
            Ok((Value::Array(items), consumed))
        }
        ArrayKind::Dynamic => {
            let count = read_usize(data, at)?;
            let region = at + Word::LEN;
            let need = region.saturating_add(count.saturating_mul(Word::LEN));
            if data.len() < need {
                return Err(AbiError::short(need, data.len()));
            }

            let element = ty.element();
            if element.is_dynamic() {
                let types = vec![element; count];
                let (items, end) = decode_region(&types, data, region)?;
                Ok((Value::Array(items), end - at))
            } else {
                let mut items = Vec::with_capacity(count);
                let mut consumed = Word::LEN;
                for _ in 0..count {
                    let (item, used) = decode_inline(&element, data, at + consumed)?;
                    items.push(item);
                    consumed += used;
                }
                Ok((Value::Array(items), consumed))
            }
        }
    }
}
