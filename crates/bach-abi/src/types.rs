//! Type descriptors and the type-signature parser
//!
//! A declared parameter type such as `uint256`, `bytes32`, `address[]` or
//! `string[3]` is parsed once into a [`TypeDescriptor`]; every later encode
//! or decode dispatches on the closed [`BaseKind`] enum rather than on the
//! type string.

use std::fmt;
use std::str::FromStr;

use crate::AbiError;

/// Default bit width of `uint` / `int`
pub const DEFAULT_INT_BITS: usize = 256;

/// Default bit width of `fixed` / `ufixed`
pub const DEFAULT_FIXED_BITS: usize = 128;

/// Default decimal count of `fixed` / `ufixed`
pub const DEFAULT_FIXED_DECIMALS: usize = 18;

const MAX_FIXED_DECIMALS: usize = 80;

/// Scalar kind of a parameter (or of an array's elements)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKind {
    /// Unsigned integer with bit width
    Uint(usize),
    /// Signed integer with bit width
    Int(usize),
    /// Boolean
    Bool,
    /// 20-byte address
    Address,
    /// Fixed-size byte string `bytesN` (1..=32)
    FixedBytes(usize),
    /// Dynamic byte string
    Bytes,
    /// UTF-8 string
    String,
    /// Signed fixed-point number, carried as a pre-scaled integer
    Fixed {
        /// Bit width
        bits: usize,
        /// Decimal places
        decimals: usize,
    },
    /// Unsigned fixed-point number, carried as a pre-scaled integer
    Ufixed {
        /// Bit width
        bits: usize,
        /// Decimal places
        decimals: usize,
    },
}

impl BaseKind {
    /// Bit width of the integer and fixed-point family
    pub fn bit_width(&self) -> Option<usize> {
        match self {
            BaseKind::Uint(bits) | BaseKind::Int(bits) => Some(*bits),
            BaseKind::Fixed { bits, .. } | BaseKind::Ufixed { bits, .. } => Some(*bits),
            _ => None,
        }
    }

    /// Whether negative values are representable
    pub fn is_signed(&self) -> bool {
        matches!(self, BaseKind::Int(_) | BaseKind::Fixed { .. })
    }

    /// Whether this scalar needs a tail payload
    pub fn is_dynamic(&self) -> bool {
        matches!(self, BaseKind::Bytes | BaseKind::String)
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseKind::Uint(bits) => write!(f, "uint{}", bits),
            BaseKind::Int(bits) => write!(f, "int{}", bits),
            BaseKind::Bool => f.write_str("bool"),
            BaseKind::Address => f.write_str("address"),
            BaseKind::FixedBytes(size) => write!(f, "bytes{}", size),
            BaseKind::Bytes => f.write_str("bytes"),
            BaseKind::String => f.write_str("string"),
            BaseKind::Fixed { bits, decimals } => write!(f, "fixed{}x{}", bits, decimals),
            BaseKind::Ufixed { bits, decimals } => write!(f, "ufixed{}x{}", bits, decimals),
        }
    }
}

/// Array dimension of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArrayKind {
    /// Not an array
    #[default]
    None,
    /// `T[N]`
    Fixed(usize),
    /// `T[]`
    Dynamic,
}

/// Parsed parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    base: BaseKind,
    array: ArrayKind,
}

impl TypeDescriptor {
    pub(crate) const fn scalar(base: BaseKind) -> Self {
        Self {
            base,
            array: ArrayKind::None,
        }
    }

    /// Parse a declared type string
    pub fn parse(ty: &str) -> Result<Self, AbiError> {
        let trimmed = ty.trim();
        if trimmed.starts_with("tuple") || trimmed.starts_with('(') {
            return Err(AbiError::Unsupported(trimmed.to_string()));
        }

        let (base_str, array) = match trimmed.find('[') {
            Some(pos) => (&trimmed[..pos], parse_array_suffix(trimmed, &trimmed[pos..])?),
            None => (trimmed, ArrayKind::None),
        };

        let base = parse_base(trimmed, base_str)?;
        Ok(Self { base, array })
    }

    /// Scalar kind
    pub fn base(&self) -> BaseKind {
        self.base
    }

    /// Array dimension
    pub fn array(&self) -> ArrayKind {
        self.array
    }

    /// Descriptor of a single element; the descriptor itself for scalars
    pub fn element(&self) -> TypeDescriptor {
        TypeDescriptor::scalar(self.base)
    }

    /// Whether this is `T[N]` or `T[]`
    pub fn is_array(&self) -> bool {
        self.array != ArrayKind::None
    }

    /// Static/dynamic classification.
    ///
    /// Dynamic iff `string`, `bytes` or `T[]`. A fixed-size array is always
    /// static, even when its elements are dynamic; such arrays are encoded
    /// inline.
    pub fn is_dynamic(&self) -> bool {
        match self.array {
            ArrayKind::Dynamic => true,
            ArrayKind::Fixed(_) => false,
            ArrayKind::None => self.base.is_dynamic(),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.array {
            ArrayKind::None => write!(f, "{}", self.base),
            ArrayKind::Fixed(len) => write!(f, "{}[{}]", self.base, len),
            ArrayKind::Dynamic => write!(f, "{}[]", self.base),
        }
    }
}

fn parse_array_suffix(ty: &str, suffix: &str) -> Result<ArrayKind, AbiError> {
    let close = suffix
        .find(']')
        .ok_or_else(|| AbiError::malformed(ty, "unterminated array dimension"))?;
    let rest = &suffix[close + 1..];
    if rest.starts_with('[') {
        // T[][] / T[2][3]
        return Err(AbiError::Unsupported(ty.to_string()));
    }
    if !rest.is_empty() {
        return Err(AbiError::malformed(ty, "trailing characters after array dimension"));
    }

    let size = &suffix[1..close];
    if size.is_empty() {
        return Ok(ArrayKind::Dynamic);
    }
    let len = parse_digits(ty, size, "array size")?;
    if len == 0 {
        return Err(AbiError::malformed(ty, "array size must be positive"));
    }
    Ok(ArrayKind::Fixed(len))
}

fn parse_base(ty: &str, base: &str) -> Result<BaseKind, AbiError> {
    let split = base
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(base.len());
    let (name, size) = base.split_at(split);

    match name {
        "uint" => Ok(BaseKind::Uint(parse_bits(ty, size, DEFAULT_INT_BITS)?)),
        "int" => Ok(BaseKind::Int(parse_bits(ty, size, DEFAULT_INT_BITS)?)),
        "fixed" => {
            let (bits, decimals) = parse_fixed(ty, size)?;
            Ok(BaseKind::Fixed { bits, decimals })
        }
        "ufixed" => {
            let (bits, decimals) = parse_fixed(ty, size)?;
            Ok(BaseKind::Ufixed { bits, decimals })
        }
        "bytes" if size.is_empty() => Ok(BaseKind::Bytes),
        "bytes" => {
            let len = parse_digits(ty, size, "byte width")?;
            if !(1..=32).contains(&len) {
                return Err(AbiError::malformed(ty, "byte width must be between 1 and 32"));
            }
            Ok(BaseKind::FixedBytes(len))
        }
        "bool" | "address" | "string" if !size.is_empty() => {
            Err(AbiError::malformed(ty, format!("'{}' takes no size", name)))
        }
        "bool" => Ok(BaseKind::Bool),
        "address" => Ok(BaseKind::Address),
        "string" => Ok(BaseKind::String),
        _ => Err(AbiError::malformed(ty, format!("unknown base type '{}'", name))),
    }
}

fn parse_bits(ty: &str, size: &str, default: usize) -> Result<usize, AbiError> {
    if size.is_empty() {
        return Ok(default);
    }
    let bits = parse_digits(ty, size, "bit width")?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::malformed(
            ty,
            "bit width must be a multiple of 8 between 8 and 256",
        ));
    }
    Ok(bits)
}

fn parse_fixed(ty: &str, size: &str) -> Result<(usize, usize), AbiError> {
    match size.split_once('x') {
        Some((bits, decimals)) => {
            let bits = parse_bits(ty, bits, DEFAULT_FIXED_BITS)?;
            let decimals = parse_digits(ty, decimals, "decimal count")?;
            if decimals > MAX_FIXED_DECIMALS {
                return Err(AbiError::malformed(ty, "at most 80 decimals"));
            }
            Ok((bits, decimals))
        }
        None => Ok((
            parse_bits(ty, size, DEFAULT_FIXED_BITS)?,
            DEFAULT_FIXED_DECIMALS,
        )),
    }
}

fn parse_digits(ty: &str, digits: &str, what: &str) -> Result<usize, AbiError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::malformed(ty, format!("{} '{}' is not numeric", what, digits)));
    }
    digits
        .parse()
        .map_err(|_| AbiError::malformed(ty, format!("{} '{}' is too large", what, digits)))
}
