//! Interface document members

use std::fmt;
use std::str::FromStr;

use bach_crypto::{Keccak256Hasher, SignatureHasher};
use bach_primitives::Word;
use serde::Deserialize;

use crate::types::TypeDescriptor;
use crate::AbiError;

/// Kind of an interface member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// Callable function
    #[default]
    Function,
    /// Contract constructor
    Constructor,
    /// Log event
    Event,
    /// Fallback function
    Fallback,
    /// Plain value receiver
    Receive,
    /// Custom error
    Error,
}

impl MemberKind {
    /// Keyword used in the `type` field of the interface document
    pub fn keyword(&self) -> &'static str {
        match self {
            MemberKind::Function => "function",
            MemberKind::Constructor => "constructor",
            MemberKind::Event => "event",
            MemberKind::Fallback => "fallback",
            MemberKind::Receive => "receive",
            MemberKind::Error => "error",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.keyword())
    }
}

impl FromStr for MemberKind {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "function" => Ok(MemberKind::Function),
            "constructor" => Ok(MemberKind::Constructor),
            "event" => Ok(MemberKind::Event),
            "fallback" => Ok(MemberKind::Fallback),
            "receive" => Ok(MemberKind::Receive),
            "error" => Ok(MemberKind::Error),
            other => Err(AbiError::InterfaceParse(format!("unknown member kind '{}'", other))),
        }
    }
}

/// Declared state mutability of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// Reads nothing
    Pure,
    /// Reads state
    View,
    /// Writes state
    Nonpayable,
    /// Writes state and accepts value
    Payable,
}

/// One input or output parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    ty: String,
    descriptor: TypeDescriptor,
    indexed: bool,
}

impl Param {
    /// Parse a parameter from its name and literal declared type
    pub fn new(name: impl Into<String>, ty: &str) -> Result<Self, AbiError> {
        let ty = ty.trim();
        Ok(Self {
            name: name.into(),
            ty: ty.to_string(),
            descriptor: TypeDescriptor::parse(ty)?,
            indexed: false,
        })
    }

    /// Field name, empty if unnamed
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type string as written in the interface document
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Parsed type
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Event topic parameter
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }
}

/// A parsed interface member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    name: String,
    kind: MemberKind,
    inputs: Vec<Param>,
    outputs: Vec<Param>,
    state_mutability: Option<StateMutability>,
    anonymous: bool,
}

impl MemberDescriptor {
    /// Member name; empty for constructors, fallback and receive
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member kind
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Input parameters in declaration order
    pub fn inputs(&self) -> &[Param] {
        &self.inputs
    }

    /// Output parameters in declaration order
    pub fn outputs(&self) -> &[Param] {
        &self.outputs
    }

    /// Parsed input types
    pub fn input_types(&self) -> Vec<TypeDescriptor> {
        self.inputs.iter().map(|p| p.descriptor).collect()
    }

    /// Parsed output types
    pub fn output_types(&self) -> Vec<TypeDescriptor> {
        self.outputs.iter().map(|p| p.descriptor).collect()
    }

    /// Declared mutability, if any
    pub fn state_mutability(&self) -> Option<StateMutability> {
        self.state_mutability
    }

    /// Whether calling this member cannot change state.
    ///
    /// Honors the legacy `constant` flag for documents without
    /// `stateMutability`.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self.state_mutability,
            Some(StateMutability::View | StateMutability::Pure)
        )
    }

    /// Anonymous event (no signature topic)
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Canonical signature `name(type1,type2,...)` from the literal types
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.inputs.iter().map(|p| p.ty.as_str()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// Keccak-256 function selector
    pub fn selector(&self) -> [u8; 4] {
        Keccak256Hasher.selector(&self.signature())
    }

    /// Keccak-256 of the signature, the first topic of a non-anonymous event
    pub fn topic(&self) -> Word {
        Keccak256Hasher.hash_signature(&self.signature())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMember {
    #[serde(rename = "type", default)]
    kind: MemberKind,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<RawParam>,
    #[serde(default)]
    outputs: Vec<RawParam>,
    #[serde(default)]
    state_mutability: Option<StateMutability>,
    #[serde(default)]
    anonymous: bool,
    #[serde(default)]
    constant: bool,
    #[serde(default)]
    payable: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    indexed: bool,
}

impl TryFrom<RawParam> for Param {
    type Error = AbiError;

    fn try_from(raw: RawParam) -> Result<Self, Self::Error> {
        let mut param = Param::new(raw.name, &raw.ty)?;
        param.indexed = raw.indexed;
        Ok(param)
    }
}

impl TryFrom<RawMember> for MemberDescriptor {
    type Error = AbiError;

    fn try_from(raw: RawMember) -> Result<Self, Self::Error> {
        let state_mutability = raw.state_mutability.or(match (raw.constant, raw.payable) {
            (true, _) => Some(StateMutability::View),
            (false, true) => Some(StateMutability::Payable),
            _ => None,
        });

        Ok(Self {
            name: raw.name,
            kind: raw.kind,
            inputs: raw
                .inputs
                .into_iter()
                .map(Param::try_from)
                .collect::<Result<_, _>>()?,
            outputs: raw
                .outputs
                .into_iter()
                .map(Param::try_from)
                .collect::<Result<_, _>>()?,
            state_mutability,
            anonymous: raw.anonymous,
        })
    }
}
