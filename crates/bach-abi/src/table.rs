//! Descriptor table built from an interface document

use std::collections::HashMap;
use std::fmt;

use bach_crypto::{Keccak256Hasher, SignatureHasher};
use bach_primitives::decode_hex;

use crate::calldata::CallData;
use crate::interface::{MemberDescriptor, MemberKind, RawMember};
use crate::layout::decode_params;
use crate::types::TypeDescriptor;
use crate::value::Value;
use crate::AbiError;

/// Parsed, immutable index of a contract's members.
///
/// A member is reachable under its name and under its kind keyword, so the
/// constructor is found as `("constructor", 0)` and overloads of `transfer`
/// as `("transfer", 0)`, `("transfer", 1)` in declaration order.
pub struct DescriptorTable {
    members: Vec<MemberDescriptor>,
    index: HashMap<(MemberKind, String), Vec<usize>>,
    hasher: Box<dyn SignatureHasher>,
}

impl fmt::Debug for DescriptorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorTable")
            .field("members", &self.members.len())
            .finish()
    }
}

impl DescriptorTable {
    /// Parse an interface document hashing selectors with Keccak-256
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        Self::from_json_with_hasher(json, Box::new(Keccak256Hasher))
    }

    /// Parse an interface document with a custom signature hasher
    pub fn from_json_with_hasher(
        json: &str,
        hasher: Box<dyn SignatureHasher>,
    ) -> Result<Self, AbiError> {
        let raw: Vec<RawMember> = serde_json::from_str(json)?;
        let members = raw
            .into_iter()
            .map(MemberDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(members, hasher))
    }

    fn new(members: Vec<MemberDescriptor>, hasher: Box<dyn SignatureHasher>) -> Self {
        let mut index: HashMap<(MemberKind, String), Vec<usize>> = HashMap::new();
        for (position, member) in members.iter().enumerate() {
            let keyword = member.kind().keyword();
            index
                .entry((member.kind(), keyword.to_string()))
                .or_default()
                .push(position);
            if !member.name().is_empty() && member.name() != keyword {
                index
                    .entry((member.kind(), member.name().to_string()))
                    .or_default()
                    .push(position);
            }
        }

        tracing::debug!(members = members.len(), "loaded interface");
        Self {
            members,
            index,
            hasher,
        }
    }

    /// All members in declaration order
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Look up a member by kind, name (or kind keyword) and occurrence index
    pub fn member(
        &self,
        kind: MemberKind,
        name: &str,
        index: usize,
    ) -> Result<&MemberDescriptor, AbiError> {
        self.index
            .get(&(kind, name.to_string()))
            .and_then(|positions| positions.get(index))
            .map(|&position| &self.members[position])
            .ok_or_else(|| AbiError::UnknownMember {
                kind: kind.to_string(),
                name: name.to_string(),
                index,
            })
    }

    /// Look up a function
    pub fn function(&self, name: &str, index: usize) -> Result<&MemberDescriptor, AbiError> {
        self.member(MemberKind::Function, name, index)
    }

    /// Look up an event
    pub fn event(&self, name: &str, index: usize) -> Result<&MemberDescriptor, AbiError> {
        self.member(MemberKind::Event, name, index)
    }

    /// Encode a call to a function
    pub fn encode_function(
        &self,
        name: &str,
        index: usize,
        args: &[Value],
    ) -> Result<CallData, AbiError> {
        let member = self.function(name, index)?;
        tracing::debug!(signature = %member.signature(), args = args.len(), "encode function");
        CallData::function(
            self.hasher.as_ref(),
            &member.signature(),
            &member.input_types(),
            args,
        )
    }

    /// Encode constructor arguments and append them to the creation bytecode.
    ///
    /// An interface without a constructor accepts an empty argument list.
    pub fn encode_constructor(&self, bytecode: &str, args: &[Value]) -> Result<String, AbiError> {
        let types = match self.member(MemberKind::Constructor, "constructor", 0) {
            Ok(member) => member.input_types(),
            Err(_) if args.is_empty() => Vec::new(),
            Err(e) => return Err(e),
        };
        tracing::debug!(args = args.len(), "encode constructor");
        Ok(CallData::constructor(&types, args)?.with_bytecode(bytecode))
    }

    /// Coerce JSON arguments to the inputs of a member
    pub fn values_from_json(
        &self,
        member: &MemberDescriptor,
        args: &[serde_json::Value],
    ) -> Result<Vec<Value>, AbiError> {
        if member.inputs().len() != args.len() {
            return Err(AbiError::Arity {
                expected: member.inputs().len(),
                got: args.len(),
            });
        }
        member
            .inputs()
            .iter()
            .zip(args)
            .map(|(param, arg)| Value::from_json(param.descriptor(), arg))
            .collect()
    }

    /// Decode the return payload of a function using its declared outputs
    pub fn decode_output(&self, name: &str, index: usize, hex: &str) -> Result<Vec<Value>, AbiError> {
        let member = self.function(name, index)?;
        tracing::trace!(signature = %member.signature(), "decode output");
        decode_hex_params(&member.output_types(), hex)
    }

    /// Decode the non-indexed inputs of an event from a log data payload
    pub fn decode_event(&self, name: &str, index: usize, hex: &str) -> Result<Vec<Value>, AbiError> {
        let member = self.event(name, index)?;
        let types: Vec<TypeDescriptor> = member
            .inputs()
            .iter()
            .filter(|p| !p.is_indexed())
            .map(|p| *p.descriptor())
            .collect();
        tracing::trace!(signature = %member.signature(), "decode event");
        decode_hex_params(&types, hex)
    }
}

fn decode_hex_params(types: &[TypeDescriptor], hex: &str) -> Result<Vec<Value>, AbiError> {
    let data = decode_hex(hex)?;
    decode_params(types, &data)
}
