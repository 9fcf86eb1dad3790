//! ABI seam: signature parsing, parameter encoding/decoding and value rendering.
//!
//! Governance calldata carries the ABI-encoded arguments only; the function selector
//! lives in the separate signature string. Everything here therefore works on bare
//! parameter lists, never on selector-prefixed calldata.

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::{Function, StateMutability};
use alloy_primitives::{hex, Bytes};

use crate::error::TransactionError;

/// A human-readable function signature, parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedSignature {
    pub name: String,
    pub inputs: Vec<DynSolType>,
    pub state_mutability: StateMutability,
}

impl ParsedSignature {
    pub fn is_payable(&self) -> bool {
        self.state_mutability == StateMutability::Payable
    }
}

/// Parse `transfer(address,uint256)` or `function deposit() payable`.
///
/// Parameter names are accepted and dropped.
pub fn parse_signature(signature: &str) -> Result<ParsedSignature, TransactionError> {
    let invalid = |reason: String| TransactionError::InvalidSignature {
        signature: signature.to_string(),
        reason,
    };

    let function = Function::parse(signature.trim()).map_err(|e| invalid(e.to_string()))?;
    let inputs = function
        .inputs
        .iter()
        .map(|param| param.resolve())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(e.to_string()))?;

    Ok(ParsedSignature {
        name: function.name,
        inputs,
        state_mutability: function.state_mutability,
    })
}

/// Decode a bare parameter list.
pub fn decode_params(
    types: &[DynSolType],
    calldata: &[u8],
) -> Result<Vec<DynSolValue>, TransactionError> {
    let decoded = DynSolType::Tuple(types.to_vec())
        .abi_decode_params(calldata)
        .map_err(|e| TransactionError::CalldataDecoding(e.to_string()))?;
    match decoded {
        DynSolValue::Tuple(values) => Ok(values),
        other => Ok(vec![other]),
    }
}

/// Encode values as a bare parameter list. No inputs encode to empty calldata.
pub fn encode_params(values: &[DynSolValue]) -> Bytes {
    if values.is_empty() {
        return Bytes::new();
    }
    DynSolValue::Tuple(values.to_vec()).abi_encode_params().into()
}

/// Render `name(type,type)` in canonical form.
pub fn format_signature(name: &str, types: &[DynSolType]) -> String {
    let params: Vec<_> = types.iter().map(|ty| ty.sol_type_name()).collect();
    format!("{}({})", name, params.join(","))
}

/// Coerce a human-entered string into a value of the given type.
pub fn coerce_value(
    ty: &DynSolType,
    index: usize,
    raw: &str,
) -> Result<DynSolValue, TransactionError> {
    ty.coerce_str(raw.trim())
        .map_err(|e| TransactionError::InvalidArgument {
            index,
            ty: ty.sol_type_name().into_owned(),
            reason: e.to_string(),
        })
}

/// Render a value the way [`coerce_value`] reads it back.
pub fn format_value(value: &DynSolValue) -> String {
    format_value_inner(value, false)
}

fn format_value_inner(value: &DynSolValue, nested: bool) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::Address(address) => address.to_checksum(None),
        DynSolValue::Function(function) => hex::encode_prefixed(function.as_slice()),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::String(s) => format_string(s, nested),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            format!("[{}]", join_values(items))
        }
        DynSolValue::Tuple(items) => format!("({})", join_values(items)),
        #[allow(unreachable_patterns)]
        other => format!("{other:?}"),
    }
}

/// The coercion parser has no escapes: a quoted string runs to the next matching
/// quote. Quote with whichever of `"` and `'` the string does not contain.
fn format_string(s: &str, nested: bool) -> String {
    let needs_quotes = nested || s.trim() != s || s.starts_with(['"', '\'']);
    if !needs_quotes {
        return s.to_string();
    }
    let quote = if s.contains('"') && !s.contains('\'') { '\'' } else { '"' };
    format!("{quote}{s}{quote}")
}

fn join_values(items: &[DynSolValue]) -> String {
    items
        .iter()
        .map(|item| format_value_inner(item, true))
        .collect::<Vec<_>>()
        .join(", ")
}
