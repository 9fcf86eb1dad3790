//! Typed transactions: the semantic form of a raw governance action.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use camp_types::{Address, Bytes, Timestamp, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::abi;
use crate::error::TransactionError;

/// The typed form of one governance action.
///
/// Serialized with an internal `"type"` tag using the kebab-case variant names
/// (`"weth-stream-funding"`, `"unparsed-function-call"`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TypedTransaction {
    /// Plain ETH transfer.
    Transfer { target: Address, value: U256 },
    /// ETH sent to the token buyer to keep the payer funded.
    PayerTopUp { target: Address, value: U256 },
    /// USDC paid (or owed) through the payer contract.
    UsdcTransferViaPayer {
        receiver_address: Address,
        usdc_amount: U256,
    },
    /// USDC routed through the payer into a stream created in the same batch.
    UsdcStreamFundingViaPayer {
        receiver_address: Address,
        usdc_amount: U256,
    },
    /// Wrap ETH into WETH.
    WethDeposit { value: U256 },
    WethTransfer {
        receiver_address: Address,
        weth_amount: U256,
    },
    /// WETH sent to a stream created in the same batch.
    WethStreamFunding {
        receiver_address: Address,
        weth_amount: U256,
    },
    WethApproval {
        receiver_address: Address,
        weth_amount: U256,
    },
    /// Creation of a vesting stream through the stream factory.
    Stream(StreamTransaction),
    FunctionCall {
        target: Address,
        function_name: String,
        function_inputs: Vec<FunctionInput>,
    },
    PayableFunctionCall {
        target: Address,
        function_name: String,
        function_inputs: Vec<FunctionInput>,
        value: U256,
    },
    /// A call whose signature or calldata could not be decoded.
    UnparsedFunctionCall {
        target: Address,
        calldata: Bytes,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signature: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<U256>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<DecodeFailure>,
    },
    /// Raw calldata without a signature, sent with ETH.
    UnparsedPayableFunctionCall {
        target: Address,
        calldata: Bytes,
        value: U256,
    },
}

/// Arguments of a `createStream` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamTransaction {
    pub receiver_address: Address,
    /// Registry symbol of the token contract, when the registry knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Amount in the token's base units.
    pub token_amount: U256,
    pub token_contract_address: Address,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    /// Address the factory will deploy the stream to.
    pub stream_contract_address: Address,
}

/// Why a call degraded to `unparsed-function-call`.
///
/// An unparseable signature also reports `calldata-decoding-failed`: without a
/// signature there is nothing to decode the calldata against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodeFailure {
    CalldataDecodingFailed,
}

impl DecodeFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CalldataDecodingFailed => "calldata-decoding-failed",
        }
    }
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One argument of a decoded call, carrying its own ABI type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FunctionInputRepr", into = "FunctionInputRepr")]
pub struct FunctionInput {
    pub ty: DynSolType,
    pub value: DynSolValue,
}

impl FunctionInput {
    pub fn new(ty: DynSolType, value: DynSolValue) -> Self {
        Self { ty, value }
    }

    /// Whether `value` is actually a `ty`.
    pub fn is_well_typed(&self) -> bool {
        self.ty.matches(&self.value)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct FunctionInputRepr {
    #[serde(rename = "type")]
    ty: String,
    value: String,
}

impl From<FunctionInput> for FunctionInputRepr {
    fn from(input: FunctionInput) -> Self {
        Self {
            ty: input.ty.sol_type_name().into_owned(),
            value: abi::format_value(&input.value),
        }
    }
}

impl TryFrom<FunctionInputRepr> for FunctionInput {
    type Error = TransactionError;

    fn try_from(repr: FunctionInputRepr) -> Result<Self, Self::Error> {
        let ty = DynSolType::parse(&repr.ty).map_err(|e| TransactionError::InvalidArgument {
            index: 0,
            ty: repr.ty.clone(),
            reason: e.to_string(),
        })?;
        let value = abi::coerce_value(&ty, 0, &repr.value)?;
        Ok(Self { ty, value })
    }
}

/// The tag of a [`TypedTransaction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Transfer,
    PayerTopUp,
    UsdcTransferViaPayer,
    UsdcStreamFundingViaPayer,
    WethDeposit,
    WethTransfer,
    WethStreamFunding,
    WethApproval,
    Stream,
    FunctionCall,
    PayableFunctionCall,
    UnparsedFunctionCall,
    UnparsedPayableFunctionCall,
}

impl TransactionKind {
    pub const ALL: [Self; 13] = [
        Self::Transfer,
        Self::PayerTopUp,
        Self::UsdcTransferViaPayer,
        Self::UsdcStreamFundingViaPayer,
        Self::WethDeposit,
        Self::WethTransfer,
        Self::WethStreamFunding,
        Self::WethApproval,
        Self::Stream,
        Self::FunctionCall,
        Self::PayableFunctionCall,
        Self::UnparsedFunctionCall,
        Self::UnparsedPayableFunctionCall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::PayerTopUp => "payer-top-up",
            Self::UsdcTransferViaPayer => "usdc-transfer-via-payer",
            Self::UsdcStreamFundingViaPayer => "usdc-stream-funding-via-payer",
            Self::WethDeposit => "weth-deposit",
            Self::WethTransfer => "weth-transfer",
            Self::WethStreamFunding => "weth-stream-funding",
            Self::WethApproval => "weth-approval",
            Self::Stream => "stream",
            Self::FunctionCall => "function-call",
            Self::PayableFunctionCall => "payable-function-call",
            Self::UnparsedFunctionCall => "unparsed-function-call",
            Self::UnparsedPayableFunctionCall => "unparsed-payable-function-call",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TransactionError::UnknownTransactionType(s.to_string()))
    }
}

impl TypedTransaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Transfer { .. } => TransactionKind::Transfer,
            Self::PayerTopUp { .. } => TransactionKind::PayerTopUp,
            Self::UsdcTransferViaPayer { .. } => TransactionKind::UsdcTransferViaPayer,
            Self::UsdcStreamFundingViaPayer { .. } => TransactionKind::UsdcStreamFundingViaPayer,
            Self::WethDeposit { .. } => TransactionKind::WethDeposit,
            Self::WethTransfer { .. } => TransactionKind::WethTransfer,
            Self::WethStreamFunding { .. } => TransactionKind::WethStreamFunding,
            Self::WethApproval { .. } => TransactionKind::WethApproval,
            Self::Stream(_) => TransactionKind::Stream,
            Self::FunctionCall { .. } => TransactionKind::FunctionCall,
            Self::PayableFunctionCall { .. } => TransactionKind::PayableFunctionCall,
            Self::UnparsedFunctionCall { .. } => TransactionKind::UnparsedFunctionCall,
            Self::UnparsedPayableFunctionCall { .. } => {
                TransactionKind::UnparsedPayableFunctionCall
            }
        }
    }

    /// ETH attached to the action, for the variants that carry one.
    pub fn value(&self) -> Option<U256> {
        match self {
            Self::Transfer { value, .. }
            | Self::PayerTopUp { value, .. }
            | Self::WethDeposit { value }
            | Self::PayableFunctionCall { value, .. }
            | Self::UnparsedPayableFunctionCall { value, .. } => Some(*value),
            Self::UnparsedFunctionCall { value, .. } => *value,
            Self::UsdcTransferViaPayer { .. }
            | Self::UsdcStreamFundingViaPayer { .. }
            | Self::WethTransfer { .. }
            | Self::WethStreamFunding { .. }
            | Self::WethApproval { .. }
            | Self::Stream(_)
            | Self::FunctionCall { .. } => None,
        }
    }

    /// WETH moved by the action.
    pub fn weth_amount(&self) -> Option<U256> {
        match self {
            Self::WethTransfer { weth_amount, .. }
            | Self::WethStreamFunding { weth_amount, .. }
            | Self::WethApproval { weth_amount, .. } => Some(*weth_amount),
            _ => None,
        }
    }

    /// USDC paid through the payer.
    pub fn usdc_amount(&self) -> Option<U256> {
        match self {
            Self::UsdcTransferViaPayer { usdc_amount, .. }
            | Self::UsdcStreamFundingViaPayer { usdc_amount, .. } => Some(*usdc_amount),
            _ => None,
        }
    }

    /// The diagnostic attached by the decoder, if any.
    pub fn decode_failure(&self) -> Option<DecodeFailure> {
        match self {
            Self::UnparsedFunctionCall { error, .. } => *error,
            _ => None,
        }
    }
}
