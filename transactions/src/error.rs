use camp_registry::RegistryError;
use camp_types::{Currency, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Types(#[from] TypesError),

    #[error("invalid function signature {signature:?}: {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("calldata does not match the parameter list: {0}")]
    CalldataDecoding(String),

    #[error("argument {index} is not a valid {ty}: {reason}")]
    InvalidArgument {
        index: usize,
        ty: String,
        reason: String,
    },

    #[error("function {function} takes {expected} arguments, got {actual}")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("input {index} of {function} does not hold a {ty} value")]
    InputTypeMismatch {
        function: String,
        index: usize,
        ty: String,
    },

    #[error("payable function {function} needs an ETH value")]
    MissingEthValue { function: String },

    #[error("currency {currency} is not supported for {action} actions")]
    UnsupportedCurrency {
        action: &'static str,
        currency: Currency,
    },

    #[error("unknown transaction type {0:?}")]
    UnknownTransactionType(String),

    #[error("parallel arrays differ in length: {targets} targets, {values} values, {signatures} signatures, {calldatas} calldatas")]
    MismatchedBatch {
        targets: usize,
        values: usize,
        signatures: usize,
        calldatas: usize,
    },
}
