//! Error type for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid {currency} amount {amount:?}: {reason}")]
    InvalidAmount {
        amount: String,
        currency: String,
        reason: String,
    },

    #[error("amount must not be negative: {0:?}")]
    NegativeAmount(String),

    #[error("unknown currency: {0:?}")]
    UnknownCurrency(String),

    #[error("invalid chain id: {0:?}")]
    InvalidChainId(String),
}
