//! Proposal transaction codec.
//!
//! Translates between the raw form a governance contract stores (parallel arrays of
//! targets, values, signatures and calldata) and a closed set of typed transactions:
//! - **Decoder** ([`decode`]): raw batch → typed transactions, batch-context aware
//! - **Encoder** ([`encode`]): typed transactions → raw batch, the exact inverse
//! - **Action expander** ([`action_transactions`]): user intent → typed transactions
//! - **Amount aggregator** ([`extract_amounts`]): typed transactions → per-currency totals
//!
//! Contract addresses come from a [`camp_registry::ContractRegistry`]. All entry points
//! are pure functions of their input and the registry.

pub mod abi;
pub mod action;
pub mod amounts;
pub mod decode;
pub mod encode;
pub mod error;
pub mod raw;
pub mod signatures;
pub mod typed;

pub use action::{action_transactions, expand_action, Action};
pub use amounts::extract_amounts;
pub use decode::{decode, DecodeContext, KnownContracts};
pub use encode::encode;
pub use error::TransactionError;
pub use raw::{RawTransaction, RawTransactions};
pub use typed::{DecodeFailure, FunctionInput, StreamTransaction, TransactionKind, TypedTransaction};
