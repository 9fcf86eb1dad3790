//! Fundamental types for the proposal transaction codec.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! chain identifiers, currencies and their base-unit amounts, and timestamps.
//! EVM primitives (`Address`, `U256`, `Bytes`) are re-exported from `alloy-primitives`.

pub mod amount;
pub mod error;
pub mod network;
pub mod time;

pub use alloy_primitives::{Address, Bytes, U256, U512};
pub use amount::{Currency, CurrencyAmount};
pub use error::TypesError;
pub use network::ChainId;
pub use time::Timestamp;
