//! Contract registry for the proposal transaction codec.
//!
//! Resolves the logical contracts a proposal interacts with (`payer`, `token-buyer`,
//! `weth-token`, `usdc-token`, `stream-factory`) to addresses on a given chain, and
//! maps addresses back to their identity. Addresses are 20-byte values, so every
//! comparison is case-insensitive with respect to their hex spelling.

pub mod config;
pub mod contract;
pub mod error;
pub mod mainnet;
pub mod registry;

pub use config::{NetworkConfig, RegistryConfig};
pub use contract::Contract;
pub use error::RegistryError;
pub use registry::{ContractRegistry, NetworkRegistry};
