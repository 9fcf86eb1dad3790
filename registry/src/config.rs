//! Registry configuration with TOML file support.
//!
//! ```toml
//! include_builtin = true
//!
//! [[networks]]
//! chain_id = 11155111
//!
//! [[networks.contracts]]
//! identifier = "weth-token"
//! address = "0xfff9976782d46cc05630d1f6ebab18b2324d6b14"
//! token = "WETH"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use camp_types::ChainId;

use crate::contract::Contract;
use crate::error::RegistryError;
use crate::registry::NetworkRegistry;

/// Configuration for a [`NetworkRegistry`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Start from the built-in mainnet table before applying `networks`.
    #[serde(default = "default_true")]
    pub include_builtin: bool,

    /// Additional networks, or overrides for built-in contracts.
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,
}

/// Contracts deployed on one chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: ChainId,

    #[serde(default)]
    pub contracts: Vec<Contract>,
}

fn default_true() -> bool {
    true
}

impl RegistryConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RegistryError> {
        toml::from_str(s).map_err(|e| RegistryError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, RegistryError> {
        toml::to_string_pretty(self).map_err(|e| RegistryError::Config(e.to_string()))
    }

    /// Build the registry this configuration describes.
    pub fn build(&self) -> NetworkRegistry {
        let mut registry = if self.include_builtin {
            NetworkRegistry::mainnet()
        } else {
            NetworkRegistry::new()
        };
        for network in &self.networks {
            for contract in &network.contracts {
                registry.register(network.chain_id, contract.clone());
            }
            tracing::debug!(
                chain = %network.chain_id,
                contracts = network.contracts.len(),
                "loaded network from config"
            );
        }
        registry
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_builtin: default_true(),
            networks: Vec::new(),
        }
    }
}
