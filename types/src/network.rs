//! Chain identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Identifies which EVM chain a proposal targets (EIP-155 chain id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const MAINNET: Self = Self(1);
    /// The Sepolia test network.
    pub const SEPOLIA: Self = Self(11_155_111);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Human-readable name, for the chains we know by name.
    pub fn name(&self) -> Option<&'static str> {
        match self.0 {
            1 => Some("mainnet"),
            11_155_111 => Some("sepolia"),
            _ => None,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ChainId {
    type Err = TypesError;

    /// Accepts either a known chain name or a decimal chain id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" => Ok(Self::MAINNET),
            "sepolia" => Ok(Self::SEPOLIA),
            other => other
                .parse::<u64>()
                .map(Self)
                .map_err(|_| TypesError::InvalidChainId(s.to_string())),
        }
    }
}
