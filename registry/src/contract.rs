//! Logical contract identities.

use camp_types::Address;
use serde::{Deserialize, Serialize};

/// The payer contract: pays USDC immediately or registers a debt.
pub const PAYER: &str = "payer";
/// The token buyer, topped up with ETH to keep the payer funded.
pub const TOKEN_BUYER: &str = "token-buyer";
/// Wrapped ether.
pub const WETH_TOKEN: &str = "weth-token";
/// USD Coin.
pub const USDC_TOKEN: &str = "usdc-token";
/// Factory deploying vesting stream contracts.
pub const STREAM_FACTORY: &str = "stream-factory";

/// A contract known to the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Logical name, e.g. `"payer"` or `"weth-token"`.
    pub identifier: String,
    pub address: Address,
    /// Token symbol of an ERC-20 contract, e.g. `"WETH"` or `"DAI"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Contract {
    pub fn new(identifier: impl Into<String>, address: Address) -> Self {
        Self {
            identifier: identifier.into(),
            address,
            token: None,
        }
    }

    pub fn token(identifier: impl Into<String>, address: Address, token: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            address,
            token: Some(token.into()),
        }
    }
}
