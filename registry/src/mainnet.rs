//! Built-in Ethereum mainnet deployment.

use alloy_primitives::address;
use camp_types::Currency;

use crate::contract::{self, Contract};

/// Contracts deployed on Ethereum mainnet.
pub fn contracts() -> Vec<Contract> {
    vec![
        Contract::new(
            contract::PAYER,
            address!("d97bcd9f47cee35c0a9ec1dc40c1269afc9e8e1d"),
        ),
        Contract::new(
            contract::TOKEN_BUYER,
            address!("4f2acdc74f6941390d9b1804fabc3e780388cfe5"),
        ),
        Contract::new(
            contract::STREAM_FACTORY,
            address!("0fd206fc7a7dbcd5661157edcb1ffdd0d02a61ff"),
        ),
        Contract::token(
            contract::WETH_TOKEN,
            address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            Currency::Weth.symbol(),
        ),
        Contract::token(
            contract::USDC_TOKEN,
            address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
            Currency::Usdc.symbol(),
        ),
    ]
}
