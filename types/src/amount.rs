//! Currencies and base-unit amounts.
//!
//! Amounts are always carried as `U256` base units (wei for ETH/WETH, 10^-6 for USDC)
//! to avoid floating-point errors. Decimal strings such as `"12.5"` only exist at the
//! edges, converted with [`Currency::parse_amount`] and [`Currency::format_amount`].
//! Totals over many amounts are `U512`, so summing on-chain values never wraps.

use alloy_primitives::utils::{parse_units, ParseUnits};
use alloy_primitives::{U256, U512};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A currency a proposal can spend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Eth,
    Weth,
    Usdc,
}

impl Currency {
    /// All currencies, in the order amount summaries list them.
    pub const ALL: [Self; 3] = [Self::Eth, Self::Weth, Self::Usdc];

    /// Decimal precision of one whole unit.
    pub fn decimals(&self) -> u8 {
        match self {
            Self::Eth | Self::Weth => 18,
            Self::Usdc => 6,
        }
    }

    /// Lowercase name (`"eth"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eth => "eth",
            Self::Weth => "weth",
            Self::Usdc => "usdc",
        }
    }

    /// Token symbol (`"ETH"`).
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Weth => "WETH",
            Self::Usdc => "USDC",
        }
    }

    /// Registry identifier of the ERC-20 contract backing this currency.
    ///
    /// Native ETH has no token contract.
    pub fn token_identifier(&self) -> Option<&'static str> {
        match self {
            Self::Eth => None,
            Self::Weth => Some("weth-token"),
            Self::Usdc => Some("usdc-token"),
        }
    }

    /// Parse a decimal string (`"100.5"`) into base units at this currency's precision.
    ///
    /// More significant fractional digits than the currency has decimals is an
    /// error rather than a silent truncation.
    pub fn parse_amount(&self, amount: &str) -> Result<U256, TypesError> {
        let trimmed = amount.trim();
        let invalid = |reason: String| TypesError::InvalidAmount {
            amount: amount.to_string(),
            currency: self.as_str().to_string(),
            reason,
        };

        if let Some((_, fraction)) = trimmed.split_once('.') {
            let significant = fraction.trim_end_matches('0').len();
            if significant > usize::from(self.decimals()) {
                return Err(invalid(format!(
                    "{significant} fractional digits, at most {} allowed",
                    self.decimals()
                )));
            }
        }

        match parse_units(trimmed, self.decimals()).map_err(|e| invalid(e.to_string()))? {
            ParseUnits::U256(value) => Ok(value),
            ParseUnits::I256(_) => Err(TypesError::NegativeAmount(amount.to_string())),
        }
    }

    /// Render base units as a decimal string with trailing zeros removed.
    pub fn format_amount(&self, amount: U256) -> String {
        self.format_digits(&amount.to_string())
    }

    fn format_digits(&self, digits: &str) -> String {
        let decimals = usize::from(self.decimals());
        let padded = format!("{digits:0>width$}", width = decimals + 1);
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = TypesError;

    /// Case-insensitive, so both `"weth"` and the symbol `"WETH"` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eth" => Ok(Self::Eth),
            "weth" => Ok(Self::Weth),
            "usdc" => Ok(Self::Usdc),
            _ => Err(TypesError::UnknownCurrency(s.to_string())),
        }
    }
}

/// A total spent in one currency, in base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub currency: Currency,
    pub amount: U512,
}

impl CurrencyAmount {
    pub fn new(currency: Currency, amount: U256) -> Self {
        Self::total(currency, U512::from(amount))
    }

    pub fn total(currency: Currency, amount: U512) -> Self {
        Self { currency, amount }
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.currency.format_digits(&self.amount.to_string()),
            self.currency.symbol()
        )
    }
}
