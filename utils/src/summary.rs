//! One-line renderings of proposal amounts.

use camp_types::CurrencyAmount;

/// `"1.5 ETH + 100 USDC"`, or `"nothing"` for an empty list.
pub fn format_amounts(amounts: &[CurrencyAmount]) -> String {
    if amounts.is_empty() {
        return "nothing".to_string();
    }
    amounts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use camp_types::{Currency, U256};

    #[test]
    fn joins_totals_in_order() {
        let amounts = [
            CurrencyAmount::new(Currency::Eth, U256::from(1_500_000_000_000_000_000u128)),
            CurrencyAmount::new(Currency::Usdc, U256::from(100_000_000u64)),
        ];
        assert_eq!(format_amounts(&amounts), "1.5 ETH + 100 USDC");
    }

    #[test]
    fn empty_list_reads_as_nothing() {
        assert_eq!(format_amounts(&[]), "nothing");
    }
}
