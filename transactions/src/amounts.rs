//! Per-currency totals of what a proposal spends.

use camp_types::{Currency, CurrencyAmount, U512};

use crate::typed::TypedTransaction;

/// Sum decoded transactions into `[eth, weth, usdc]` totals, dropping zero totals.
///
/// Payer top-ups and WETH deposits move ETH between the DAO's own plumbing
/// contracts, so they do not count as ETH spent. Totals are `U512`: a batch
/// would need 2^256 maximal values to overflow.
pub fn extract_amounts(transactions: &[TypedTransaction]) -> Vec<CurrencyAmount> {
    let mut eth = U512::ZERO;
    let mut weth = U512::ZERO;
    let mut usdc = U512::ZERO;

    for tx in transactions {
        match tx {
            TypedTransaction::PayerTopUp { .. } | TypedTransaction::WethDeposit { .. } => {}
            _ => {
                if let Some(value) = tx.value() {
                    eth += U512::from(value);
                }
            }
        }
        if let Some(amount) = tx.weth_amount() {
            weth += U512::from(amount);
        }
        if let Some(amount) = tx.usdc_amount() {
            usdc += U512::from(amount);
        }
    }

    [
        CurrencyAmount::total(Currency::Eth, eth),
        CurrencyAmount::total(Currency::Weth, weth),
        CurrencyAmount::total(Currency::Usdc, usdc),
    ]
    .into_iter()
    .filter(|total| !total.amount.is_zero())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camp_types::{Address, U256};

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn plumbing_is_excluded_from_eth() {
        let txs = vec![
            TypedTransaction::PayerTopUp {
                target: addr(1),
                value: U256::from(5u64),
            },
            TypedTransaction::WethDeposit {
                value: U256::from(3u64),
            },
            TypedTransaction::Transfer {
                target: addr(2),
                value: U256::from(2u64),
            },
        ];
        assert_eq!(
            extract_amounts(&txs),
            vec![CurrencyAmount::new(Currency::Eth, U256::from(2u64))]
        );
    }

    #[test]
    fn zero_totals_are_omitted() {
        let txs = vec![TypedTransaction::WethTransfer {
            receiver_address: addr(1),
            weth_amount: U256::from(7u64),
        }];
        let totals = extract_amounts(&txs);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].currency, Currency::Weth);
        assert!(totals.iter().all(|t| t.currency != Currency::Usdc));
    }

    #[test]
    fn output_order_is_fixed() {
        let txs = vec![
            TypedTransaction::UsdcStreamFundingViaPayer {
                receiver_address: addr(1),
                usdc_amount: U256::from(10u64),
            },
            TypedTransaction::WethApproval {
                receiver_address: addr(2),
                weth_amount: U256::from(4u64),
            },
            TypedTransaction::PayableFunctionCall {
                target: addr(3),
                function_name: "buy".into(),
                function_inputs: vec![],
                value: U256::from(1u64),
            },
            TypedTransaction::UsdcTransferViaPayer {
                receiver_address: addr(4),
                usdc_amount: U256::from(5u64),
            },
        ];
        let currencies: Vec<_> = extract_amounts(&txs).iter().map(|t| t.currency).collect();
        assert_eq!(currencies, Currency::ALL.to_vec());
        assert_eq!(extract_amounts(&txs)[2].amount, U512::from(15u64));
    }

    #[test]
    fn unparsed_value_counts_as_eth() {
        let txs = vec![
            TypedTransaction::UnparsedFunctionCall {
                target: addr(1),
                calldata: vec![0xde, 0xad].into(),
                signature: Some("foo(uint256)".into()),
                value: Some(U256::from(8u64)),
                error: None,
            },
            TypedTransaction::UnparsedPayableFunctionCall {
                target: addr(2),
                calldata: vec![0x01].into(),
                value: U256::from(1u64),
            },
        ];
        assert_eq!(
            extract_amounts(&txs),
            vec![CurrencyAmount::new(Currency::Eth, U256::from(9u64))]
        );
    }

    #[test]
    fn totals_do_not_clamp_at_u256() {
        let txs = vec![
            TypedTransaction::Transfer {
                target: addr(1),
                value: U256::MAX,
            },
            TypedTransaction::Transfer {
                target: addr(2),
                value: U256::MAX,
            },
            TypedTransaction::WethTransfer {
                receiver_address: addr(3),
                weth_amount: U256::MAX,
            },
        ];
        let totals = extract_amounts(&txs);
        assert_eq!(totals[0].amount, U512::from(U256::MAX) * U512::from(2u64));
        assert_eq!(totals[1].amount, U512::from(U256::MAX));
    }

    #[test]
    fn empty_batch_has_no_totals() {
        assert!(extract_amounts(&[]).is_empty());
    }
}
