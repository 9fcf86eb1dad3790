//! Property-based tests for the codec laws.

use std::collections::HashSet;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use camp_registry::contract::{TOKEN_BUYER, USDC_TOKEN, WETH_TOKEN};
use camp_registry::{ContractRegistry, NetworkRegistry};
use camp_transactions::{
    decode, encode, extract_amounts, FunctionInput, StreamTransaction, TypedTransaction,
};
use camp_types::{Address, Bytes, ChainId, Currency, Timestamp, U256, U512};
use proptest::prelude::*;

const CHAIN: ChainId = ChainId::MAINNET;

fn contract(identifier: &str) -> Address {
    NetworkRegistry::mainnet()
        .resolve_identifier(CHAIN, identifier)
        .unwrap()
        .address
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A small pool so that transfers and predicted stream addresses collide often.
fn pooled_address() -> impl Strategy<Value = Address> {
    (1u8..=4).prop_map(Address::repeat_byte)
}

fn amount() -> impl Strategy<Value = U256> {
    any::<u64>().prop_map(U256::from)
}

fn nonzero_amount() -> impl Strategy<Value = U256> {
    (1..=u64::MAX).prop_map(U256::from)
}

fn calldata() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 1..40).prop_map(Bytes::from)
}

fn function_input() -> impl Strategy<Value = FunctionInput> {
    prop_oneof![
        any::<u128>().prop_map(|n| FunctionInput::new(
            DynSolType::Uint(256),
            DynSolValue::Uint(U256::from(n), 256)
        )),
        any::<bool>().prop_map(|b| FunctionInput::new(DynSolType::Bool, DynSolValue::Bool(b))),
        pooled_address().prop_map(|a| FunctionInput::new(
            DynSolType::Address,
            DynSolValue::Address(a)
        )),
        "[a-z ]{0,16}".prop_map(|s| FunctionInput::new(
            DynSolType::String,
            DynSolValue::String(s)
        )),
    ]
}

fn function_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_map(|suffix| format!("exec{suffix}"))
}

fn stream() -> impl Strategy<Value = StreamTransaction> {
    let token = prop_oneof![
        Just((Some("WETH".to_string()), contract(WETH_TOKEN))),
        Just((Some("USDC".to_string()), contract(USDC_TOKEN))),
        pooled_address().prop_map(|address| (None, address)),
    ];
    (
        pooled_address(),
        token,
        amount(),
        any::<u32>(),
        any::<u32>(),
        pooled_address(),
    )
        .prop_map(
            |(receiver, (token, token_contract), amount, start, end, predicted)| {
                StreamTransaction {
                    receiver_address: receiver,
                    token,
                    token_amount: amount,
                    token_contract_address: token_contract,
                    start_date: Timestamp::from_unix_secs(u64::from(start)),
                    end_date: Timestamp::from_unix_secs(u64::from(end)),
                    stream_contract_address: predicted,
                }
            },
        )
}

/// Every variant except the stream-funding ones, which only arise from batch context.
fn transaction() -> impl Strategy<Value = TypedTransaction> {
    prop_oneof![value_movement(), call()]
}

fn value_movement() -> impl Strategy<Value = TypedTransaction> {
    prop_oneof![
        (pooled_address(), amount())
            .prop_map(|(target, value)| TypedTransaction::Transfer { target, value }),
        amount().prop_map(|value| TypedTransaction::PayerTopUp {
            target: contract(TOKEN_BUYER),
            value
        }),
        (pooled_address(), amount()).prop_map(|(receiver_address, usdc_amount)| {
            TypedTransaction::UsdcTransferViaPayer {
                receiver_address,
                usdc_amount,
            }
        }),
        amount().prop_map(|value| TypedTransaction::WethDeposit { value }),
        (pooled_address(), amount()).prop_map(|(receiver_address, weth_amount)| {
            TypedTransaction::WethTransfer {
                receiver_address,
                weth_amount,
            }
        }),
        (pooled_address(), amount()).prop_map(|(receiver_address, weth_amount)| {
            TypedTransaction::WethApproval {
                receiver_address,
                weth_amount,
            }
        }),
        stream().prop_map(TypedTransaction::Stream),
    ]
}

fn call() -> impl Strategy<Value = TypedTransaction> {
    prop_oneof![
        (
            pooled_address(),
            function_name(),
            prop::collection::vec(function_input(), 0..4)
        )
            .prop_map(|(target, function_name, function_inputs)| {
                TypedTransaction::FunctionCall {
                    target,
                    function_name,
                    function_inputs,
                }
            }),
        (
            pooled_address(),
            function_name(),
            prop::collection::vec(function_input(), 0..4),
            nonzero_amount()
        )
            .prop_map(|(target, function_name, function_inputs, value)| {
                TypedTransaction::PayableFunctionCall {
                    target,
                    function_name,
                    function_inputs,
                    value,
                }
            }),
        (pooled_address(), calldata()).prop_map(|(target, calldata)| {
            TypedTransaction::UnparsedFunctionCall {
                target,
                calldata,
                signature: None,
                value: None,
                error: None,
            }
        }),
        (pooled_address(), calldata(), nonzero_amount()).prop_map(|(target, calldata, value)| {
            TypedTransaction::UnparsedPayableFunctionCall {
                target,
                calldata,
                value,
            }
        }),
    ]
}

/// What the decoder is expected to make of a batch: transfers into a stream
/// created anywhere in the batch become stream funding.
fn normalize(txs: &[TypedTransaction]) -> Vec<TypedTransaction> {
    let predicted: HashSet<Address> = txs
        .iter()
        .filter_map(|tx| match tx {
            TypedTransaction::Stream(stream) => Some(stream.stream_contract_address),
            _ => None,
        })
        .collect();

    txs.iter()
        .map(|tx| match tx {
            TypedTransaction::WethTransfer {
                receiver_address,
                weth_amount,
            } if predicted.contains(receiver_address) => TypedTransaction::WethStreamFunding {
                receiver_address: *receiver_address,
                weth_amount: *weth_amount,
            },
            TypedTransaction::UsdcTransferViaPayer {
                receiver_address,
                usdc_amount,
            } if predicted.contains(receiver_address) => {
                TypedTransaction::UsdcStreamFundingViaPayer {
                    receiver_address: *receiver_address,
                    usdc_amount: *usdc_amount,
                }
            }
            other => other.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn single_transaction_round_trips(tx in transaction()) {
        let registry = NetworkRegistry::mainnet();
        let raw = encode(std::slice::from_ref(&tx), CHAIN, &registry).unwrap();
        prop_assert_eq!(raw.len(), 1);
        let decoded = decode(&raw, CHAIN, &registry).unwrap();
        prop_assert_eq!(decoded, normalize(&[tx]));
    }

    #[test]
    fn batch_round_trips_up_to_stream_funding(txs in prop::collection::vec(transaction(), 0..12)) {
        let registry = NetworkRegistry::mainnet();
        let raw = encode(&txs, CHAIN, &registry).unwrap();
        prop_assert_eq!(raw.len(), txs.len());
        let decoded = decode(&raw, CHAIN, &registry).unwrap();
        prop_assert_eq!(decoded, normalize(&txs));
    }

    #[test]
    fn decoded_batch_re_encodes_to_the_same_raw_batch(txs in prop::collection::vec(transaction(), 0..12)) {
        let registry = NetworkRegistry::mainnet();
        let raw = encode(&txs, CHAIN, &registry).unwrap();
        let decoded = decode(&raw, CHAIN, &registry).unwrap();
        prop_assert_eq!(encode(&decoded, CHAIN, &registry).unwrap(), raw);
    }

    #[test]
    fn arbitrary_raw_calls_never_fail_to_decode(
        target in any::<[u8; 20]>(),
        value in amount(),
        signature in "[a-zA-Z0-9(),\\[\\] ]{0,24}",
        calldata in prop::collection::vec(any::<u8>(), 0..96),
    ) {
        let registry = NetworkRegistry::mainnet();
        let batch = std::iter::once(camp_transactions::RawTransaction::call(
            Address::from(target),
            value,
            signature,
            Bytes::from(calldata),
        ))
        .collect();
        let decoded = decode(&batch, CHAIN, &registry).unwrap();
        prop_assert_eq!(decoded.len(), 1);
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn totals_match_per_currency_sums(txs in prop::collection::vec(transaction(), 0..12)) {
        let txs = normalize(&txs);
        let weth = txs.iter().filter_map(TypedTransaction::weth_amount).fold(U512::ZERO, |a, b| a + U512::from(b));
        let usdc = txs.iter().filter_map(TypedTransaction::usdc_amount).fold(U512::ZERO, |a, b| a + U512::from(b));

        let totals = extract_amounts(&txs);
        let total_of = |currency: Currency| totals.iter().find(|t| t.currency == currency).map(|t| t.amount);

        prop_assert_eq!(total_of(Currency::Weth).unwrap_or(U512::ZERO), weth);
        prop_assert_eq!(total_of(Currency::Usdc).unwrap_or(U512::ZERO), usdc);
    }

    #[test]
    fn totals_are_nonzero_and_ordered(txs in prop::collection::vec(transaction(), 0..12)) {
        let totals = extract_amounts(&txs);
        prop_assert!(totals.iter().all(|t| !t.amount.is_zero()));

        let positions: Vec<usize> = totals
            .iter()
            .map(|t| Currency::ALL.iter().position(|c| *c == t.currency).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn large_values_sum_without_clamping(values in prop::collection::vec(any::<[u64; 4]>(), 1..8)) {
        let values: Vec<U256> = values.into_iter().map(U256::from_limbs).collect();
        let expected = values.iter().fold(U512::ZERO, |a, b| a + U512::from(*b));
        let txs: Vec<_> = values
            .into_iter()
            .map(|value| TypedTransaction::Transfer { target: Address::repeat_byte(1), value })
            .collect();
        let totals = extract_amounts(&txs);
        prop_assert_eq!(totals.first().map(|t| t.amount).unwrap_or(U512::ZERO), expected);
    }

    #[test]
    fn plumbing_never_counts_as_spending(value in nonzero_amount()) {
        let txs = vec![
            TypedTransaction::PayerTopUp { target: contract(TOKEN_BUYER), value },
            TypedTransaction::WethDeposit { value },
        ];
        prop_assert!(extract_amounts(&txs).is_empty());
    }
}
