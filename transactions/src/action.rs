//! Actions: what a proposal author asks for, before it becomes transactions.
//!
//! [`action_transactions`] expands one action into typed transactions and then runs
//! them through encode and decode on the same chain. The round-trip normalizes the
//! result (stream funding detection, for instance, is the decoder's job) and proves
//! the expansion encodes at all. Any failure here is fatal: authoring input is
//! caller-controlled and must be fixed before submission.

use camp_registry::contract::TOKEN_BUYER;
use camp_registry::ContractRegistry;
use camp_types::{Address, ChainId, Currency, Timestamp, U256};
use serde::{Deserialize, Serialize};

use crate::abi;
use crate::decode::decode;
use crate::encode::encode;
use crate::error::TransactionError;
use crate::typed::{FunctionInput, StreamTransaction, TypedTransaction};

/// A user-authored intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    /// Pay `amount` (a decimal string) of `currency` to `target` once.
    OneTimePayment {
        target: Address,
        currency: Currency,
        amount: String,
    },
    /// Stream `amount` of `currency` to `target` between two dates.
    StreamingPayment {
        target: Address,
        currency: Currency,
        amount: String,
        start_timestamp: Timestamp,
        end_timestamp: Timestamp,
        predicted_stream_contract_address: Address,
    },
    /// Send `value` wei to the token buyer.
    PayerTopUp { value: U256 },
    /// Call an arbitrary function.
    CustomTransaction {
        target: Address,
        /// e.g. `function mint(address to, uint256 amount) payable`
        signature: String,
        /// One string per parameter, coerced against its declared type.
        #[serde(default)]
        arguments: Vec<String>,
        /// ETH to attach (decimal string). Required by payable functions, ignored otherwise.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eth_value: Option<String>,
    },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OneTimePayment { .. } => "one-time-payment",
            Self::StreamingPayment { .. } => "streaming-payment",
            Self::PayerTopUp { .. } => "payer-top-up",
            Self::CustomTransaction { .. } => "custom-transaction",
        }
    }
}

/// Expand an action and normalize it through an encode/decode round-trip.
pub fn action_transactions(
    action: &Action,
    chain: ChainId,
    registry: &dyn ContractRegistry,
) -> Result<Vec<TypedTransaction>, TransactionError> {
    let transactions = expand_action(action, chain, registry)?;
    let raw = encode(&transactions, chain, registry)?;
    let normalized = decode(&raw, chain, registry)?;
    tracing::debug!(
        action = action.kind(),
        chain = %chain,
        transactions = normalized.len(),
        "expanded action"
    );
    Ok(normalized)
}

/// Expand an action without the normalizing round-trip.
pub fn expand_action(
    action: &Action,
    chain: ChainId,
    registry: &dyn ContractRegistry,
) -> Result<Vec<TypedTransaction>, TransactionError> {
    match action {
        Action::OneTimePayment {
            target,
            currency,
            amount,
        } => match currency {
            Currency::Eth => Ok(vec![TypedTransaction::Transfer {
                target: *target,
                value: Currency::Eth.parse_amount(amount)?,
            }]),
            Currency::Usdc => Ok(vec![TypedTransaction::UsdcTransferViaPayer {
                receiver_address: *target,
                usdc_amount: Currency::Usdc.parse_amount(amount)?,
            }]),
            other => Err(TransactionError::UnsupportedCurrency {
                action: action.kind(),
                currency: *other,
            }),
        },

        Action::StreamingPayment {
            target,
            currency,
            amount,
            start_timestamp,
            end_timestamp,
            predicted_stream_contract_address,
        } => {
            let unsupported = || TransactionError::UnsupportedCurrency {
                action: action.kind(),
                currency: *currency,
            };
            let token_identifier = currency.token_identifier().ok_or_else(unsupported)?;
            let token_contract = registry.resolve_identifier(chain, token_identifier)?;
            let token_amount = currency.parse_amount(amount)?;

            let stream = TypedTransaction::Stream(StreamTransaction {
                receiver_address: *target,
                token: Some(currency.symbol().to_string()),
                token_amount,
                token_contract_address: token_contract.address,
                start_date: *start_timestamp,
                end_date: *end_timestamp,
                stream_contract_address: *predicted_stream_contract_address,
            });

            let funding = match currency {
                Currency::Weth => vec![
                    TypedTransaction::WethDeposit {
                        value: Currency::Eth.parse_amount(amount)?,
                    },
                    TypedTransaction::WethTransfer {
                        receiver_address: *predicted_stream_contract_address,
                        weth_amount: token_amount,
                    },
                ],
                Currency::Usdc => vec![TypedTransaction::UsdcTransferViaPayer {
                    receiver_address: *predicted_stream_contract_address,
                    usdc_amount: token_amount,
                }],
                Currency::Eth => return Err(unsupported()),
            };

            Ok(std::iter::once(stream).chain(funding).collect())
        }

        Action::PayerTopUp { value } => {
            let token_buyer = registry.resolve_identifier(chain, TOKEN_BUYER)?;
            Ok(vec![TypedTransaction::PayerTopUp {
                target: token_buyer.address,
                value: *value,
            }])
        }

        Action::CustomTransaction {
            target,
            signature,
            arguments,
            eth_value,
        } => {
            let parsed = abi::parse_signature(signature)?;
            if parsed.inputs.len() != arguments.len() {
                return Err(TransactionError::ArgumentCount {
                    function: parsed.name,
                    expected: parsed.inputs.len(),
                    actual: arguments.len(),
                });
            }

            let function_inputs = parsed
                .inputs
                .iter()
                .zip(arguments)
                .enumerate()
                .map(|(index, (ty, raw))| {
                    Ok(FunctionInput::new(ty.clone(), abi::coerce_value(ty, index, raw)?))
                })
                .collect::<Result<Vec<_>, TransactionError>>()?;

            if parsed.is_payable() {
                let amount = eth_value
                    .as_deref()
                    .ok_or_else(|| TransactionError::MissingEthValue {
                        function: parsed.name.clone(),
                    })?;
                let value = Currency::Eth.parse_amount(amount)?;
                Ok(vec![TypedTransaction::PayableFunctionCall {
                    target: *target,
                    function_name: parsed.name,
                    function_inputs,
                    value,
                }])
            } else {
                Ok(vec![TypedTransaction::FunctionCall {
                    target: *target,
                    function_name: parsed.name,
                    function_inputs,
                }])
            }
        }
    }
}
