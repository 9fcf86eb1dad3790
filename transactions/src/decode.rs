//! Decoding raw actions into typed transactions.
//!
//! Decoding is two-phase. Phase one scans the whole batch, read-only, for
//! `createStream` calls and collects the stream addresses they predict. Phase two
//! classifies each action on its own, consulting that context to tell a transfer
//! that funds a freshly created stream from an ordinary one.
//!
//! Malformed actions never fail the decode: proposals are public historical data
//! and must always render. They degrade to the `unparsed-*` variants instead. Only
//! registry failures (an unknown chain) are returned as errors.

use std::collections::HashSet;

use alloy_dyn_abi::DynSolValue;
use camp_registry::contract::{PAYER, TOKEN_BUYER, WETH_TOKEN};
use camp_registry::ContractRegistry;
use camp_types::{Address, Bytes, ChainId, Timestamp, U256};

use crate::abi;
use crate::error::TransactionError;
use crate::raw::{RawTransaction, RawTransactions};
use crate::signatures::{self, CREATE_STREAM, ERC20_TRANSFER, SEND_OR_REGISTER_DEBT};
use crate::typed::{DecodeFailure, FunctionInput, StreamTransaction, TypedTransaction};

/// Addresses of the contracts the decoder gives special meaning to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnownContracts {
    pub payer: Address,
    pub token_buyer: Address,
    pub weth: Address,
}

impl KnownContracts {
    pub fn resolve(
        registry: &dyn ContractRegistry,
        chain: ChainId,
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            payer: registry.resolve_identifier(chain, PAYER)?.address,
            token_buyer: registry.resolve_identifier(chain, TOKEN_BUYER)?.address,
            weth: registry.resolve_identifier(chain, WETH_TOKEN)?.address,
        })
    }
}

/// Batch-wide facts gathered before any action is classified.
#[derive(Clone, Debug)]
pub struct DecodeContext {
    chain: ChainId,
    contracts: KnownContracts,
    predicted_streams: HashSet<Address>,
}

impl DecodeContext {
    /// Phase one: resolve the known contracts and collect predicted stream addresses.
    ///
    /// A `createStream` call whose calldata does not decode contributes nothing here;
    /// phase two still decodes (and degrades) it independently.
    pub fn build(
        batch: &RawTransactions,
        chain: ChainId,
        registry: &dyn ContractRegistry,
    ) -> Result<Self, TransactionError> {
        let contracts = KnownContracts::resolve(registry, chain)?;
        let predicted_streams = batch
            .iter()
            .filter(|tx| tx.signature == CREATE_STREAM)
            .filter_map(|tx| predicted_stream_address(&tx.calldata))
            .collect();

        Ok(Self {
            chain,
            contracts,
            predicted_streams,
        })
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn contracts(&self) -> &KnownContracts {
        &self.contracts
    }

    pub fn is_predicted_stream(&self, address: Address) -> bool {
        self.predicted_streams.contains(&address)
    }

    pub fn predicted_stream_count(&self) -> usize {
        self.predicted_streams.len()
    }
}

fn predicted_stream_address(calldata: &[u8]) -> Option<Address> {
    let values = abi::decode_params(&signatures::create_stream_types(), calldata).ok()?;
    match values.get(signatures::PREDICTED_STREAM_ADDRESS_INDEX) {
        Some(DynSolValue::Address(address)) => Some(*address),
        _ => None,
    }
}

/// Decode a whole batch, one typed transaction per action, in order.
pub fn decode(
    batch: &RawTransactions,
    chain: ChainId,
    registry: &dyn ContractRegistry,
) -> Result<Vec<TypedTransaction>, TransactionError> {
    let context = DecodeContext::build(batch, chain, registry)?;
    tracing::debug!(
        chain = %chain,
        actions = batch.len(),
        predicted_streams = context.predicted_stream_count(),
        "decoding proposal actions"
    );
    batch
        .iter()
        .map(|tx| decode_transaction(tx, &context, registry))
        .collect()
}

/// Phase two: classify one action.
pub fn decode_transaction(
    tx: RawTransaction,
    context: &DecodeContext,
    registry: &dyn ContractRegistry,
) -> Result<TypedTransaction, TransactionError> {
    let RawTransaction {
        target,
        value,
        signature,
        calldata,
    } = tx;

    if signature.is_empty() {
        return Ok(decode_unsigned(target, value, calldata, context));
    }

    let (function_name, inputs) = match decode_call(&signature, &calldata) {
        Ok(decoded) => decoded,
        Err(failure) => {
            tracing::warn!(%target, %signature, error = %failure, "call did not decode");
            return Ok(TypedTransaction::UnparsedFunctionCall {
                target,
                calldata,
                signature: Some(signature),
                value: Some(value),
                error: Some(failure),
            });
        }
    };

    if signature == CREATE_STREAM {
        if let Some(stream) = decode_stream(&inputs, context, registry)? {
            return Ok(TypedTransaction::Stream(stream));
        }
    }

    let contracts = context.contracts();

    if target == contracts.weth {
        if function_name == "deposit" {
            return Ok(TypedTransaction::WethDeposit { value });
        }
        if function_name == "approve" {
            if let Some((receiver_address, weth_amount)) = address_and_amount(&inputs) {
                return Ok(TypedTransaction::WethApproval {
                    receiver_address,
                    weth_amount,
                });
            }
        }
        if signature == ERC20_TRANSFER {
            if let Some((receiver_address, weth_amount)) = address_and_amount(&inputs) {
                return Ok(if context.is_predicted_stream(receiver_address) {
                    TypedTransaction::WethStreamFunding {
                        receiver_address,
                        weth_amount,
                    }
                } else {
                    TypedTransaction::WethTransfer {
                        receiver_address,
                        weth_amount,
                    }
                });
            }
        }
    }

    if target == contracts.payer && signature == SEND_OR_REGISTER_DEBT {
        if let Some((receiver_address, usdc_amount)) = address_and_amount(&inputs) {
            return Ok(if context.is_predicted_stream(receiver_address) {
                TypedTransaction::UsdcStreamFundingViaPayer {
                    receiver_address,
                    usdc_amount,
                }
            } else {
                TypedTransaction::UsdcTransferViaPayer {
                    receiver_address,
                    usdc_amount,
                }
            });
        }
    }

    if value.is_zero() {
        Ok(TypedTransaction::FunctionCall {
            target,
            function_name,
            function_inputs: inputs,
        })
    } else {
        Ok(TypedTransaction::PayableFunctionCall {
            target,
            function_name,
            function_inputs: inputs,
            value,
        })
    }
}

fn decode_unsigned(
    target: Address,
    value: U256,
    calldata: Bytes,
    context: &DecodeContext,
) -> TypedTransaction {
    if calldata.is_empty() {
        if target == context.contracts().token_buyer {
            TypedTransaction::PayerTopUp { target, value }
        } else {
            TypedTransaction::Transfer { target, value }
        }
    } else if value.is_zero() {
        TypedTransaction::UnparsedFunctionCall {
            target,
            calldata,
            signature: None,
            value: None,
            error: None,
        }
    } else {
        TypedTransaction::UnparsedPayableFunctionCall {
            target,
            calldata,
            value,
        }
    }
}

/// Parse the signature and decode the calldata against it.
///
/// Functions without parameters never look at the calldata.
fn decode_call(
    signature: &str,
    calldata: &[u8],
) -> Result<(String, Vec<FunctionInput>), DecodeFailure> {
    let parsed = abi::parse_signature(signature).map_err(|e| {
        tracing::debug!(error = %e, "signature did not parse");
        DecodeFailure::CalldataDecodingFailed
    })?;
    if parsed.inputs.is_empty() {
        return Ok((parsed.name, Vec::new()));
    }

    let values = abi::decode_params(&parsed.inputs, calldata)
        .map_err(|_| DecodeFailure::CalldataDecodingFailed)?;
    let inputs = parsed
        .inputs
        .into_iter()
        .zip(values)
        .map(|(ty, value)| FunctionInput::new(ty, value))
        .collect();
    Ok((parsed.name, inputs))
}

fn decode_stream(
    inputs: &[FunctionInput],
    context: &DecodeContext,
    registry: &dyn ContractRegistry,
) -> Result<Option<StreamTransaction>, TransactionError> {
    let values: Vec<&DynSolValue> = inputs.iter().map(|input| &input.value).collect();
    let [DynSolValue::Address(receiver_address), DynSolValue::Uint(token_amount, _), DynSolValue::Address(token_contract_address), DynSolValue::Uint(start, _), DynSolValue::Uint(end, _), _, DynSolValue::Address(stream_contract_address)] =
        values.as_slice()
    else {
        return Ok(None);
    };

    let token = registry
        .resolve_address(context.chain(), *token_contract_address)?
        .and_then(|contract| contract.token);

    Ok(Some(StreamTransaction {
        receiver_address: *receiver_address,
        token,
        token_amount: *token_amount,
        token_contract_address: *token_contract_address,
        start_date: Timestamp::from_unix_secs(saturating_secs(start)),
        end_date: Timestamp::from_unix_secs(saturating_secs(end)),
        stream_contract_address: *stream_contract_address,
    }))
}

fn saturating_secs(value: &U256) -> u64 {
    u64::try_from(*value).unwrap_or(u64::MAX)
}

fn address_and_amount(inputs: &[FunctionInput]) -> Option<(Address, U256)> {
    match inputs {
        [FunctionInput {
            value: DynSolValue::Address(address),
            ..
        }, FunctionInput {
            value: DynSolValue::Uint(amount, _),
            ..
        }] => Some((*address, *amount)),
        _ => None,
    }
}
