//! Encoding typed transactions back into raw governance actions.

use alloy_dyn_abi::DynSolValue;
use camp_registry::contract::STREAM_FACTORY;
use camp_registry::ContractRegistry;
use camp_types::{Address, Bytes, ChainId, U256};

use crate::abi;
use crate::decode::KnownContracts;
use crate::error::TransactionError;
use crate::raw::{RawTransaction, RawTransactions};
use crate::signatures::{
    CREATE_STREAM, ERC20_APPROVE, ERC20_TRANSFER, SEND_OR_REGISTER_DEBT, WETH_DEPOSIT,
};
use crate::typed::{FunctionInput, StreamTransaction, TypedTransaction};

/// Encode a sequence of typed transactions, one raw action each, in order.
pub fn encode(
    transactions: &[TypedTransaction],
    chain: ChainId,
    registry: &dyn ContractRegistry,
) -> Result<RawTransactions, TransactionError> {
    let contracts = KnownContracts::resolve(registry, chain)?;
    let stream_factory = registry.resolve_identifier(chain, STREAM_FACTORY)?.address;

    let batch = transactions
        .iter()
        .map(|tx| encode_transaction(tx, &contracts, stream_factory))
        .collect::<Result<RawTransactions, _>>()?;

    tracing::debug!(chain = %chain, actions = batch.len(), "encoded proposal actions");
    Ok(batch)
}

/// Encode one typed transaction.
pub fn encode_transaction(
    tx: &TypedTransaction,
    contracts: &KnownContracts,
    stream_factory: Address,
) -> Result<RawTransaction, TransactionError> {
    let raw = match tx {
        TypedTransaction::Transfer { target, value } => RawTransaction::transfer(*target, *value),

        TypedTransaction::PayerTopUp { value, .. } => {
            RawTransaction::transfer(contracts.token_buyer, *value)
        }

        TypedTransaction::UsdcTransferViaPayer {
            receiver_address,
            usdc_amount,
        }
        | TypedTransaction::UsdcStreamFundingViaPayer {
            receiver_address,
            usdc_amount,
        } => RawTransaction::call(
            contracts.payer,
            U256::ZERO,
            SEND_OR_REGISTER_DEBT,
            encode_address_amount(*receiver_address, *usdc_amount),
        ),

        TypedTransaction::WethDeposit { value } => {
            RawTransaction::call(contracts.weth, *value, WETH_DEPOSIT, Bytes::new())
        }

        TypedTransaction::WethTransfer {
            receiver_address,
            weth_amount,
        }
        | TypedTransaction::WethStreamFunding {
            receiver_address,
            weth_amount,
        } => RawTransaction::call(
            contracts.weth,
            U256::ZERO,
            ERC20_TRANSFER,
            encode_address_amount(*receiver_address, *weth_amount),
        ),

        TypedTransaction::WethApproval {
            receiver_address,
            weth_amount,
        } => RawTransaction::call(
            contracts.weth,
            U256::ZERO,
            ERC20_APPROVE,
            encode_address_amount(*receiver_address, *weth_amount),
        ),

        TypedTransaction::Stream(stream) => RawTransaction::call(
            stream_factory,
            U256::ZERO,
            CREATE_STREAM,
            encode_create_stream(stream),
        ),

        TypedTransaction::FunctionCall {
            target,
            function_name,
            function_inputs,
        } => encode_function_call(*target, U256::ZERO, function_name, function_inputs)?,

        TypedTransaction::PayableFunctionCall {
            target,
            function_name,
            function_inputs,
            value,
        } => encode_function_call(*target, *value, function_name, function_inputs)?,

        TypedTransaction::UnparsedFunctionCall {
            target,
            calldata,
            signature,
            value,
            ..
        } => RawTransaction::call(
            *target,
            value.unwrap_or(U256::ZERO),
            signature.clone().unwrap_or_default(),
            calldata.clone(),
        ),

        TypedTransaction::UnparsedPayableFunctionCall {
            target,
            calldata,
            value,
        } => RawTransaction::call(*target, *value, String::new(), calldata.clone()),
    };

    tracing::trace!(kind = %tx.kind(), target = %raw.target, "encoded transaction");
    Ok(raw)
}

fn encode_address_amount(receiver: Address, amount: U256) -> Bytes {
    abi::encode_params(&[
        DynSolValue::Address(receiver),
        DynSolValue::Uint(amount, 256),
    ])
}

fn encode_create_stream(stream: &StreamTransaction) -> Bytes {
    abi::encode_params(&[
        DynSolValue::Address(stream.receiver_address),
        DynSolValue::Uint(stream.token_amount, 256),
        DynSolValue::Address(stream.token_contract_address),
        DynSolValue::Uint(U256::from(stream.start_date.as_unix_secs()), 256),
        DynSolValue::Uint(U256::from(stream.end_date.as_unix_secs()), 256),
        DynSolValue::Uint(U256::ZERO, 8),
        DynSolValue::Address(stream.stream_contract_address),
    ])
}

/// Rebuild the signature from the inputs' own types and encode their values.
fn encode_function_call(
    target: Address,
    value: U256,
    function_name: &str,
    inputs: &[FunctionInput],
) -> Result<RawTransaction, TransactionError> {
    if let Some(index) = inputs.iter().position(|input| !input.is_well_typed()) {
        return Err(TransactionError::InputTypeMismatch {
            function: function_name.to_string(),
            index,
            ty: inputs[index].ty.sol_type_name().into_owned(),
        });
    }

    let types: Vec<_> = inputs.iter().map(|input| input.ty.clone()).collect();
    let values: Vec<_> = inputs.iter().map(|input| input.value.clone()).collect();

    Ok(RawTransaction::call(
        target,
        value,
        abi::format_signature(function_name, &types),
        abi::encode_params(&values),
    ))
}
