//! One-line descriptions of typed transactions for `--summary` output.

use camp_transactions::abi::format_value;
use camp_transactions::{FunctionInput, StreamTransaction, TypedTransaction};
use camp_types::{Address, Currency, CurrencyAmount, U256};
use camp_utils::format_stream_period;

pub fn describe(tx: &TypedTransaction) -> String {
    let eth = |value: &U256| CurrencyAmount::new(Currency::Eth, *value);
    let weth = |value: &U256| CurrencyAmount::new(Currency::Weth, *value);
    let usdc = |value: &U256| CurrencyAmount::new(Currency::Usdc, *value);

    match tx {
        TypedTransaction::Transfer { target, value } => {
            format!("transfer {} to {target}", eth(value))
        }
        TypedTransaction::PayerTopUp { value, .. } => format!("top up payer with {}", eth(value)),
        TypedTransaction::UsdcTransferViaPayer {
            receiver_address,
            usdc_amount,
        } => format!("pay {} to {receiver_address} via payer", usdc(usdc_amount)),
        TypedTransaction::UsdcStreamFundingViaPayer {
            receiver_address,
            usdc_amount,
        } => format!("fund stream {receiver_address} with {} via payer", usdc(usdc_amount)),
        TypedTransaction::WethDeposit { value } => format!("wrap {}", eth(value)),
        TypedTransaction::WethTransfer {
            receiver_address,
            weth_amount,
        } => format!("transfer {} to {receiver_address}", weth(weth_amount)),
        TypedTransaction::WethStreamFunding {
            receiver_address,
            weth_amount,
        } => format!("fund stream {receiver_address} with {}", weth(weth_amount)),
        TypedTransaction::WethApproval {
            receiver_address,
            weth_amount,
        } => format!("approve {receiver_address} to spend {}", weth(weth_amount)),
        TypedTransaction::Stream(stream) => describe_stream(stream),
        TypedTransaction::FunctionCall {
            target,
            function_name,
            function_inputs,
        } => describe_call(target, function_name, function_inputs),
        TypedTransaction::PayableFunctionCall {
            target,
            function_name,
            function_inputs,
            value,
        } => format!(
            "{} with {}",
            describe_call(target, function_name, function_inputs),
            eth(value)
        ),
        TypedTransaction::UnparsedFunctionCall {
            target,
            calldata,
            signature,
            error,
            ..
        } => {
            let mut line = format!(
                "unparsed call to {target}: {} ({} bytes)",
                signature.as_deref().unwrap_or("no signature"),
                calldata.len()
            );
            if let Some(error) = error {
                line.push_str(&format!(" [{error}]"));
            }
            line
        }
        TypedTransaction::UnparsedPayableFunctionCall {
            target,
            calldata,
            value,
        } => format!(
            "unparsed call to {target} with {} ({} bytes)",
            eth(value),
            calldata.len()
        ),
    }
}

fn describe_stream(stream: &StreamTransaction) -> String {
    let symbol = stream.token.as_deref();
    let amount = match symbol.and_then(|symbol| symbol.parse::<Currency>().ok()) {
        Some(currency) => CurrencyAmount::new(currency, stream.token_amount).to_string(),
        None => format!(
            "{} units of {} {}",
            stream.token_amount,
            symbol.unwrap_or("token"),
            stream.token_contract_address
        ),
    };
    format!(
        "stream {amount} to {} over {} (stream {})",
        stream.receiver_address,
        format_stream_period(stream.start_date, stream.end_date),
        stream.stream_contract_address
    )
}

fn describe_call(target: &Address, function_name: &str, inputs: &[FunctionInput]) -> String {
    let args: Vec<_> = inputs.iter().map(|input| format_value(&input.value)).collect();
    format!("call {target}.{function_name}({})", args.join(", "))
}
