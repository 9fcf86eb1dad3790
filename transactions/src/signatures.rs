//! Signatures the codec recognizes, in canonical form.

use alloy_dyn_abi::DynSolType;

/// `createStream(receiver, tokenAmount, tokenContract, startTime, stopTime, nonce, predictedStreamAddress)`.
///
/// The `uint8` argument is always encoded as zero and ignored on decode.
pub const CREATE_STREAM: &str =
    "createStream(address,uint256,address,uint256,uint256,uint8,address)";

/// Payer: pay USDC now, or register a debt if the payer is short.
pub const SEND_OR_REGISTER_DEBT: &str = "sendOrRegisterDebt(address,uint256)";

pub const ERC20_TRANSFER: &str = "transfer(address,uint256)";

pub const ERC20_APPROVE: &str = "approve(address,uint256)";

pub const WETH_DEPOSIT: &str = "deposit()";

/// Index of the predicted stream address in the `createStream` arguments.
pub const PREDICTED_STREAM_ADDRESS_INDEX: usize = 6;

pub fn create_stream_types() -> Vec<DynSolType> {
    vec![
        DynSolType::Address,
        DynSolType::Uint(256),
        DynSolType::Address,
        DynSolType::Uint(256),
        DynSolType::Uint(256),
        DynSolType::Uint(8),
        DynSolType::Address,
    ]
}

/// Parameter list shared by `transfer`, `approve` and `sendOrRegisterDebt`.
pub fn address_amount_types() -> Vec<DynSolType> {
    vec![DynSolType::Address, DynSolType::Uint(256)]
}
