use cosmwasm_std::{StdError, Uint128, VerificationError};
use thiserror::Error;

use crate::error::ContractError;

#[derive(Error, Debug, PartialEq)]
pub enum AnteError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Verification(#[from] VerificationError),

    #[error("{0}")]
    Contract(#[from] ContractError),

    #[error("invalid transaction: {reason}")]
    InvalidTx {
        reason: String,
    },

    #[error("unsupported message type {type_url}; expecting an ethereum transaction")]
    UnsupportedMsg {
        type_url: String,
    },

    #[error("rejected unprotected transaction: a chain id is required")]
    UnprotectedTx,

    #[error("invalid chain id: expected {expected}, got {found}")]
    InvalidChainId {
        expected: u64,
        found: u64,
    },

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("invalid public key: expected 33 compressed bytes, got {length}")]
    InvalidPubkey {
        length: usize,
    },

    #[error("sender {from} does not match signer {signer}")]
    SenderMismatch {
        from: String,
        signer: String,
    },

    #[error("contract creation is disabled")]
    CreateDisabled,

    #[error("contract calls are disabled")]
    CallDisabled,

    #[error("invalid gas: {reason}")]
    InvalidGas {
        reason: String,
    },

    #[error("insufficient fee: got {got}, required {required}")]
    InsufficientFee {
        got: Uint128,
        required: Uint128,
    },

    #[error("insufficient funds: balance {balance}{denom} is less than {required}{denom}")]
    InsufficientFunds {
        denom: String,
        balance: Uint128,
        required: Uint128,
    },

    #[error("sender {address} is not an EOA")]
    SenderNotEoa {
        address: String,
    },

    #[error("unknown address: account {address} does not exist")]
    UnknownAddress {
        address: String,
    },

    #[error("invalid nonce: expected {expected}, got {got}")]
    InvalidNonce {
        expected: u64,
        got: u64,
    },

    #[error("nonce of {address} has max value")]
    NonceMax {
        address: String,
    },

    #[error("out of gas in location {descriptor}: limit {limit}, required {required}")]
    OutOfGas {
        descriptor: String,
        limit: u64,
        required: u64,
    },

    #[error("gas wanted {gas_wanted} is greater than the block gas limit {limit}")]
    GasWantedExceeded {
        gas_wanted: u64,
        limit: u64,
    },

    #[error("invalid tx fee: {reason}")]
    InvalidTxFee {
        reason: String,
    },
}

impl AnteError {
    pub fn invalid_tx(reason: impl Into<String>) -> Self {
        AnteError::InvalidTx {
            reason: reason.into(),
        }
    }

    pub fn invalid_gas(reason: impl Into<String>) -> Self {
        AnteError::InvalidGas {
            reason: reason.into(),
        }
    }

    pub fn invalid_tx_fee(reason: impl Into<String>) -> Self {
        AnteError::InvalidTxFee {
            reason: reason.into(),
        }
    }

    pub fn insufficient_fee(got: Uint128, required: Uint128) -> Self {
        AnteError::InsufficientFee {
            got,
            required,
        }
    }

    pub fn insufficient_funds(
        denom: impl Into<String>,
        balance: Uint128,
        required: Uint128,
    ) -> Self {
        AnteError::InsufficientFunds {
            denom: denom.into(),
            balance,
            required,
        }
    }

    pub fn out_of_gas(descriptor: impl Into<String>, limit: u64, required: u64) -> Self {
        AnteError::OutOfGas {
            descriptor: descriptor.into(),
            limit,
            required,
        }
    }
}

pub type AnteResult<T> = Result<T, AnteError>;
