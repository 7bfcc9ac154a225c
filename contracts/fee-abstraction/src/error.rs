use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

use fee_abstraction::ValidationError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("unauthorized: expected {expected}, got {found}")]
    Unauthorized {
        expected: String,
        found: String,
    },

    #[error("fee token {denom} not found")]
    NotFound {
        denom: String,
    },

    #[error("insufficient funds: no fee token can cover the fee of {fee}")]
    InsufficientFunds {
        fee: String,
    },

    #[error("native denom {denom} cannot be registered as a fee token")]
    NativeDenomAsFeeToken {
        denom: String,
    },
}

impl ContractError {
    pub fn unauthorized(expected: impl Into<String>, found: impl Into<String>) -> Self {
        ContractError::Unauthorized {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn not_found(denom: impl Into<String>) -> Self {
        ContractError::NotFound {
            denom: denom.into(),
        }
    }

    pub fn insufficient_funds(fee: impl ToString) -> Self {
        ContractError::InsufficientFunds {
            fee: fee.to_string(),
        }
    }

    pub fn native_denom_as_fee_token(denom: impl Into<String>) -> Self {
        ContractError::NativeDenomAsFeeToken {
            denom: denom.into(),
        }
    }
}
