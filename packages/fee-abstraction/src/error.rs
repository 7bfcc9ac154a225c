use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{reason}: invalid fee abstraction params")]
    InvalidParams {
        reason: String,
    },

    #[error("{reason}: invalid fee token metadata")]
    InvalidFeeToken {
        reason: String,
    },

    #[error("duplicate denom found: {denom}: invalid fee token metadata")]
    DuplicateDenom {
        denom: String,
    },
}

impl ValidationError {
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        ValidationError::InvalidParams {
            reason: reason.into(),
        }
    }

    pub fn invalid_fee_token(reason: impl Into<String>) -> Self {
        ValidationError::InvalidFeeToken {
            reason: reason.into(),
        }
    }

    pub fn duplicate_denom(denom: impl Into<String>) -> Self {
        ValidationError::DuplicateDenom {
            denom: denom.into(),
        }
    }
}
