use cosmwasm_std::{StdError, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ConvertedFee, FeeTokenMetadata, FeeTokenMetadataCollection, Params, ValidationError};

/// Genesis state of the module
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct InstantiateMsg {
    /// The account allowed to update params and fee tokens, normally the governance module
    pub authority: String,
    pub params: Params,
    pub fee_tokens: FeeTokenMetadataCollection,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Replace the module params. Only callable by the authority.
    UpdateParams {
        authority: String,
        params: Params,
    },
    /// Replace the whole fee token registry. This is not a merge: tokens absent from the new
    /// collection are removed. Only callable by the authority.
    UpdateFeeTokens {
        authority: String,
        fee_tokens: FeeTokenMetadataCollection,
    },
}

impl ExecuteMsg {
    /// Stateless checks, run before the authority is compared against the stored one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ExecuteMsg::UpdateParams {
                params,
                ..
            } => params.validate(),
            ExecuteMsg::UpdateFeeTokens {
                fee_tokens,
                ..
            } => fee_tokens.validate(),
        }
    }

    pub fn authority(&self) -> &str {
        match self {
            ExecuteMsg::UpdateParams {
                authority,
                ..
            }
            | ExecuteMsg::UpdateFeeTokens {
                authority,
                ..
            } => authority,
        }
    }
}

/// Hooks invoked by the chain itself
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum SudoMsg {
    /// Record, for every fee token, the price accepted at the start of the block. These records
    /// are the reference prices the clamp factor is measured against.
    BeginBlock {},
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// The module params. Returns ParamsResponse
    Params {},
    /// All registered fee tokens, in registration order. Returns FeeTokensResponse
    FeeTokens {},
    /// A single fee token. Returns FeeTokenResponse
    FeeToken {
        denom: String,
    },
    /// Which denom and amount would be charged to `payer` for a native fee of `amount`.
    /// Read-only. Returns ConvertFeeResponse
    ConvertFee {
        payer: String,
        amount: Uint128,
    },
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct ParamsResponse {
    pub params: Params,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct FeeTokensResponse {
    pub fee_tokens: FeeTokenMetadataCollection,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct FeeTokenResponse {
    pub fee_token: Option<FeeTokenMetadata>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct ConvertFeeResponse {
    pub fee: ConvertedFee,
}

/// Mirror of the SDK's address check, so an empty authority reports the familiar message
pub fn assert_non_empty_address(addr: &str) -> Result<(), StdError> {
    if addr.trim().is_empty() {
        return Err(StdError::generic_err("empty address string is not allowed"));
    }
    Ok(())
}
