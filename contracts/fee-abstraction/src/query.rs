use cosmwasm_std::{Deps, Env, StdError, StdResult, Uint128};

use fee_abstraction::msg::{ConvertFeeResponse, FeeTokenResponse, FeeTokensResponse, ParamsResponse};

use crate::convert::convert_native_fee;
use crate::interfaces::BankKeeper;
use crate::oracle::PriceOracle;
use crate::registry;
use crate::state::PARAMS;

pub fn params(deps: Deps) -> StdResult<ParamsResponse> {
    Ok(ParamsResponse {
        params: PARAMS.load(deps.storage)?,
    })
}

pub fn fee_tokens(deps: Deps) -> StdResult<FeeTokensResponse> {
    Ok(FeeTokensResponse {
        fee_tokens: registry::list(deps.storage)?,
    })
}

pub fn fee_token(deps: Deps, denom: impl Into<String>) -> StdResult<FeeTokenResponse> {
    Ok(FeeTokenResponse {
        fee_token: registry::get(deps.storage, &denom.into())?,
    })
}

pub fn convert_fee(
    deps: Deps,
    env: Env,
    bank: &dyn BankKeeper,
    oracle: &dyn PriceOracle,
    payer: String,
    amount: Uint128,
) -> StdResult<ConvertFeeResponse> {
    let payer = deps.api.addr_validate(&payer)?;
    let fee = convert_native_fee(deps.storage, bank, oracle, &payer, amount, env.block.time)
        .map_err(|err| StdError::generic_err(err.to_string()))?;

    Ok(ConvertFeeResponse {
        fee,
    })
}
