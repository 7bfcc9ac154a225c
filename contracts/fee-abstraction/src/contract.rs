#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};

use fee_abstraction::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, SudoMsg};

use crate::bank::StoreBank;
use crate::error::ContractError;
use crate::oracle::TwapOracle;
use crate::{execute, query};

pub const CONTRACT_NAME: &str = "crates.io:fee-abstraction-module";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    fee_abstraction::msg::assert_non_empty_address(&msg.authority)?;
    let authority = deps.api.addr_validate(&msg.authority)?;

    execute::init(deps, authority, msg.params, msg.fee_tokens)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    fee_abstraction::msg::assert_non_empty_address(msg.authority())?;

    // the authority named in the message must be the one who signed it
    if info.sender != msg.authority() {
        return Err(ContractError::unauthorized(msg.authority(), info.sender));
    }

    msg.validate()?;

    match msg {
        ExecuteMsg::UpdateParams {
            authority,
            params,
        } => execute::update_params(deps, &authority, params),
        ExecuteMsg::UpdateFeeTokens {
            authority,
            fee_tokens,
        } => execute::update_fee_tokens(deps, &authority, fee_tokens),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: DepsMut, env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::BeginBlock {} => execute::begin_block(deps, env, &TwapOracle),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Params {} => to_binary(&query::params(deps)?),
        QueryMsg::FeeTokens {} => to_binary(&query::fee_tokens(deps)?),
        QueryMsg::FeeToken {
            denom,
        } => to_binary(&query::fee_token(deps, denom)?),
        QueryMsg::ConvertFee {
            payer,
            amount,
        } => {
            let bank = StoreBank::default();
            to_binary(&query::convert_fee(deps, env, &bank, &TwapOracle, payer, amount)?)
        },
    }
}
