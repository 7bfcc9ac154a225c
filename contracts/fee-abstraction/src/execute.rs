use cosmwasm_std::{Addr, DepsMut, Env, Response, StdResult, Storage, Timestamp};

use fee_abstraction::{FeeTokenMetadataCollection, Params};

use crate::error::ContractError;
use crate::fee_market::StoreFeeMarket;
use crate::helpers::{assert_authority, clamp_price};
use crate::oracle::{implied_price, PriceOracle};
use crate::registry;
use crate::state::{AUTHORITY, PARAMS, PRICE_SNAPSHOTS};

pub fn init(
    deps: DepsMut,
    authority: Addr,
    params: Params,
    fee_tokens: FeeTokenMetadataCollection,
) -> Result<Response, ContractError> {
    params.validate()?;

    AUTHORITY.save(deps.storage, &authority)?;
    PARAMS.save(deps.storage, &params)?;
    registry::replace(deps.storage, fee_tokens)?;

    Ok(Response::new()
        .add_attribute("action", "fee_abstraction/init")
        .add_attribute("authority", authority))
}

pub fn update_params(
    deps: DepsMut,
    authority: &str,
    params: Params,
) -> Result<Response, ContractError> {
    assert_authority(deps.storage, authority)?;
    params.validate()?;

    // the new native denom must not collide with a registered fee token
    if registry::list(deps.storage)?.contains(&params.native_denom) {
        return Err(ContractError::native_denom_as_fee_token(params.native_denom));
    }

    // reference prices are quoted against the native price; a new way of pricing the native
    // token makes every one of them meaningless
    let previous = PARAMS.load(deps.storage)?;
    let repriced = previous.oracle_denom != params.oracle_denom
        || previous.fallback_native_price != params.fallback_native_price
        || previous.twap_lookback_window != params.twap_lookback_window;
    if repriced {
        registry::prune_snapshots(deps.storage, &FeeTokenMetadataCollection::default())?;
    }

    PARAMS.save(deps.storage, &params)?;

    Ok(Response::new()
        .add_attribute("action", "fee_abstraction/update_params")
        .add_attribute("native_denom", params.native_denom)
        .add_attribute("oracle_denom", params.oracle_denom)
        .add_attribute("clamp_factor", params.clamp_factor.to_string())
        .add_attribute("fallback_native_price", params.fallback_native_price.to_string())
        .add_attribute("twap_lookback_window", params.twap_lookback_window.to_string())
        .add_attribute("enabled", params.enabled.to_string())
        .add_attribute("snapshots_cleared", repriced.to_string()))
}

pub fn update_fee_tokens(
    deps: DepsMut,
    authority: &str,
    fee_tokens: FeeTokenMetadataCollection,
) -> Result<Response, ContractError> {
    assert_authority(deps.storage, authority)?;

    let count = fee_tokens.len();
    registry::replace(deps.storage, fee_tokens)?;

    Ok(Response::new()
        .add_attribute("action", "fee_abstraction/update_fee_tokens")
        .add_attribute("fee_tokens", count.to_string()))
}

/// Begin-block hook: move every fee token's reference price toward its current implied price, by
/// at most the clamp factor. A token seen for the first time takes its current price as is; a
/// token the oracle cannot price keeps its previous reference. Also starts a fresh count of the
/// block's gas wanted.
pub fn begin_block(
    deps: DepsMut,
    env: Env,
    oracle: &dyn PriceOracle,
) -> Result<Response, ContractError> {
    StoreFeeMarket::reset_transient_gas_wanted(deps.storage);

    let updated = snapshot_prices(deps.storage, oracle, env.block.time)?;

    Ok(Response::new()
        .add_attribute("action", "fee_abstraction/begin_block")
        .add_attribute("prices_updated", updated.to_string()))
}

pub fn snapshot_prices(
    store: &mut dyn Storage,
    oracle: &dyn PriceOracle,
    now: Timestamp,
) -> StdResult<usize> {
    let params = PARAMS.load(store)?;
    let fee_tokens = registry::list(store)?;

    let mut updated = 0;
    for token in fee_tokens.iter() {
        // an unpriced token keeps its last reference, so the first price after a gap is still
        // measured against it
        let Some(price) = implied_price(store, oracle, &params, token, now) else {
            continue;
        };

        let price = match PRICE_SNAPSHOTS.may_load(store, &token.denom)? {
            Some(reference) => clamp_price(price, reference, params.clamp_factor),
            None => price,
        };
        PRICE_SNAPSHOTS.save(store, &token.denom, &price)?;
        updated += 1;
    }

    registry::prune_snapshots(store, &fee_tokens)?;

    Ok(updated)
}
