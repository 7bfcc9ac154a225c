//! The fee token registry: an insertion-ordered, duplicate-free collection persisted as a single
//! item. Every mutation validates the full resulting collection before anything is saved, so a
//! failed update leaves the registry untouched.

use cosmwasm_std::{Order, StdResult, Storage};

use fee_abstraction::{FeeTokenMetadata, FeeTokenMetadataCollection};

use crate::error::ContractError;
use crate::state::{FEE_TOKENS, PARAMS, PRICE_SNAPSHOTS};

pub fn list(store: &dyn Storage) -> StdResult<FeeTokenMetadataCollection> {
    Ok(FEE_TOKENS.may_load(store)?.unwrap_or_default())
}

pub fn get(store: &dyn Storage, denom: &str) -> StdResult<Option<FeeTokenMetadata>> {
    Ok(list(store)?.get(denom).cloned())
}

/// Insert a token, or replace the one with the same denom in place.
pub fn add_or_update(
    store: &mut dyn Storage,
    token: FeeTokenMetadata,
) -> Result<(), ContractError> {
    add_or_update_many(store, vec![token])
}

/// Batch form of `add_or_update`. The batch itself must not repeat a denom; if it does, or if any
/// entry is invalid, nothing is applied.
pub fn add_or_update_many(
    store: &mut dyn Storage,
    tokens: Vec<FeeTokenMetadata>,
) -> Result<(), ContractError> {
    let batch = FeeTokenMetadataCollection::new(tokens);
    batch.validate()?;

    let mut collection = list(store)?;
    for token in batch.items {
        collection.upsert(token);
    }

    save(store, &collection)
}

pub fn remove(store: &mut dyn Storage, denom: &str) -> Result<FeeTokenMetadata, ContractError> {
    let mut collection = list(store)?;
    let removed = collection.remove(denom).ok_or_else(|| ContractError::not_found(denom))?;

    save(store, &collection)?;

    Ok(removed)
}

/// Replace the whole registry. Tokens absent from `collection` are dropped along with their price
/// snapshots.
pub fn replace(
    store: &mut dyn Storage,
    collection: FeeTokenMetadataCollection,
) -> Result<(), ContractError> {
    save(store, &collection)
}

fn save(
    store: &mut dyn Storage,
    collection: &FeeTokenMetadataCollection,
) -> Result<(), ContractError> {
    collection.validate()?;

    if let Some(params) = PARAMS.may_load(store)? {
        if collection.contains(&params.native_denom) {
            return Err(ContractError::native_denom_as_fee_token(params.native_denom));
        }
    }

    // a reference price taken from another oracle denom says nothing about the new one
    let previous = list(store)?;
    for token in collection.iter() {
        let repointed = previous
            .get(&token.denom)
            .map_or(false, |existing| existing.oracle_denom != token.oracle_denom);
        if repointed {
            PRICE_SNAPSHOTS.remove(store, &token.denom);
        }
    }

    FEE_TOKENS.save(store, collection)?;
    prune_snapshots(store, collection)?;

    Ok(())
}

/// Drop the price snapshots of denoms that are not in `collection`.
pub fn prune_snapshots(
    store: &mut dyn Storage,
    collection: &FeeTokenMetadataCollection,
) -> StdResult<()> {
    let stale = PRICE_SNAPSHOTS
        .keys(store, None, None, Order::Ascending)
        .filter(|denom| denom.as_ref().map_or(true, |denom| !collection.contains(denom)))
        .collect::<StdResult<Vec<_>>>()?;

    for denom in &stale {
        PRICE_SNAPSHOTS.remove(store, denom);
    }

    Ok(())
}
