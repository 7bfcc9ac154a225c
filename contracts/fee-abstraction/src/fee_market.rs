use cosmwasm_std::{Decimal, StdResult, Storage, Uint128};
use cw_storage_plus::Item;

use crate::interfaces::FeeMarketKeeper;

pub const BASE_FEE: Item<Uint128> = Item::new("fee_market_base_fee");

pub const MIN_GAS_PRICE: Item<Decimal> = Item::new("fee_market_min_gas_price");

/// Gas wanted by the transactions of the current block so far
pub const TRANSIENT_GAS_WANTED: Item<u64> = Item::new("fee_market_transient_gas_wanted");

/// Fee market keeper backed directly by the store
#[derive(Debug, Default, Clone, Copy)]
pub struct StoreFeeMarket;

impl StoreFeeMarket {
    pub fn reset_transient_gas_wanted(store: &mut dyn Storage) {
        TRANSIENT_GAS_WANTED.remove(store)
    }
}

impl FeeMarketKeeper for StoreFeeMarket {
    fn base_fee(&self, store: &dyn Storage) -> StdResult<Option<Uint128>> {
        BASE_FEE.may_load(store)
    }

    fn min_gas_price(&self, store: &dyn Storage) -> StdResult<Decimal> {
        Ok(MIN_GAS_PRICE.may_load(store)?.unwrap_or_default())
    }

    fn add_transient_gas_wanted(&self, store: &mut dyn Storage, gas: u64) -> StdResult<u64> {
        let total = TRANSIENT_GAS_WANTED.may_load(store)?.unwrap_or(0).saturating_add(gas);
        TRANSIENT_GAS_WANTED.save(store, &total)?;
        Ok(total)
    }
}
