use cosmwasm_std::{Decimal, Order, StdResult, Storage, Timestamp};
use cw_storage_plus::{Bound, Map};

use fee_abstraction::{FeeTokenMetadata, Params};

/// Price observations of the oracle module, indexed by (oracle denom, unix seconds). Prices are
/// quoted in a common unit shared by every denom.
pub const PRICE_HISTORY: Map<(&str, u64), Decimal> = Map::new("oracle_price_history");

/// Source of token prices. Backed by on-chain state: a plain store read, never I/O.
pub trait PriceOracle {
    /// The time-weighted average price of `denom` over the `lookback_window` seconds ending at
    /// `now`. `None` means the oracle has no usable price.
    fn price(
        &self,
        store: &dyn Storage,
        denom: &str,
        lookback_window: u64,
        now: Timestamp,
    ) -> Option<Decimal>;
}

/// Oracle adapter computing TWAPs over the observations in `PRICE_HISTORY`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TwapOracle;

impl TwapOracle {
    pub fn record_price(
        store: &mut dyn Storage,
        denom: &str,
        time: Timestamp,
        price: Decimal,
    ) -> StdResult<()> {
        PRICE_HISTORY.save(store, (denom, time.seconds()), &price)
    }

    fn latest_at_or_before(store: &dyn Storage, denom: &str, time: u64) -> Option<(u64, Decimal)> {
        PRICE_HISTORY
            .prefix(denom)
            .range(store, None, Some(Bound::inclusive(time)), Order::Descending)
            .next()
            .and_then(|item| item.ok())
    }

    fn twap(store: &dyn Storage, denom: &str, window: u64, now: u64) -> Option<Decimal> {
        let start = now.saturating_sub(window);

        // an observation made before the window that is still current when the window opens
        // counts from the window start
        let mut points: Vec<(u64, Decimal)> = Self::latest_at_or_before(store, denom, start)
            .map(|(_, price)| (start, price))
            .into_iter()
            .collect();

        let in_window = PRICE_HISTORY
            .prefix(denom)
            .range(
                store,
                Some(Bound::exclusive(start)),
                Some(Bound::inclusive(now)),
                Order::Ascending,
            )
            .collect::<StdResult<Vec<_>>>()
            .ok()?;
        points.extend(in_window);

        let (first_time, _) = *points.first()?;
        let total = now - first_time;
        if total == 0 {
            return points.last().map(|(_, price)| *price);
        }

        let mut weighted = Decimal::zero();
        for (idx, (time, price)) in points.iter().enumerate() {
            let until = points.get(idx + 1).map(|(next, _)| *next).unwrap_or(now);
            let duration = Decimal::from_ratio(until - time, 1u128);
            weighted = weighted.checked_add(price.checked_mul(duration).ok()?).ok()?;
        }

        weighted.checked_div(Decimal::from_ratio(total, 1u128)).ok()
    }
}

impl PriceOracle for TwapOracle {
    fn price(
        &self,
        store: &dyn Storage,
        denom: &str,
        lookback_window: u64,
        now: Timestamp,
    ) -> Option<Decimal> {
        let now = now.seconds();
        let price = if lookback_window == 0 {
            Self::latest_at_or_before(store, denom, now).map(|(_, price)| price)
        } else {
            Self::twap(store, denom, lookback_window, now)
        };
        price.filter(|price| !price.is_zero())
    }
}

/// The exchange rate of a fee token, in native tokens per token (whole units on both sides).
///
/// If the oracle has no price for the native token, the configured fallback price is used in its
/// place. If it has no price for the fee token itself, there is no rate.
pub fn implied_price(
    store: &dyn Storage,
    oracle: &dyn PriceOracle,
    params: &Params,
    token: &FeeTokenMetadata,
    now: Timestamp,
) -> Option<Decimal> {
    let token_price = oracle.price(store, &token.oracle_denom, params.twap_lookback_window, now)?;

    let native_price = oracle
        .price(store, &params.oracle_denom, params.twap_lookback_window, now)
        .unwrap_or(params.fallback_native_price);

    token_price.checked_div(native_price).ok()
}
