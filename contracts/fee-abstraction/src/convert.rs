use cosmwasm_std::{coin, Addr, Decimal, StdResult, Storage, Timestamp, Uint128};
use tracing::debug;

use fee_abstraction::{ConvertedFee, FeeTokenMetadata};

use crate::error::ContractError;
use crate::helpers::{exceeds_clamp, native_to_token_amount};
use crate::interfaces::BankKeeper;
use crate::oracle::{implied_price, PriceOracle};
use crate::registry;
use crate::state::{PARAMS, PRICE_SNAPSHOTS};

/// A registered fee token, together with everything needed to decide whether a payer can use it:
/// its current implied price, the reference price the clamp is measured against, and the payer's
/// balance.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub token: FeeTokenMetadata,
    pub price: Option<Decimal>,
    pub reference_price: Option<Decimal>,
    pub balance: Uint128,
}

/// Pick the first candidate, in the given order, that is acceptably priced and whose balance covers
/// the converted fee. Candidates without a price, below their price floor, or outside the clamp
/// band around their reference price are skipped regardless of balance.
pub fn select_fee_token(
    candidates: impl IntoIterator<Item = Candidate>,
    native_fee: Uint128,
    clamp_factor: Decimal,
) -> Option<ConvertedFee> {
    candidates
        .into_iter()
        .find_map(|candidate| evaluate(&candidate, native_fee, clamp_factor))
}

fn evaluate(
    candidate: &Candidate,
    native_fee: Uint128,
    clamp_factor: Decimal,
) -> Option<ConvertedFee> {
    let denom = &candidate.token.denom;

    let Some(price) = candidate.price else {
        debug!(
            target: "fee_abstraction::convert",
            denom = %denom,
            "skipping fee token: no oracle price"
        );
        return None;
    };

    if let Some(floor) = candidate.token.minimum_fee_price {
        if price < floor {
            debug!(
                target: "fee_abstraction::convert",
                denom = %denom,
                %price,
                %floor,
                "skipping fee token: price below floor"
            );
            return None;
        }
    }

    if let Some(reference) = candidate.reference_price {
        if exceeds_clamp(price, reference, clamp_factor) {
            debug!(
                target: "fee_abstraction::convert",
                denom = %denom,
                %price,
                %reference,
                "skipping fee token: price outside clamp"
            );
            return None;
        }
    }

    let amount = native_to_token_amount(native_fee, price, candidate.token.decimals)?;
    if candidate.balance < amount {
        return None;
    }

    Some(ConvertedFee::new(denom.clone(), amount))
}

/// Decide which denom, and how much of it, `payer` is charged for a fee of `native_fee` in the
/// native denom. Does not move any funds.
///
/// The native denom is always preferred; the registry and the oracle are only consulted when the
/// native balance falls short.
pub fn convert_native_fee(
    store: &dyn Storage,
    bank: &dyn BankKeeper,
    oracle: &dyn PriceOracle,
    payer: &Addr,
    native_fee: Uint128,
    now: Timestamp,
) -> Result<ConvertedFee, ContractError> {
    let params = PARAMS.load(store)?;

    let native_balance = bank.balance(store, payer, &params.native_denom)?;
    if native_balance >= native_fee {
        return Ok(ConvertedFee::new(params.native_denom, native_fee));
    }

    let insufficient =
        || ContractError::insufficient_funds(coin(native_fee.u128(), &params.native_denom));

    if !params.enabled {
        return Err(insufficient());
    }

    let candidates = registry::list(store)?
        .items
        .into_iter()
        .map(|token| -> StdResult<_> {
            Ok(Candidate {
                price: implied_price(store, oracle, &params, &token, now),
                reference_price: PRICE_SNAPSHOTS.may_load(store, &token.denom)?,
                balance: bank.balance(store, payer, &token.denom)?,
                token,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    let converted =
        select_fee_token(candidates, native_fee, params.clamp_factor).ok_or_else(insufficient)?;

    debug!(
        target: "fee_abstraction::convert",
        payer = %payer,
        native_fee = %native_fee,
        paid = %converted,
        "converted native fee"
    );

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        denom: &str,
        price: Option<u64>,
        reference: Option<u64>,
        balance: u128,
    ) -> Candidate {
        Candidate {
            token: FeeTokenMetadata::new(denom, denom, 18, None),
            price: price.map(Decimal::percent),
            reference_price: reference.map(Decimal::percent),
            balance: Uint128::new(balance),
        }
    }

    #[test]
    fn first_sufficient_candidate_wins() {
        let candidates = vec![
            candidate("aaa", Some(10), None, 100),  // needs 500
            candidate("bbb", Some(10), None, 1000), // needs 500
            candidate("ccc", Some(100), None, 1000), // needs 50
        ];

        let fee = select_fee_token(candidates.clone(), Uint128::new(50), Decimal::percent(10));
        assert_eq!(fee, Some(ConvertedFee::new("bbb", 500u128)));

        // same inputs, same answer
        let again = select_fee_token(candidates, Uint128::new(50), Decimal::percent(10));
        assert_eq!(fee, again);
    }

    #[test]
    fn unpriced_candidates_are_skipped() {
        let candidates =
            vec![candidate("aaa", None, None, u128::MAX), candidate("bbb", Some(100), None, 50)];

        let fee = select_fee_token(candidates, Uint128::new(50), Decimal::percent(10));
        assert_eq!(fee, Some(ConvertedFee::new("bbb", 50u128)));
    }

    #[test]
    fn clamp_disqualifies_despite_balance() {
        // price moved from 1.00 to 1.50 against a 10% clamp
        let candidates = vec![candidate("aaa", Some(150), Some(100), u128::MAX)];
        assert_eq!(select_fee_token(candidates, Uint128::new(50), Decimal::percent(10)), None);

        // within the band
        let candidates = vec![candidate("aaa", Some(105), Some(100), u128::MAX)];
        assert!(select_fee_token(candidates, Uint128::new(50), Decimal::percent(10)).is_some());
    }

    #[test]
    fn price_floor_disqualifies() {
        let mut below_floor = candidate("aaa", Some(10), None, u128::MAX);
        below_floor.token.minimum_fee_price = Some(Decimal::percent(20));

        let fee = select_fee_token(vec![below_floor], Uint128::new(50), Decimal::percent(10));
        assert_eq!(fee, None);
    }
}
