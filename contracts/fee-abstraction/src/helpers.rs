use cosmwasm_std::{Addr, Decimal, Storage, Uint128, Uint256};

use fee_abstraction::msg::assert_non_empty_address;
use fee_abstraction::EVM_NATIVE_DECIMALS;

use crate::error::ContractError;
use crate::state::AUTHORITY;

/// Assert that the signer of a governance message is the module's authority.
pub fn assert_authority(store: &dyn Storage, authority: &str) -> Result<Addr, ContractError> {
    assert_non_empty_address(authority)?;

    let expected = AUTHORITY.load(store)?;
    if expected != authority {
        return Err(ContractError::unauthorized(expected, authority));
    }

    Ok(expected)
}

fn pow10(exp: u32) -> Uint256 {
    Uint256::from(10u128.pow(exp))
}

fn ceil_div(numerator: Uint256, denominator: Uint256) -> Option<Uint256> {
    if denominator.is_zero() {
        return None;
    }
    let quotient = numerator.checked_div(denominator).ok()?;
    if (quotient.checked_mul(denominator).ok()?) < numerator {
        quotient.checked_add(Uint256::from(1u128)).ok()
    } else {
        Some(quotient)
    }
}

/// `amount * price`, rounded up. `None` if the result does not fit in 128 bits.
pub fn mul_dec_ceil(amount: Uint128, price: Decimal) -> Option<Uint128> {
    let numerator = Uint256::from(amount).checked_mul(Uint256::from(price.atomics())).ok()?;
    let product = ceil_div(numerator, pow10(Decimal::DECIMAL_PLACES))?;
    Uint128::try_from(product).ok()
}

/// How many base units of a token with `decimals` decimals are worth `native_fee` base units of
/// the native token, given the token's price in native tokens per token (both in whole units).
///
/// amount = ceil(native_fee * 10^decimals / (price * 10^native_decimals))
///
/// Rounds up so that the chain is never paid less than the native fee is worth. Returns `None`
/// for a zero price or if the amount does not fit in 128 bits.
pub fn native_to_token_amount(
    native_fee: Uint128,
    price: Decimal,
    decimals: u8,
) -> Option<Uint128> {
    if price.is_zero() {
        return None;
    }

    let numerator = Uint256::from(native_fee)
        .checked_mul(pow10(decimals as u32))
        .ok()?
        .checked_mul(pow10(Decimal::DECIMAL_PLACES))
        .ok()?;
    let denominator = Uint256::from(price.atomics())
        .checked_mul(pow10(EVM_NATIVE_DECIMALS as u32))
        .ok()?;

    let amount = ceil_div(numerator, denominator)?;
    Uint128::try_from(amount).ok()
}

/// Whether `price` deviates from `reference` by strictly more than `clamp_factor`, relative to the
/// reference. A zero reference carries no information, so nothing exceeds it.
pub fn exceeds_clamp(price: Decimal, reference: Decimal, clamp_factor: Decimal) -> bool {
    if reference.is_zero() {
        return false;
    }

    let deviation = if price > reference {
        price - reference
    } else {
        reference - price
    };

    match reference.checked_mul(clamp_factor) {
        Ok(tolerance) => deviation > tolerance,
        // the tolerance is larger than any representable deviation
        Err(_) => false,
    }
}

/// Move `reference` toward `price` by at most `clamp_factor` (relative to the reference).
pub fn clamp_price(price: Decimal, reference: Decimal, clamp_factor: Decimal) -> Decimal {
    if reference.is_zero() {
        return price;
    }

    let tolerance = reference.checked_mul(clamp_factor).unwrap_or(Decimal::MAX);
    let lower = reference.checked_sub(tolerance).unwrap_or_else(|_| Decimal::zero());
    let upper = reference.checked_add(tolerance).unwrap_or(Decimal::MAX);

    price.clamp(lower, upper)
}
