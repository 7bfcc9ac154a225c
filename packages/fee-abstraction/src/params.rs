use cosmwasm_std::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{is_valid_denom, ValidationError};

pub const DEFAULT_NATIVE_DENOM: &str = "akii";
pub const DEFAULT_ORACLE_DENOM: &str = "kii";
pub const DEFAULT_TWAP_LOOKBACK_WINDOW: u64 = 600;

/// 10%
pub fn default_clamp_factor() -> Decimal {
    Decimal::percent(10)
}

pub fn default_fallback_native_price() -> Decimal {
    Decimal::one()
}

/// Configuration of the fee abstraction module. Only the module's authority can change it.
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Params {
    /// The chain's gas denom, the one EVM fees are quoted in
    pub native_denom: String,
    /// The identifier of the native token in the price oracle
    pub oracle_denom: String,
    /// The largest relative deviation between a fee token's implied price and its reference
    /// price for which the token is still accepted as fee payment
    pub clamp_factor: Decimal,
    /// The price used for the native token when the oracle has none
    pub fallback_native_price: Decimal,
    /// Length, in seconds, of the window the oracle averages prices over
    pub twap_lookback_window: u64,
    /// Whether fees may be paid in anything other than the native denom
    pub enabled: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            native_denom: DEFAULT_NATIVE_DENOM.to_string(),
            oracle_denom: DEFAULT_ORACLE_DENOM.to_string(),
            clamp_factor: default_clamp_factor(),
            fallback_native_price: default_fallback_native_price(),
            twap_lookback_window: DEFAULT_TWAP_LOOKBACK_WINDOW,
            enabled: true,
        }
    }
}

impl Params {
    pub fn new(
        native_denom: impl Into<String>,
        oracle_denom: impl Into<String>,
        clamp_factor: Decimal,
        fallback_native_price: Decimal,
        twap_lookback_window: u64,
        enabled: bool,
    ) -> Self {
        Params {
            native_denom: native_denom.into(),
            oracle_denom: oracle_denom.into(),
            clamp_factor,
            fallback_native_price,
            twap_lookback_window,
            enabled,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_denom(&self.native_denom) {
            return Err(ValidationError::invalid_params("native denom is invalid"));
        }

        if !is_valid_denom(&self.oracle_denom) {
            return Err(ValidationError::invalid_params("oracle denom is invalid"));
        }

        if self.clamp_factor.is_zero() {
            return Err(ValidationError::invalid_params("clamp factor must be positive"));
        }

        if self.fallback_native_price.is_zero() {
            return Err(ValidationError::invalid_params("fallback native price must be positive"));
        }

        Ok(())
    }
}
