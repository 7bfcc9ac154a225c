use std::collections::BTreeSet;

use cosmwasm_std::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{is_valid_denom, ValidationError, MAX_FEE_TOKEN_DECIMALS};

/// A token accepted for paying EVM fees in place of the native denom.
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct FeeTokenMetadata {
    /// The bank denom the fee is charged in
    pub denom: String,
    /// The identifier of this token in the price oracle
    pub oracle_denom: String,
    /// Number of decimals of the token's base unit
    pub decimals: u8,
    /// If set, the token is not used whenever its implied price (native per token) falls below
    /// this floor
    pub minimum_fee_price: Option<Decimal>,
}

impl FeeTokenMetadata {
    pub fn new(
        denom: impl Into<String>,
        oracle_denom: impl Into<String>,
        decimals: u8,
        minimum_fee_price: Option<Decimal>,
    ) -> Self {
        FeeTokenMetadata {
            denom: denom.into(),
            oracle_denom: oracle_denom.into(),
            decimals,
            minimum_fee_price,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_denom(&self.denom) {
            return Err(ValidationError::invalid_fee_token(format!(
                "denom {} is invalid",
                self.denom
            )));
        }

        if !is_valid_denom(&self.oracle_denom) {
            return Err(ValidationError::invalid_fee_token(format!(
                "oracle denom {} is invalid",
                self.oracle_denom
            )));
        }

        if self.decimals > MAX_FEE_TOKEN_DECIMALS {
            return Err(ValidationError::invalid_fee_token(format!(
                "decimals {} exceed the maximum of {}",
                self.decimals, MAX_FEE_TOKEN_DECIMALS
            )));
        }

        Ok(())
    }
}

/// The ordered set of fee tokens. Order is registration order, which is also the order in which
/// tokens are tried when converting a fee.
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug, Default)]
pub struct FeeTokenMetadataCollection {
    pub items: Vec<FeeTokenMetadata>,
}

impl FeeTokenMetadataCollection {
    pub fn new(items: impl IntoIterator<Item = FeeTokenMetadata>) -> Self {
        FeeTokenMetadataCollection {
            items: items.into_iter().collect(),
        }
    }

    /// Every entry must be valid and no denom may appear twice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = BTreeSet::new();
        for token in &self.items {
            if !seen.insert(token.denom.as_str()) {
                return Err(ValidationError::duplicate_denom(&token.denom));
            }
            token.validate()?;
        }
        Ok(())
    }

    pub fn get(&self, denom: &str) -> Option<&FeeTokenMetadata> {
        self.items.iter().find(|token| token.denom == denom)
    }

    pub fn contains(&self, denom: &str) -> bool {
        self.get(denom).is_some()
    }

    /// Replace the entry with the same denom in place, or append the token at the end.
    pub fn upsert(&mut self, token: FeeTokenMetadata) {
        match self.items.iter_mut().find(|existing| existing.denom == token.denom) {
            Some(existing) => *existing = token,
            None => self.items.push(token),
        }
    }

    /// Remove the entry with the given denom, returning it if it existed.
    pub fn remove(&mut self, denom: &str) -> Option<FeeTokenMetadata> {
        let idx = self.items.iter().position(|token| token.denom == denom)?;
        Some(self.items.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeeTokenMetadata> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
