use std::fmt;

use cosmwasm_std::{Coin, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The fee actually charged for a transaction after conversion: either the native fee unchanged,
/// or the equivalent amount in one registered fee token. Never persisted.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema, Debug)]
pub struct ConvertedFee {
    pub denom: String,
    pub amount: Uint128,
}

impl ConvertedFee {
    pub fn new(denom: impl Into<String>, amount: impl Into<Uint128>) -> Self {
        ConvertedFee {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for ConvertedFee {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl From<ConvertedFee> for Coin {
    fn from(fee: ConvertedFee) -> Self {
        Coin {
            denom: fee.denom,
            amount: fee.amount,
        }
    }
}

impl From<Coin> for ConvertedFee {
    fn from(coin: Coin) -> Self {
        ConvertedFee {
            denom: coin.denom,
            amount: coin.amount,
        }
    }
}
