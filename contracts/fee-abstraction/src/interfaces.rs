use cosmwasm_std::{Addr, Binary, Coin, Decimal, StdResult, Storage, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The part of an account the ante handler cares about
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Account {
    pub address: Addr,
    /// Number of transactions sent from this account, i.e. the EVM nonce
    pub sequence: u64,
    /// Hash of the contract code deployed at this address, if any
    pub code_hash: Option<Binary>,
}

impl Account {
    pub fn new(address: Addr) -> Self {
        Account {
            address,
            sequence: 0,
            code_hash: None,
        }
    }

    pub fn is_contract(&self) -> bool {
        self.code_hash.as_ref().map_or(false, |hash| !hash.is_empty())
    }
}

pub trait AccountKeeper {
    fn account(&self, store: &dyn Storage, addr: &Addr) -> StdResult<Option<Account>>;

    fn new_account(&self, store: &mut dyn Storage, addr: &Addr) -> StdResult<Account>;

    fn set_account(&self, store: &mut dyn Storage, account: &Account) -> StdResult<()>;
}

pub trait BankKeeper {
    fn balance(&self, store: &dyn Storage, addr: &Addr, denom: &str) -> StdResult<Uint128>;

    /// Move `coin` from `from` to the fee collector. Fails if `from` cannot cover it.
    fn send_to_fee_collector(
        &self,
        store: &mut dyn Storage,
        from: &Addr,
        coin: &Coin,
    ) -> StdResult<()>;
}

pub trait FeeMarketKeeper {
    /// The current block's base fee, per unit of gas. `None` before London or with the fee
    /// market disabled.
    fn base_fee(&self, store: &dyn Storage) -> StdResult<Option<Uint128>>;

    /// The chain-wide minimum gas price
    fn min_gas_price(&self, store: &dyn Storage) -> StdResult<Decimal>;

    /// Add to the gas wanted by the block so far and return the new total.
    fn add_transient_gas_wanted(&self, store: &mut dyn Storage, gas: u64) -> StdResult<u64>;
}
