use cosmwasm_std::{Addr, Coin, StdResult, Storage, Uint128};
use cw_storage_plus::Map;

use crate::interfaces::{Account, AccountKeeper, BankKeeper};

pub const ACCOUNTS: Map<&Addr, Account> = Map::new("accounts");

/// Balances, indexed by (holder, denom)
pub const BALANCES: Map<(&Addr, &str), Uint128> = Map::new("balances");

pub const DEFAULT_FEE_COLLECTOR: &str = "fee_collector";

/// Account and bank keeper backed directly by the store
#[derive(Debug, Clone)]
pub struct StoreBank {
    pub fee_collector: Addr,
}

impl Default for StoreBank {
    fn default() -> Self {
        StoreBank::new(Addr::unchecked(DEFAULT_FEE_COLLECTOR))
    }
}

impl StoreBank {
    pub fn new(fee_collector: Addr) -> Self {
        StoreBank {
            fee_collector,
        }
    }

    pub fn set_balance(
        store: &mut dyn Storage,
        addr: &Addr,
        denom: &str,
        amount: Uint128,
    ) -> StdResult<()> {
        if amount.is_zero() {
            BALANCES.remove(store, (addr, denom));
            Ok(())
        } else {
            BALANCES.save(store, (addr, denom), &amount)
        }
    }
}

impl AccountKeeper for StoreBank {
    fn account(&self, store: &dyn Storage, addr: &Addr) -> StdResult<Option<Account>> {
        ACCOUNTS.may_load(store, addr)
    }

    fn new_account(&self, store: &mut dyn Storage, addr: &Addr) -> StdResult<Account> {
        let account = Account::new(addr.clone());
        ACCOUNTS.save(store, addr, &account)?;
        Ok(account)
    }

    fn set_account(&self, store: &mut dyn Storage, account: &Account) -> StdResult<()> {
        ACCOUNTS.save(store, &account.address, account)
    }
}

impl BankKeeper for StoreBank {
    fn balance(&self, store: &dyn Storage, addr: &Addr, denom: &str) -> StdResult<Uint128> {
        Ok(BALANCES.may_load(store, (addr, denom))?.unwrap_or_default())
    }

    fn send_to_fee_collector(
        &self,
        store: &mut dyn Storage,
        from: &Addr,
        coin: &Coin,
    ) -> StdResult<()> {
        let from_balance = self.balance(store, from, &coin.denom)?.checked_sub(coin.amount)?;
        Self::set_balance(store, from, &coin.denom, from_balance)?;

        let collector_balance =
            self.balance(store, &self.fee_collector, &coin.denom)?.checked_add(coin.amount)?;
        Self::set_balance(store, &self.fee_collector, &coin.denom, collector_balance)
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::coin;
    use cosmwasm_std::testing::MockStorage;

    use super::*;

    #[test]
    fn sending_fees() {
        let mut store = MockStorage::new();
        let bank = StoreBank::default();
        let larry = Addr::unchecked("larry");

        StoreBank::set_balance(&mut store, &larry, "akii", Uint128::new(100)).unwrap();

        bank.send_to_fee_collector(&mut store, &larry, &coin(40, "akii")).unwrap();
        assert_eq!(bank.balance(&store, &larry, "akii").unwrap(), Uint128::new(60));
        assert_eq!(bank.balance(&store, &bank.fee_collector, "akii").unwrap(), Uint128::new(40));

        // cannot overdraw
        assert!(bank.send_to_fee_collector(&mut store, &larry, &coin(61, "akii")).is_err());
        assert_eq!(bank.balance(&store, &larry, "akii").unwrap(), Uint128::new(60));
    }
}
