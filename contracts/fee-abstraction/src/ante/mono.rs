use cosmwasm_std::{Addr, Api, Decimal, Storage, Uint128};
use tracing::info;

use fee_abstraction::Params;

use crate::ante::checks::{
    can_transfer, check_block_gas_limit, check_gas_wanted, check_global_fee, check_mempool_fee,
    check_tx_fee, consume_fees_and_emit_event, emit_tx_hash_event, increment_nonce, msg_priority,
    setup_context, update_cumulative_gas_wanted, validate_msg, validate_tx, verify_account_exists,
    verify_fee, verify_signature, verify_value_balance,
};
use crate::ante::config::AnteConfig;
use crate::ante::context::AnteContext;
use crate::ante::error::{AnteError, AnteResult};
use crate::ante::tx::{MsgEthereumTx, Tx, TxMsg, TxType};
use crate::cache::CacheStorage;
use crate::convert::convert_native_fee;
use crate::interfaces::{Account, AccountKeeper, BankKeeper, FeeMarketKeeper};
use crate::oracle::PriceOracle;
use crate::state::PARAMS;

/// Values loaded once per transaction, and the totals aggregated across its messages
#[derive(Debug)]
struct DecoratorUtils {
    params: Params,
    base_fee: Option<Uint128>,
    global_min_gas_price: Decimal,
    gas_wanted: u64,
    min_priority: i64,
    /// Sum of the max fees of the messages, in the native denom
    tx_fee: Uint128,
    tx_gas_limit: u64,
}

impl DecoratorUtils {
    fn load(
        store: &dyn Storage,
        fee_market: &dyn FeeMarketKeeper,
        config: &AnteConfig,
    ) -> AnteResult<Self> {
        let base_fee = if config.london {
            fee_market.base_fee(store)?
        } else {
            None
        };

        Ok(DecoratorUtils {
            params: PARAMS.load(store)?,
            base_fee,
            global_min_gas_price: fee_market.min_gas_price(store)?,
            gas_wanted: 0,
            min_priority: i64::MAX,
            tx_fee: Uint128::zero(),
            tx_gas_limit: 0,
        })
    }
}

/// Runs every ante check of an Ethereum transaction in a single pass, charging the fee in the
/// native denom or, when the sender cannot cover it, in a registered fee token.
///
/// Only one Ethereum message per transaction is supported in practice. The checks run once per
/// message, but the gas wanted and the paid fees attached to the context assume a single message.
pub struct MonoDecorator<'a> {
    pub accounts: &'a dyn AccountKeeper,
    pub bank: &'a dyn BankKeeper,
    pub fee_market: &'a dyn FeeMarketKeeper,
    pub oracle: &'a dyn PriceOracle,
    pub config: AnteConfig,
}

impl<'a> MonoDecorator<'a> {
    pub fn new(
        accounts: &'a dyn AccountKeeper,
        bank: &'a dyn BankKeeper,
        fee_market: &'a dyn FeeMarketKeeper,
        oracle: &'a dyn PriceOracle,
        config: AnteConfig,
    ) -> Self {
        MonoDecorator {
            accounts,
            bank,
            fee_market,
            oracle,
            config,
        }
    }

    /// Check `tx`, charge its fee and hand over to `next`.
    ///
    /// Every write goes through a cache over `store`, committed only once `next` has succeeded as
    /// well. On error the store is left exactly as it was.
    pub fn ante_handle<N>(
        &self,
        ctx: AnteContext,
        store: &mut dyn Storage,
        api: &dyn Api,
        tx: &Tx,
        simulate: bool,
        next: N,
    ) -> AnteResult<AnteContext>
    where
        N: FnOnce(AnteContext, &mut dyn Storage, &Tx, bool) -> AnteResult<AnteContext>,
    {
        let mut cache = CacheStorage::new(store);

        let ctx = self.check(ctx, &mut cache, api, tx, simulate)?;
        let ctx = next(ctx, &mut cache, tx, simulate)?;

        cache.commit();

        Ok(ctx)
    }

    fn check(
        &self,
        ctx: AnteContext,
        store: &mut dyn Storage,
        api: &dyn Api,
        tx: &Tx,
        simulate: bool,
    ) -> AnteResult<AnteContext> {
        // the fee info was already validated when the tx first entered the mempool
        let fee_info = if ctx.is_recheck_tx() {
            None
        } else {
            Some(validate_tx(tx)?)
        };

        let mut ctx = setup_context(ctx);
        let mut utils = DecoratorUtils::load(store, self.fee_market, &self.config)?;

        for (index, msg) in tx.msgs.iter().enumerate() {
            let msg = match msg {
                TxMsg::Ethereum(msg) => msg,
                TxMsg::Cosmos {
                    type_url,
                } => {
                    return Err(AnteError::UnsupportedMsg {
                        type_url: type_url.clone(),
                    })
                },
            };

            ctx = self.check_msg(ctx, store, api, &mut utils, msg, index, simulate)?;
        }

        check_tx_fee(
            fee_info.as_ref(),
            &utils.params.native_denom,
            utils.tx_fee,
            utils.tx_gas_limit,
        )?;

        check_block_gas_limit(ctx, utils.gas_wanted, utils.min_priority)
    }

    #[allow(clippy::too_many_arguments)]
    fn check_msg(
        &self,
        ctx: AnteContext,
        store: &mut dyn Storage,
        api: &dyn Api,
        utils: &mut DecoratorUtils,
        msg: &MsgEthereumTx,
        index: usize,
        simulate: bool,
    ) -> AnteResult<AnteContext> {
        let eth_tx = &msg.tx;
        let gas = eth_tx.gas_limit;
        let max_fee = eth_tx.fee().ok_or_else(|| AnteError::invalid_gas("fee overflows"))?;

        if ctx.is_check_tx() && !simulate {
            check_mempool_fee(max_fee, ctx.mempool_min_gas_price, gas)?;
        }

        let fee = match (eth_tx.tx_type, utils.base_fee) {
            (TxType::DynamicFee, Some(base_fee)) => eth_tx
                .effective_fee(Some(base_fee))
                .ok_or_else(|| AnteError::invalid_gas("fee overflows"))?,
            _ => max_fee,
        };

        check_global_fee(fee, utils.global_min_gas_price, gas)?;

        validate_msg(&self.config, eth_tx)?;

        let from = verify_signature(api, &self.config, msg)?;

        verify_account_exists(store, self.accounts, &from)?;

        can_transfer(store, self.bank, &utils.params, eth_tx, utils.base_fee, &from)?;

        let native_fee = verify_fee(eth_tx, utils.base_fee)?;

        let paid_fees =
            convert_native_fee(store, self.bank, self.oracle, &from, native_fee, ctx.block.time)?;

        let ctx = consume_fees_and_emit_event(ctx, store, self.bank, &paid_fees, &from)?;

        // fees are considered paid at this point, only the value is left to cover
        verify_value_balance(store, self.bank, &utils.params, eth_tx, &from)?;

        utils.gas_wanted =
            update_cumulative_gas_wanted(&ctx, gas, self.config.max_gas_wanted, utils.gas_wanted);
        utils.min_priority = msg_priority(eth_tx, utils.min_priority, utils.base_fee);
        utils.tx_fee = utils
            .tx_fee
            .checked_add(max_fee)
            .map_err(|_| AnteError::invalid_gas("fee overflows"))?;
        utils.tx_gas_limit = utils.tx_gas_limit.saturating_add(gas);

        let account = self.load_account(store, &from)?;
        increment_nonce(store, self.accounts, account, eth_tx.nonce)?;

        check_gas_wanted(&ctx, store, self.fee_market, utils.gas_wanted, self.config.london)?;

        let ctx = emit_tx_hash_event(ctx, msg, index)?;

        info!(
            target: "fee_abstraction::ante",
            msg_index = index,
            from = %from,
            gas_wanted = utils.gas_wanted,
            gas_limit = gas,
            fee = %utils.tx_fee,
            min_priority = utils.min_priority,
            base_fee = ?utils.base_fee,
            tx_type = eth_tx.tx_type.as_u8(),
            paid_fees = %paid_fees,
            "processed EVM message"
        );

        Ok(ctx.with_paid_fees(paid_fees))
    }

    fn load_account(&self, store: &dyn Storage, from: &Addr) -> AnteResult<Account> {
        self.accounts.account(store, from)?.ok_or_else(|| AnteError::UnknownAddress {
            address: from.to_string(),
        })
    }
}
