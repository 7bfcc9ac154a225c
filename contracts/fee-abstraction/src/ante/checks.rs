//! The individual stages of the EVM ante pipeline. Each stage either returns a value (an updated
//! context, a fee, an account) or a typed error; none of them retries or swallows a failure.

use cosmwasm_std::{Addr, Api, Coin, Decimal, Event, Storage, Uint128};

use fee_abstraction::{ConvertedFee, Params};

use crate::ante::config::AnteConfig;
use crate::ante::context::{AnteContext, GasMeter};
use crate::ante::error::{AnteError, AnteResult};
use crate::ante::tx::{
    address_from_pubkey, sign_hash, EthTx, MsgEthereumTx, Tx, TxFeeInfo, TxMsg, TxType,
};
use crate::helpers::mul_dec_ceil;
use crate::interfaces::{Account, AccountKeeper, BankKeeper, FeeMarketKeeper};

pub const TX_GAS: u64 = 21_000;
pub const COMPRESSED_PUBKEY_LEN: usize = 33;
pub const TX_GAS_CONTRACT_CREATION: u64 = 53_000;
pub const TX_DATA_ZERO_GAS: u64 = 4;
pub const TX_DATA_NON_ZERO_GAS: u64 = 16;

/// Tips are divided by this to obtain a transaction priority
pub const PRIORITY_REDUCTION: u128 = 1_000_000;

/// Basic, stateless validation of the envelope. Returns the cosmos-side fee info.
pub fn validate_tx(tx: &Tx) -> AnteResult<TxFeeInfo> {
    if tx.msgs.is_empty() {
        return Err(AnteError::invalid_tx("transaction has no messages"));
    }

    for msg in &tx.msgs {
        if let TxMsg::Cosmos {
            type_url,
        } = msg
        {
            return Err(AnteError::UnsupportedMsg {
                type_url: type_url.clone(),
            });
        }
    }

    let fee = tx.fee.clone().ok_or_else(|| AnteError::invalid_tx("missing fee info"))?;
    if fee.amount.iter().any(|coin| coin.amount.is_zero()) {
        return Err(AnteError::invalid_tx_fee("fee contains a zero coin"));
    }

    Ok(fee)
}

/// Give the transaction an infinite gas meter and reset the EVM gas used. Gas is accounted for by
/// the EVM itself, not the cosmos meter.
pub fn setup_context(ctx: AnteContext) -> AnteContext {
    ctx.with_gas_meter(GasMeter::infinite()).with_transient_gas_used(0)
}

/// The fee must meet the validator's local minimum gas price.
pub fn check_mempool_fee(fee: Uint128, min_gas_price: Decimal, gas_limit: u64) -> AnteResult<()> {
    check_min_fee(fee, min_gas_price, gas_limit)
}

/// The fee must meet the chain-wide minimum gas price.
pub fn check_global_fee(
    fee: Uint128,
    global_min_gas_price: Decimal,
    gas_limit: u64,
) -> AnteResult<()> {
    if global_min_gas_price.is_zero() {
        return Ok(());
    }
    check_min_fee(fee, global_min_gas_price, gas_limit)
}

fn check_min_fee(fee: Uint128, min_gas_price: Decimal, gas_limit: u64) -> AnteResult<()> {
    let required = mul_dec_ceil(Uint128::from(gas_limit), min_gas_price)
        .ok_or_else(|| AnteError::invalid_gas("required fee overflows"))?;

    if fee < required {
        return Err(AnteError::insufficient_fee(fee, required));
    }

    Ok(())
}

/// Stateless checks of the transaction contents against the chain config.
pub fn validate_msg(config: &AnteConfig, tx: &EthTx) -> AnteResult<()> {
    if tx.is_contract_creation() && !config.enable_create {
        return Err(AnteError::CreateDisabled);
    }

    if !tx.is_contract_creation() && !config.enable_call {
        return Err(AnteError::CallDisabled);
    }

    if tx.gas_limit == 0 {
        return Err(AnteError::invalid_gas("gas limit must not be zero"));
    }

    match tx.tx_type {
        TxType::DynamicFee => {
            if tx.gas_tip_cap > tx.gas_fee_cap {
                return Err(AnteError::invalid_gas(format!(
                    "max priority fee per gas {} higher than max fee per gas {}",
                    tx.gas_tip_cap, tx.gas_fee_cap
                )));
            }
        },
        TxType::Legacy | TxType::AccessList => {
            if tx.gas_price.is_zero() {
                return Err(AnteError::invalid_gas("gas price must not be zero"));
            }
        },
    }

    if tx.fee().is_none() {
        return Err(AnteError::invalid_gas("fee overflows"));
    }

    Ok(())
}

/// Check chain-id replay protection and the secp256k1 signature, and that `from` is the address of
/// the signing key. Returns the sender address.
pub fn verify_signature(
    api: &dyn Api,
    config: &AnteConfig,
    msg: &MsgEthereumTx,
) -> AnteResult<Addr> {
    match msg.tx.chain_id {
        None if !config.allow_unprotected_txs => return Err(AnteError::UnprotectedTx),
        Some(chain_id) if chain_id != config.chain_id => {
            return Err(AnteError::InvalidChainId {
                expected: config.chain_id,
                found: chain_id,
            });
        },
        _ => (),
    }

    // one key, one address: only the compressed encoding is accepted
    if msg.pubkey.len() != COMPRESSED_PUBKEY_LEN {
        return Err(AnteError::InvalidPubkey {
            length: msg.pubkey.len(),
        });
    }

    let hash = sign_hash(&msg.tx)?;
    if !api.secp256k1_verify(&hash, &msg.signature, &msg.pubkey)? {
        return Err(AnteError::InvalidSignature);
    }

    let signer = address_from_pubkey(&msg.pubkey);
    if signer != msg.from.to_lowercase() {
        return Err(AnteError::SenderMismatch {
            from: msg.from.clone(),
            signer,
        });
    }

    Ok(Addr::unchecked(signer))
}

/// Create the sender's account if it does not exist yet. A sender with deployed code is rejected
/// (EIP-3607).
pub fn verify_account_exists(
    store: &mut dyn Storage,
    accounts: &dyn AccountKeeper,
    from: &Addr,
) -> AnteResult<Account> {
    let account = match accounts.account(store, from)? {
        Some(account) => account,
        None => accounts.new_account(store, from)?,
    };

    if account.is_contract() {
        return Err(AnteError::SenderNotEoa {
            address: from.to_string(),
        });
    }

    Ok(account)
}

/// The fee cap must cover the base fee, and the native balance must cover the value transferred.
/// Fees are not considered here.
pub fn can_transfer(
    store: &dyn Storage,
    bank: &dyn BankKeeper,
    params: &Params,
    tx: &EthTx,
    base_fee: Option<Uint128>,
    from: &Addr,
) -> AnteResult<()> {
    if let (TxType::DynamicFee, Some(base_fee)) = (tx.tx_type, base_fee) {
        if tx.gas_fee_cap < base_fee {
            return Err(AnteError::insufficient_fee(tx.gas_fee_cap, base_fee));
        }
    }

    verify_value_balance(store, bank, params, tx, from)
}

/// Gas needed before any execution: the base cost plus the cost of the calldata.
pub fn intrinsic_gas(tx: &EthTx) -> u64 {
    let base = if tx.is_contract_creation() {
        TX_GAS_CONTRACT_CREATION
    } else {
        TX_GAS
    };

    tx.data.iter().fold(base, |gas, byte| {
        gas.saturating_add(if *byte == 0 {
            TX_DATA_ZERO_GAS
        } else {
            TX_DATA_NON_ZERO_GAS
        })
    })
}

/// Check the gas limit covers the intrinsic gas and compute the native fee owed: the effective gas
/// price times the gas limit.
pub fn verify_fee(tx: &EthTx, base_fee: Option<Uint128>) -> AnteResult<Uint128> {
    let intrinsic = intrinsic_gas(tx);
    if tx.gas_limit < intrinsic {
        return Err(AnteError::out_of_gas("intrinsic gas", tx.gas_limit, intrinsic));
    }

    if let Some(base_fee) = base_fee {
        if tx.fee_cap() < base_fee {
            return Err(AnteError::insufficient_fee(tx.fee_cap(), base_fee));
        }
    }

    tx.effective_fee(base_fee).ok_or_else(|| AnteError::invalid_gas("fee overflows"))
}

/// Charge the converted fee to the sender and record it as an event.
pub fn consume_fees_and_emit_event(
    ctx: AnteContext,
    store: &mut dyn Storage,
    bank: &dyn BankKeeper,
    fee: &ConvertedFee,
    from: &Addr,
) -> AnteResult<AnteContext> {
    if fee.is_zero() {
        return Ok(ctx);
    }

    let coin = Coin::from(fee.clone());
    let balance = bank.balance(store, from, &coin.denom)?;
    if balance < coin.amount {
        return Err(AnteError::insufficient_funds(&coin.denom, balance, coin.amount));
    }

    bank.send_to_fee_collector(store, from, &coin)?;

    Ok(ctx.with_event(
        Event::new("tx")
            .add_attribute("fee", coin.to_string())
            .add_attribute("fee_payer", from.to_string()),
    ))
}

/// After the fee is paid, the native balance must still cover the value transferred.
pub fn verify_value_balance(
    store: &dyn Storage,
    bank: &dyn BankKeeper,
    params: &Params,
    tx: &EthTx,
    from: &Addr,
) -> AnteResult<()> {
    let balance = bank.balance(store, from, &params.native_denom)?;
    if balance < tx.value {
        return Err(AnteError::insufficient_funds(&params.native_denom, balance, tx.value));
    }
    Ok(())
}

/// In CheckTx, a message's gas above `max_gas_wanted` (if non-zero) only counts as
/// `max_gas_wanted`, so a single large transaction cannot crowd the mempool out.
pub fn update_cumulative_gas_wanted(
    ctx: &AnteContext,
    gas: u64,
    max_gas_wanted: u64,
    cumulative: u64,
) -> u64 {
    let gas = if ctx.is_check_tx() && max_gas_wanted != 0 && gas > max_gas_wanted {
        max_gas_wanted
    } else {
        gas
    };
    cumulative.saturating_add(gas)
}

/// The lower of the current minimum and this message's priority
pub fn msg_priority(tx: &EthTx, min_priority: i64, base_fee: Option<Uint128>) -> i64 {
    let tip = tx.effective_gas_tip(base_fee).u128() / PRIORITY_REDUCTION;
    let priority = i64::try_from(tip).unwrap_or(i64::MAX);
    priority.min(min_priority)
}

/// The transaction nonce must match the account sequence, which is then incremented.
pub fn increment_nonce(
    store: &mut dyn Storage,
    accounts: &dyn AccountKeeper,
    account: Account,
    tx_nonce: u64,
) -> AnteResult<()> {
    if tx_nonce != account.sequence {
        return Err(AnteError::InvalidNonce {
            expected: account.sequence,
            got: tx_nonce,
        });
    }

    let sequence = account.sequence.checked_add(1).ok_or_else(|| AnteError::NonceMax {
        address: account.address.to_string(),
    })?;
    let account = Account {
        sequence,
        ..account
    };
    accounts.set_account(store, &account)?;

    Ok(())
}

/// Under London rules the gas wanted must fit in a block, and is added to the block's total.
pub fn check_gas_wanted(
    ctx: &AnteContext,
    store: &mut dyn Storage,
    fee_market: &dyn FeeMarketKeeper,
    gas_wanted: u64,
    london: bool,
) -> AnteResult<()> {
    if !london {
        return Ok(());
    }

    if let Some(limit) = ctx.block_gas_limit {
        if gas_wanted > limit {
            return Err(AnteError::GasWantedExceeded {
                gas_wanted,
                limit,
            });
        }
    }

    fee_market.add_transient_gas_wanted(store, gas_wanted)?;

    Ok(())
}

pub fn emit_tx_hash_event(
    ctx: AnteContext,
    msg: &MsgEthereumTx,
    msg_index: usize,
) -> AnteResult<AnteContext> {
    Ok(ctx.with_event(
        Event::new("ethereum_tx")
            .add_attribute("tx_hash", msg.hash()?)
            .add_attribute("msg_index", msg_index.to_string()),
    ))
}

/// The cosmos-side fee info must agree with the sum of the messages' fees and gas limits. The fee
/// info is absent on ReCheckTx, in which case there is nothing to compare.
pub fn check_tx_fee(
    fee_info: Option<&TxFeeInfo>,
    native_denom: &str,
    tx_fee: Uint128,
    tx_gas_limit: u64,
) -> AnteResult<()> {
    let Some(fee_info) = fee_info else {
        return Ok(());
    };

    let declared = fee_info
        .amount
        .iter()
        .filter(|coin| coin.denom == native_denom)
        .fold(Uint128::zero(), |total, coin| total.saturating_add(coin.amount));

    if declared != tx_fee {
        return Err(AnteError::invalid_tx_fee(format!(
            "invalid fee: expected {}, got {}",
            tx_fee, declared
        )));
    }

    if fee_info.gas_limit != tx_gas_limit {
        return Err(AnteError::invalid_tx_fee(format!(
            "invalid gas limit: expected {}, got {}",
            tx_gas_limit, fee_info.gas_limit
        )));
    }

    Ok(())
}

/// The gas wanted must fit in a block. Sets the transaction's priority and bounds its gas meter by
/// the gas it asked for.
pub fn check_block_gas_limit(
    ctx: AnteContext,
    gas_wanted: u64,
    min_priority: i64,
) -> AnteResult<AnteContext> {
    if let Some(limit) = ctx.block_gas_limit {
        if gas_wanted > limit {
            return Err(AnteError::out_of_gas("block gas limit", limit, gas_wanted));
        }
    }

    Ok(ctx.with_priority(min_priority).with_gas_meter(GasMeter::with_limit(gas_wanted)))
}
