#![allow(dead_code)]

use cosmwasm_std::testing::{mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{Addr, Binary, Decimal, Empty, Env, OwnedDeps, Storage, Timestamp, Uint128};
use k256::ecdsa::{signature::Signer, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

use fee_abstraction::{FeeTokenMetadata, FeeTokenMetadataCollection, Params};
use fee_abstraction_module::ante::tx::{address_from_pubkey, EthTx, MsgEthereumTx, TxType};
use fee_abstraction_module::bank::StoreBank;
use fee_abstraction_module::execute;
use fee_abstraction_module::oracle::TwapOracle;

pub const MOCK_PRIVKEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

pub const AUTHORITY: &str = "gov";

/// Oracle observations are recorded at this time, well before `NOW`, so the TWAP is flat
pub const PRICED_AT: u64 = 1000;

pub const NOW: u64 = 10000;

/// Return the private key based on the hex-encoded `MOCK_PRIVKEY`
pub fn mock_privkey() -> SigningKey {
    let privkey_bytes = hex::decode(MOCK_PRIVKEY).unwrap();
    SigningKey::from_bytes(&privkey_bytes).unwrap()
}

/// Generate a random private key
pub fn random_privkey() -> SigningKey {
    SigningKey::random(&mut OsRng)
}

pub fn pubkey_bytes(privkey: &SigningKey) -> Vec<u8> {
    VerifyingKey::from(privkey).to_bytes().to_vec()
}

/// The 65-byte uncompressed encoding of the same key
pub fn uncompressed_pubkey_bytes(privkey: &SigningKey) -> Vec<u8> {
    VerifyingKey::from(privkey).to_encoded_point(false).as_bytes().to_vec()
}

/// The account address controlled by the private key
pub fn address(privkey: &SigningKey) -> Addr {
    Addr::unchecked(address_from_pubkey(&pubkey_bytes(privkey)))
}

/// Sign a transaction using the provided privkey, and wrap it as a chain message
pub fn sign_tx(privkey: &SigningKey, tx: EthTx) -> MsgEthereumTx {
    let sig: Signature = privkey.sign(&tx.sign_bytes().unwrap());
    MsgEthereumTx {
        from: address(privkey).to_string(),
        pubkey: Binary::from(pubkey_bytes(privkey)),
        signature: Binary::from(sig.as_ref().to_vec()),
        tx,
    }
}

/// A dynamic fee transfer of `value` paying 1 per gas, for 21000 gas
pub fn mock_eth_tx(nonce: u64, value: u128) -> EthTx {
    EthTx {
        tx_type: TxType::DynamicFee,
        chain_id: Some(1336),
        nonce,
        gas_limit: 21_000,
        gas_price: Uint128::zero(),
        gas_fee_cap: Uint128::new(1),
        gas_tip_cap: Uint128::zero(),
        to: Some("0x00000000000000000000000000000000000000aa".to_string()),
        value: Uint128::new(value),
        data: Binary::default(),
    }
}

/// Return an `env` object at the specified UNIX timestamp
pub fn mock_env_at_timestamp(timestamp: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(timestamp);
    env
}

pub fn usdt() -> FeeTokenMetadata {
    FeeTokenMetadata::new("usdt", "usdt", 18, None)
}

pub fn coin_token() -> FeeTokenMetadata {
    FeeTokenMetadata::new("coin", "coin", 6, None)
}

pub fn record_price(store: &mut dyn Storage, denom: &str, price: Decimal) {
    TwapOracle::record_price(store, denom, Timestamp::from_seconds(PRICED_AT), price).unwrap();
}

pub fn set_balance(store: &mut dyn Storage, addr: &Addr, denom: &str, amount: u128) {
    StoreBank::set_balance(store, addr, denom, Uint128::new(amount)).unwrap();
}

/// Default params, a single `usdt` fee token, the native token priced at 1 and usdt at 0.1
pub fn setup_test() -> OwnedDeps<MockStorage, MockApi, MockQuerier, Empty> {
    let mut deps = mock_dependencies();

    execute::init(
        deps.as_mut(),
        Addr::unchecked(AUTHORITY),
        Params::default(),
        FeeTokenMetadataCollection::new(vec![usdt()]),
    )
    .unwrap();

    record_price(deps.as_mut().storage, "kii", Decimal::one());
    record_price(deps.as_mut().storage, "usdt", Decimal::percent(10));

    deps
}
