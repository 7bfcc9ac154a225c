use std::cmp;

use cosmwasm_std::{to_vec, Binary, Coin, StdResult, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum TxType {
    Legacy,
    AccessList,
    DynamicFee,
}

impl TxType {
    pub fn as_u8(&self) -> u8 {
        match self {
            TxType::Legacy => 0,
            TxType::AccessList => 1,
            TxType::DynamicFee => 2,
        }
    }
}

/// The signed payload of an Ethereum transaction
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct EthTx {
    pub tx_type: TxType,
    /// `None` for an unprotected (pre EIP-155) transaction
    pub chain_id: Option<u64>,
    pub nonce: u64,
    pub gas_limit: u64,
    /// Price per gas of legacy and access list transactions
    pub gas_price: Uint128,
    /// Max price per gas of a dynamic fee transaction
    pub gas_fee_cap: Uint128,
    /// Max priority fee per gas of a dynamic fee transaction
    pub gas_tip_cap: Uint128,
    /// Recipient; `None` for contract creation
    pub to: Option<String>,
    pub value: Uint128,
    pub data: Binary,
}

impl EthTx {
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    pub fn fee_cap(&self) -> Uint128 {
        match self.tx_type {
            TxType::DynamicFee => self.gas_fee_cap,
            _ => self.gas_price,
        }
    }

    pub fn tip_cap(&self) -> Uint128 {
        match self.tx_type {
            TxType::DynamicFee => self.gas_tip_cap,
            _ => self.gas_price,
        }
    }

    /// The price per gas actually paid under the given base fee
    pub fn effective_gas_price(&self, base_fee: Option<Uint128>) -> Uint128 {
        match (self.tx_type, base_fee) {
            (TxType::DynamicFee, Some(base_fee)) => {
                cmp::min(self.gas_fee_cap, base_fee.saturating_add(self.gas_tip_cap))
            },
            _ => self.fee_cap(),
        }
    }

    /// The tip per gas the block proposer receives under the given base fee
    pub fn effective_gas_tip(&self, base_fee: Option<Uint128>) -> Uint128 {
        match base_fee {
            Some(base_fee) => cmp::min(self.tip_cap(), self.fee_cap().saturating_sub(base_fee)),
            None => self.tip_cap(),
        }
    }

    /// Max fee: fee cap times gas limit
    pub fn fee(&self) -> Option<Uint128> {
        self.fee_cap().checked_mul(Uint128::from(self.gas_limit)).ok()
    }

    /// Effective gas price times gas limit
    pub fn effective_fee(&self, base_fee: Option<Uint128>) -> Option<Uint128> {
        self.effective_gas_price(base_fee).checked_mul(Uint128::from(self.gas_limit)).ok()
    }

    /// The bytes a sender signs
    pub fn sign_bytes(&self) -> StdResult<Vec<u8>> {
        to_vec(self)
    }
}

/// An Ethereum transaction wrapped as a chain message
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct MsgEthereumTx {
    pub tx: EthTx,
    /// Sender address, `0x`-prefixed lowercase hex
    pub from: String,
    /// Compressed secp256k1 public key of the sender
    pub pubkey: Binary,
    /// Signature over the sha256 hash of the transaction's sign bytes
    pub signature: Binary,
}

impl MsgEthereumTx {
    pub fn hash(&self) -> StdResult<String> {
        let mut hasher = Sha256::new();
        hasher.update(self.tx.sign_bytes()?);
        hasher.update(self.signature.as_slice());
        Ok(format!("0x{}", hex::encode(hasher.finalize())))
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum TxMsg {
    Ethereum(MsgEthereumTx),
    /// Any non-EVM message, identified by its type URL
    Cosmos {
        type_url: String,
    },
}

/// The cosmos-side fee declared by the transaction envelope
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct TxFeeInfo {
    pub amount: Vec<Coin>,
    pub gas_limit: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Tx {
    pub msgs: Vec<TxMsg>,
    pub fee: Option<TxFeeInfo>,
}

/// The address of the account controlled by `pubkey`: the last 20 bytes of its sha256 hash, in
/// `0x`-prefixed lowercase hex. `pubkey` is expected in compressed form; other encodings of the
/// same key hash to other addresses.
pub fn address_from_pubkey(pubkey: &[u8]) -> String {
    let hash = Sha256::digest(pubkey);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// The hash a sender signs, and the signature is verified against
pub fn sign_hash(tx: &EthTx) -> StdResult<Vec<u8>> {
    Ok(Sha256::digest(tx.sign_bytes()?).to_vec())
}
