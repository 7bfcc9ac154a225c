use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAIN_ID: u64 = 1336;

/// Node and chain configuration the EVM ante handler runs under
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(default)]
pub struct AnteConfig {
    /// EIP-155 chain id transactions must be signed for
    pub chain_id: u64,
    /// Whether transactions without a chain id are accepted
    pub allow_unprotected_txs: bool,
    pub enable_create: bool,
    pub enable_call: bool,
    /// Whether London rules (EIP-1559 base fee, block gas wanted accounting) are active
    pub london: bool,
    /// In CheckTx, the most gas a single message is counted as wanting. Zero disables the cap.
    pub max_gas_wanted: u64,
}

impl Default for AnteConfig {
    fn default() -> Self {
        AnteConfig {
            chain_id: DEFAULT_CHAIN_ID,
            allow_unprotected_txs: false,
            enable_create: true,
            enable_call: true,
            london: true,
            max_gas_wanted: 0,
        }
    }
}
