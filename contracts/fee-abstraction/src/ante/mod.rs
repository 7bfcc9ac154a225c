//! The ante handler for Ethereum transactions: the checks run before execution, including
//! charging the transaction fee in whichever denom the sender can afford.

pub mod checks;
pub mod config;
pub mod context;
pub mod error;
pub mod mono;
pub mod tx;

pub use config::AnteConfig;
pub use context::{AnteContext, ExecMode, GasMeter};
pub use error::{AnteError, AnteResult};
pub use mono::MonoDecorator;
pub use tx::{EthTx, MsgEthereumTx, Tx, TxFeeInfo, TxMsg, TxType};
