pub mod ante;
pub mod bank;
pub mod cache;
pub mod contract;
pub mod convert;
pub mod error;
pub mod execute;
pub mod fee_market;
pub mod helpers;
pub mod interfaces;
pub mod oracle;
pub mod query;
pub mod registry;
pub mod state;
