#![allow(clippy::derive_partial_eq_without_eq)]

mod denom;
mod error;
mod fee;
mod fee_token;
pub mod msg;
mod params;

pub use denom::*;
pub use error::*;
pub use fee::*;
pub use fee_token::*;
pub use params::*;
