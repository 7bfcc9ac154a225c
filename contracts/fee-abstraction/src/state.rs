use cosmwasm_std::{Addr, Decimal};
use cw_storage_plus::{Item, Map};

use fee_abstraction::{FeeTokenMetadataCollection, Params};

/// The account allowed to update params and fee tokens, normally the governance module
pub const AUTHORITY: Item<Addr> = Item::new("authority");

/// Module params
pub const PARAMS: Item<Params> = Item::new("params");

/// Registered fee tokens, in registration order
pub const FEE_TOKENS: Item<FeeTokenMetadataCollection> = Item::new("fee_tokens");

/// The implied price (native per token) each fee token was assigned at the start of the current
/// block, indexed by fee token denom. The clamp factor is measured against these.
///
/// A token without an entry has never been priced; its oracle price is taken at face value.
pub const PRICE_SNAPSHOTS: Map<&str, Decimal> = Map::new("price_snapshots");
