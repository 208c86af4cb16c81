//! Bundles a Steam bot's trading card inventory into card sets and hands complete sets out in
//! trade offers.
//!
//! An [`InventoryCache`] per bot keeps the fetched inventory grouped by game. The number of
//! cards in each game's set is looked up once and kept in a [`SetSizeCache`] shared by every bot
//! in the process, optionally backed by a JSON file. Items placed into offers are held back
//! until the host reports how the offer ended.
//!
//! ```no_run
//! use steam_card_sets::{InventoryCache, SetSizeCache, SteamCommunityClient};
//! use std::sync::Arc;
//!
//! # async fn run(cookies: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(SteamCommunityClient::new(&cookies)?);
//! let steamid = client.steamid().ok_or("cookies are missing steamLoginSecure")?;
//! let set_sizes = SetSizeCache::builder()
//!     .filepath("set_sizes.json")
//!     .load_or_default()
//!     .await;
//! let mut cache = InventoryCache::builder(steamid, client.clone(), client, set_sizes).build();
//!
//! for (appid, bundle) in cache.get_bundles(false).await {
//!     println!("{appid}: {} sets", bundle.tradable_sets());
//! }
//! # Ok(())
//! # }
//! ```

pub mod enums;
pub mod error;
pub mod response;
pub mod request;
pub mod types;
pub mod time;
pub mod bundle;
pub mod selector;
pub mod provider;

mod helpers;
mod serializers;
mod set_size_cache;
mod in_trade;
mod inventory_cache;
mod offer;
mod web;

#[cfg(test)]
mod test_support;

pub use error::{Error, FileError};
pub use enums::{ItemKind, TradeOfferState};
pub use response::{Asset, GemsInfo, SentOffer};
pub use request::{NewTradeOffer, NewTradeOfferItem};
pub use bundle::{GameCardBundle, CardsPerSet};
pub use selector::SetSelection;
pub use provider::{InventoryProvider, SetSizeProvider, TradeOfferSender, TradeConfirmer};
pub use set_size_cache::{SetSizeCache, SetSizeCacheBuilder, SetSizeLookup};
pub use in_trade::{InTradeTracker, TradeOutcome};
pub use inventory_cache::{InventoryCache, InventoryCacheBuilder, InventoryCacheOptions};
pub use offer::{send_sets, SetOfferRequest, SetOfferOutcome};
pub use web::SteamCommunityClient;
pub use steamid_ng::SteamID;
