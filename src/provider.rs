//! Traits for the services the inventory cache depends on. [`SteamCommunityClient`] implements 
//! the network-facing ones; hosts with their own authenticated web client can implement them 
//! instead.
//! 
//! [`SteamCommunityClient`]: crate::SteamCommunityClient

use crate::error::Error;
use crate::request::NewTradeOffer;
use crate::response::{Asset, SentOffer};
use crate::types::{AppId, TradeOfferId};
use async_trait::async_trait;
use steamid_ng::SteamID;

/// Fetches a bot's community inventory.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// Fetches every item in the community inventory (app `753`, context `6`) of `steamid`, 
    /// tradable or not.
    async fn fetch_inventory(&self, steamid: SteamID) -> Result<Vec<Asset>, Error>;
}

/// Looks up how many cards make up a set for a game.
#[async_trait]
pub trait SetSizeProvider: Send + Sync {
    /// Returns the number of distinct cards in the game's badge. `Ok(0)` means the game has no 
    /// trading cards. Any error means the size is unknown.
    async fn fetch_set_size(&self, steamid: SteamID, appid: AppId) -> Result<u32, Error>;
}

/// Sends trade offers.
#[async_trait]
pub trait TradeOfferSender: Send + Sync {
    async fn send_offer(&self, offer: &NewTradeOffer) -> Result<SentOffer, Error>;
}

/// Confirms sent trade offers, usually through the host's mobile authenticator.
#[async_trait]
pub trait TradeConfirmer: Send + Sync {
    /// Confirms the offers. Returns whether every offer was confirmed.
    async fn confirm(&self, tradeofferids: &[TradeOfferId]) -> Result<bool, Error>;
}
