//! Types for common values in Steam responses.

/// Uniquely identifies an application on Steam. For example: 730 for Counter-Strike 2.
pub type AppId = u32;
/// A context ID belonging to an [`AppId`].
pub type ContextId = u64;
/// An asset ID unique to an [`AppId`] + [`ContextId`] combination.
pub type AssetId = u64;
/// An amount for stackable items. For non-stackable items this is simply `1`.
pub type Amount = u32;
/// An ID for a class of item. Every card within a set has its own class ID.
pub type ClassId = u64;
/// An ID of a trade offer.
pub type TradeOfferId = u64;
/// The badge level a bot has reached for a game.
pub type BadgeLevel = u32;

/// The app ID of Steam community items (cards, gems, backgrounds, emoticons).
pub const STEAM_APPID: AppId = 753;
/// The context ID of Steam community items.
pub const COMMUNITY_CONTEXTID: ContextId = 6;
/// The class ID of loose gems.
pub const GEMS_CLASSID: ClassId = 667924416;
/// The class ID of a sack of gems.
pub const SACK_OF_GEMS_CLASSID: ClassId = 667933237;

pub use crate::time::ServerTime;

// Types internally used by the crate.
use crate::bundle::GameCardBundle;
use std::collections::HashMap;
use reqwest_middleware::ClientWithMiddleware;

pub(crate) type HttpClient = ClientWithMiddleware;

/// Card bundles keyed by the app ID of the game the cards belong to.
pub type BundleMap = HashMap<AppId, GameCardBundle>;
/// Current badge levels keyed by game.
pub type LevelMap = HashMap<AppId, BadgeLevel>;
