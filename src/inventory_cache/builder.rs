use super::InventoryCache;
use crate::bundle::DEFAULT_MIN_SET_SIZE;
use crate::provider::{InventoryProvider, SetSizeProvider};
use crate::selector::DEFAULT_MAX_SETS_PER_GAME;
use crate::set_size_cache::SetSizeCache;
use std::sync::Arc;
use chrono::Duration;
use steamid_ng::SteamID;

/// Options for an [`InventoryCache`].
#[derive(Debug, Clone, Copy)]
pub struct InventoryCacheOptions {
    /// How long a fetched inventory is used before it is fetched again. Default is 5 minutes.
    pub ttl: Duration,
    /// Set sizes below this are ignored as bad data. Default is 5.
    pub min_set_size: u32,
    /// The most sets taken from one game when selecting sets. Default is 5.
    pub max_sets_per_game: u32,
}

impl Default for InventoryCacheOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(5),
            min_set_size: DEFAULT_MIN_SET_SIZE,
            max_sets_per_game: DEFAULT_MAX_SETS_PER_GAME,
        }
    }
}

/// Builder for constructing an [`InventoryCache`].
pub struct InventoryCacheBuilder {
    pub(crate) steamid: SteamID,
    pub(crate) inventory_provider: Arc<dyn InventoryProvider>,
    pub(crate) set_size_provider: Arc<dyn SetSizeProvider>,
    pub(crate) set_size_cache: SetSizeCache,
    pub(crate) options: InventoryCacheOptions,
}

impl InventoryCacheBuilder {
    /// Creates a new [`InventoryCacheBuilder`]. The `set_size_cache` should be shared by every
    /// bot in the process.
    pub fn new(
        steamid: SteamID,
        inventory_provider: Arc<dyn InventoryProvider>,
        set_size_provider: Arc<dyn SetSizeProvider>,
        set_size_cache: SetSizeCache,
    ) -> Self {
        Self {
            steamid,
            inventory_provider,
            set_size_provider,
            set_size_cache,
            options: InventoryCacheOptions::default(),
        }
    }

    /// How long a fetched inventory is used before it is fetched again.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.options.ttl = ttl;
        self
    }

    /// Set sizes below this are ignored as bad data.
    pub fn min_set_size(mut self, min_set_size: u32) -> Self {
        self.options.min_set_size = min_set_size;
        self
    }

    /// The most sets taken from one game when selecting sets.
    pub fn max_sets_per_game(mut self, max_sets_per_game: u32) -> Self {
        self.options.max_sets_per_game = max_sets_per_game;
        self
    }

    /// Replaces all options at once.
    pub fn options(mut self, options: InventoryCacheOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> InventoryCache {
        InventoryCache::from(self)
    }
}
