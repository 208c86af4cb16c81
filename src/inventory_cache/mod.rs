mod builder;

pub use builder::{InventoryCacheBuilder, InventoryCacheOptions};

use crate::bundle::{self, fully_load};
use crate::enums::ItemKind;
use crate::error::Error;
use crate::in_trade::{InTradeTracker, TradeOutcome};
use crate::provider::{InventoryProvider, SetSizeProvider};
use crate::response::{Asset, GemsInfo};
use crate::selector::{self, SetSelection};
use crate::set_size_cache::SetSizeCache;
use crate::time::to_std_duration;
use crate::types::{BundleMap, LevelMap};
use std::collections::HashSet;
use std::sync::Arc;
use steamid_ng::SteamID;
use tokio::time::Instant;

/// Views derived from one fetch of the inventory. Replaced as a whole.
#[derive(Debug, Clone, Default)]
struct InventoryState {
    /// Everything fetched, including items in trade.
    items: Vec<Asset>,
    cards: BundleMap,
    foils: BundleMap,
    gems: GemsInfo,
}

/// A bot's inventory bundled into card sets.
///
/// The inventory is fetched lazily: any read fetches it again once the TTL has passed or
/// [`expire_now`][Self::expire_now] was called. A failed fetch keeps the previous views and is
/// recorded in [`last_error`][Self::last_error]; the next read tries again.
///
/// Each bot should own exactly one cache. Wrap it in an `Arc<tokio::sync::Mutex<_>>` to share
/// it between the bot's command handlers.
pub struct InventoryCache {
    steamid: SteamID,
    inventory_provider: Arc<dyn InventoryProvider>,
    set_size_provider: Arc<dyn SetSizeProvider>,
    set_size_cache: SetSizeCache,
    options: InventoryCacheOptions,
    state: InventoryState,
    in_trade: InTradeTracker,
    last_refresh: Option<Instant>,
    force_reload: bool,
    last_error: Option<String>,
}

impl From<InventoryCacheBuilder> for InventoryCache {
    fn from(builder: InventoryCacheBuilder) -> Self {
        Self {
            steamid: builder.steamid,
            inventory_provider: builder.inventory_provider,
            set_size_provider: builder.set_size_provider,
            set_size_cache: builder.set_size_cache,
            options: builder.options,
            state: InventoryState::default(),
            in_trade: InTradeTracker::new(),
            last_refresh: None,
            force_reload: false,
            last_error: None,
        }
    }
}

impl std::fmt::Debug for InventoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryCache")
            .field("steamid", &u64::from(self.steamid))
            .field("options", &self.options)
            .field("items", &self.state.items.len())
            .field("in_trade", &self.in_trade.len())
            .field("last_refresh", &self.last_refresh)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl InventoryCache {
    /// Builder for constructing an [`InventoryCache`].
    pub fn builder(
        steamid: SteamID,
        inventory_provider: Arc<dyn InventoryProvider>,
        set_size_provider: Arc<dyn SetSizeProvider>,
        set_size_cache: SetSizeCache,
    ) -> InventoryCacheBuilder {
        InventoryCacheBuilder::new(
            steamid,
            inventory_provider,
            set_size_provider,
            set_size_cache,
        )
    }

    /// The bot this cache belongs to.
    pub fn steamid(&self) -> SteamID {
        self.steamid
    }

    pub fn options(&self) -> &InventoryCacheOptions {
        &self.options
    }

    /// The shared set size cache.
    pub fn set_size_cache(&self) -> &SetSizeCache {
        &self.set_size_cache
    }

    /// Items in outgoing offers.
    pub fn in_trade(&self) -> &InTradeTracker {
        &self.in_trade
    }

    /// The error from the last failed fetch, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When the inventory was last fetched successfully.
    pub fn last_refresh(&self) -> Option<Instant> {
        self.last_refresh
    }

    /// Whether the next read will fetch the inventory.
    pub fn is_stale(&self) -> bool {
        if self.force_reload {
            return true;
        }

        match self.last_refresh {
            Some(last_refresh) => last_refresh.elapsed() >= to_std_duration(self.options.ttl),
            None => true,
        }
    }

    /// Makes the next read fetch the inventory regardless of the TTL.
    pub fn expire_now(&mut self) {
        self.force_reload = true;
    }

    /// Drops everything, including the record of items in trade.
    pub fn clear(&mut self) {
        self.state = InventoryState::default();
        self.in_trade.clear();
        self.last_refresh = None;
        self.force_reload = false;
        self.last_error = None;
    }

    /// The last fetched inventory, including items in trade.
    pub async fn get_inventory(&mut self) -> &[Asset] {
        self.ensure_fresh().await;
        &self.state.items
    }

    /// Trading card bundles. Set sizes are only taken from the set size cache; use
    /// [`get_bundles`][Self::get_bundles] to look up unknown games.
    pub async fn get_card_set_bundles(&mut self) -> &BundleMap {
        self.ensure_fresh().await;
        &self.state.cards
    }

    /// Foil card bundles. Foils form their own sets, independent of regular cards.
    pub async fn get_foil_bundles(&mut self) -> &BundleMap {
        self.ensure_fresh().await;
        &self.state.foils
    }

    /// Gems held by the bot, items in trade excluded.
    pub async fn get_gems_info(&mut self) -> GemsInfo {
        self.ensure_fresh().await;
        self.state.gems
    }

    /// Trading card bundles with set sizes looked up for every game.
    pub async fn get_bundles(&mut self, force_reload: bool) -> &BundleMap {
        if force_reload {
            self.expire_now();
        }

        self.ensure_fresh().await;
        self.load_set_sizes().await;
        &self.state.cards
    }

    /// Selects up to `target` tradable sets to offer. `levels` holds the current badge level of
    /// games the receiving account has already crafted. The items are not committed; call
    /// [`commit`][Self::commit] once the offer is sent.
    pub async fn select_sets(&mut self, levels: &LevelMap, target: u32) -> SetSelection {
        let max_sets_per_game = self.options.max_sets_per_game;
        let bundles = self.get_bundles(false).await;

        selector::select_sets(bundles, levels, max_sets_per_game, target)
    }

    /// Marks the items as in an outgoing offer. They are removed from the views straight away.
    /// Returns how many were not already marked.
    pub fn commit(&mut self, items: &[Asset]) -> usize {
        let committed = self.in_trade.commit(items);

        if committed > 0 {
            self.rebuild();
        }

        committed
    }

    /// Applies the outcome of an offer. When accepted the given items leave the inventory and
    /// the received items join it; otherwise the given items become available again. Outcomes
    /// of offers still pending are ignored.
    pub fn release(&mut self, outcome: &TradeOutcome) {
        if outcome.state.is_pending() {
            log::debug!("Offer {:?} is {}, keeping its items in trade", outcome.tradeofferid, outcome.state);
            return;
        }

        self.in_trade.release(&outcome.items_given);

        if outcome.is_accepted() {
            let given = outcome.items_given
                .iter()
                .map(|item| item.assetid)
                .collect::<HashSet<_>>();

            self.state.items.retain(|item| !given.contains(&item.assetid));

            let present = self.state.items
                .iter()
                .map(|item| item.assetid)
                .collect::<HashSet<_>>();
            let received = outcome.items_received
                .iter()
                .filter(|item| !present.contains(&item.assetid))
                .cloned()
                .collect::<Vec<_>>();

            self.state.items.extend(received);
        }

        self.rebuild();
    }

    /// Fetches the inventory now. On failure the previous views are kept.
    pub async fn reload(&mut self) -> Result<(), Error> {
        let items = self.inventory_provider.fetch_inventory(self.steamid).await?;

        log::debug!("Fetched {} items for {}", items.len(), u64::from(self.steamid));

        self.in_trade.retain_present(&items);
        self.state.items = items;
        self.rebuild();
        self.last_refresh = Some(Instant::now());
        self.force_reload = false;
        self.last_error = None;

        Ok(())
    }

    async fn ensure_fresh(&mut self) {
        if !self.is_stale() {
            return;
        }

        if let Err(error) = self.reload().await {
            log::warn!("Error fetching inventory for {}: {error}", u64::from(self.steamid));
            self.last_error = Some(error.to_string());
        }
    }

    /// Looks up set sizes for every unloaded card and foil bundle.
    async fn load_set_sizes(&mut self) {
        let min_set_size = self.options.min_set_size;

        for bundles in [&mut self.state.cards, &mut self.state.foils] {
            fully_load(
                bundles,
                &self.set_size_cache,
                self.set_size_provider.as_ref(),
                self.steamid,
                min_set_size,
            ).await;
        }
    }

    /// Recomputes every view from the fetched items, leaving out items in trade.
    fn rebuild(&mut self) {
        let min_set_size = self.options.min_set_size;
        let available = self.in_trade
            .available(&self.state.items)
            .collect::<Vec<_>>();
        let cards = bundle::bundle(
            available.iter().copied().filter(|item| item.kind == ItemKind::TradingCard),
            &self.set_size_cache,
            min_set_size,
        );
        let foils = bundle::bundle(
            available.iter().copied().filter(|item| item.kind == ItemKind::FoilTradingCard),
            &self.set_size_cache,
            min_set_size,
        );
        let gems = GemsInfo::from_items(available.iter().copied());

        self.state.cards = cards;
        self.state.foils = foils;
        self.state.gems = gems;
    }
}
