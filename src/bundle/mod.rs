//! Groups inventory items into per-game card bundles.

mod game_card_bundle;

pub use game_card_bundle::{GameCardBundle, CardsPerSet, ClassCount};

use crate::provider::SetSizeProvider;
use crate::response::Asset;
use crate::set_size_cache::{SetSizeCache, SetSizeLookup};
use crate::types::{AppId, BundleMap};
use std::collections::HashMap;
use steamid_ng::SteamID;

/// Set sizes below this are treated as bad data. No game has a badge with fewer than 5 cards.
pub const DEFAULT_MIN_SET_SIZE: u32 = 5;

/// Groups `items` by game. Set sizes already in `set_size_cache` are applied; games without a
/// cached size are left unloaded. Never touches the network.
pub fn bundle<'a, I>(
    items: I,
    set_size_cache: &SetSizeCache,
    min_set_size: u32,
) -> BundleMap
where
    I: IntoIterator<Item = &'a Asset>,
{
    let mut groups: HashMap<AppId, Vec<Asset>> = HashMap::new();

    for item in items {
        groups.entry(item.market_fee_app).or_default().push(item.clone());
    }

    groups
        .into_iter()
        .map(|(appid, items)| {
            let mut bundle = GameCardBundle::new(appid, items);

            if let Some(cards_per_set) = set_size_cache.get(appid) {
                bundle.apply_set_size(cards_per_set, min_set_size);
            }

            (appid, bundle)
        })
        .collect()
}

/// Looks up the set size of every unloaded bundle and applies the results. Lookups run
/// concurrently through the cache's permit pool. Bundles whose lookup fails are marked
/// [`CardsPerSet::LookupFailed`] and retried on the next call. Returns how many bundles became
/// loaded.
pub async fn fully_load(
    bundles: &mut BundleMap,
    set_size_cache: &SetSizeCache,
    provider: &dyn SetSizeProvider,
    steamid: SteamID,
    min_set_size: u32,
) -> usize {
    let mut appids = bundles
        .values()
        .filter(|bundle| !bundle.is_loaded())
        .map(|bundle| bundle.appid())
        .collect::<Vec<_>>();

    if appids.is_empty() {
        return 0;
    }

    appids.sort_unstable();

    let results = set_size_cache.lookup_many(provider, steamid, &appids).await;

    apply_lookups(bundles, &appids, &results, min_set_size)
}

fn apply_lookups(
    bundles: &mut BundleMap,
    appids: &[AppId],
    results: &[SetSizeLookup],
    min_set_size: u32,
) -> usize {
    if results.len() != appids.len() {
        log::warn!(
            "Expected {} set size results but got {}, leaving bundles unloaded",
            appids.len(),
            results.len(),
        );
        return 0;
    }

    let mut loaded = 0;

    for (appid, result) in appids.iter().zip(results) {
        let Some(bundle) = bundles.get_mut(appid) else {
            continue;
        };

        match result {
            SetSizeLookup::Resolved(cards_per_set) => {
                if bundle.apply_set_size(*cards_per_set, min_set_size) {
                    loaded += 1;
                } else {
                    log::debug!("Ignoring implausible set size {cards_per_set} for {appid}");
                }
            },
            SetSizeLookup::Failed => {
                bundle.set_cards_per_set(CardsPerSet::LookupFailed);
            },
        }
    }

    loaded
}
