//! Chooses which cards to offer to hand out a number of complete sets.

use crate::response::Asset;
use crate::types::{AppId, ClassId, BundleMap, LevelMap};
use std::collections::{BTreeMap, HashMap};

/// The highest badge level reachable with card sets. Crafting a set raises a badge by one level
/// and regular badges stop at level 5.
pub const DEFAULT_MAX_SETS_PER_GAME: u32 = 5;

/// The cards chosen for an offer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetSelection {
    /// How many complete sets the items form.
    pub sets: u32,
    /// Sets taken from each game.
    pub sets_by_game: BTreeMap<AppId, u32>,
    /// The items to offer.
    pub items: Vec<Asset>,
}

impl SetSelection {
    /// The number of distinct games the sets come from.
    pub fn games(&self) -> usize {
        self.sets_by_game.len()
    }

    /// Whether `target` sets were found.
    pub fn is_complete(&self, target: u32) -> bool {
        self.sets >= target
    }
}

/// Selects up to `target` complete tradable sets from `bundles`.
///
/// Games with the most tradable sets are used first so an offer touches as few games as
/// possible. No game gives more sets than it takes to bring its badge from the level in
/// `levels` (0 when absent) up to `max_sets_per_game`. Exactly one copy of every card in the
/// set is taken for each set.
///
/// Fewer than `target` sets may be returned; check [`SetSelection::is_complete`] before
/// sending anything.
pub fn select_sets(
    bundles: &BundleMap,
    levels: &LevelMap,
    max_sets_per_game: u32,
    target: u32,
) -> SetSelection {
    let mut ordered = bundles
        .values()
        .filter(|bundle| bundle.is_loaded() && bundle.tradable_sets() > 0)
        .collect::<Vec<_>>();

    ordered.sort_by(|a, b| {
        b.tradable_sets().cmp(&a.tradable_sets())
            .then_with(|| a.appid().cmp(&b.appid()))
    });

    let mut selection = SetSelection::default();
    let mut remaining = target;

    for bundle in ordered {
        if remaining == 0 {
            break;
        }

        let level = levels.get(&bundle.appid()).copied().unwrap_or(0);
        let take = max_sets_per_game
            .saturating_sub(level)
            .min(bundle.tradable_sets())
            .min(remaining);

        if take == 0 {
            continue;
        }

        let mut budget = bundle.class_counts()
            .into_keys()
            .map(|classid| (classid, take))
            .collect::<HashMap<ClassId, u32>>();

        for item in bundle.items().iter().filter(|item| item.tradable) {
            if let Some(left) = budget.get_mut(&item.classid) {
                if *left > 0 {
                    *left -= 1;
                    selection.items.push(item.clone());
                }
            }
        }

        selection.sets += take;
        selection.sets_by_game.insert(bundle.appid(), take);
        remaining -= take;
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{GameCardBundle, CardsPerSet};
    use crate::test_support::{card, full_sets, class_of};
    use std::collections::HashSet;

    fn loaded(appid: AppId, cards_per_set: u32, items: Vec<Asset>) -> (AppId, GameCardBundle) {
        let mut bundle = GameCardBundle::new(appid, items);

        bundle.set_cards_per_set(CardsPerSet::Known(cards_per_set));
        (appid, bundle)
    }

    fn two_games() -> BundleMap {
        BundleMap::from([
            loaded(10, 5, full_sets(10, 5, 10, 1)),
            loaded(20, 7, full_sets(20, 7, 3, 1000)),
        ])
    }

    #[test]
    fn caps_sets_per_game() {
        let selection = select_sets(&two_games(), &LevelMap::new(), 5, 12);

        assert_eq!(selection.sets, 8);
        assert_eq!(selection.games(), 2);
        assert_eq!(selection.items.len(), 5 * 5 + 3 * 7);
        assert_eq!(selection.sets_by_game, BTreeMap::from([(10, 5), (20, 3)]));
        assert!(!selection.is_complete(12));
    }

    #[test]
    fn takes_one_of_each_card_per_set() {
        let selection = select_sets(&two_games(), &LevelMap::new(), 5, 12);
        let mut per_class: HashMap<ClassId, u32> = HashMap::new();

        for item in &selection.items {
            *per_class.entry(item.classid).or_default() += 1;
        }

        for n in 0..5 {
            assert_eq!(per_class[&class_of(10, n)], 5);
        }

        for n in 0..7 {
            assert_eq!(per_class[&class_of(20, n)], 3);
        }

        let unique = selection.items.iter().map(|item| item.assetid).collect::<HashSet<_>>();

        assert_eq!(unique.len(), selection.items.len());
    }

    #[test]
    fn prefers_games_with_most_sets() {
        let selection = select_sets(&two_games(), &LevelMap::new(), 5, 4);

        assert_eq!(selection.sets, 4);
        assert_eq!(selection.sets_by_game, BTreeMap::from([(10, 4)]));
        assert!(selection.is_complete(4));
    }

    #[test]
    fn respects_current_levels() {
        let levels = LevelMap::from([(10, 3), (20, 5)]);
        let selection = select_sets(&two_games(), &levels, 5, 12);

        assert_eq!(selection.sets, 2);
        assert_eq!(selection.sets_by_game, BTreeMap::from([(10, 2)]));
        assert_eq!(selection.items.len(), 10);
    }

    #[test]
    fn levels_above_cap_give_nothing() {
        let levels = LevelMap::from([(10, 7)]);
        let selection = select_sets(&two_games(), &levels, 5, 12);

        assert_eq!(selection.sets_by_game, BTreeMap::from([(20, 3)]));
    }

    #[test]
    fn skips_untradable_cards() {
        let mut items = full_sets(30, 5, 1, 1);

        for n in 0..5 {
            items.push(card(100 + u64::from(n), class_of(30, n), 30, false));
        }

        let bundles = BundleMap::from([loaded(30, 5, items)]);
        let selection = select_sets(&bundles, &LevelMap::new(), 5, 2);

        assert_eq!(selection.sets, 1);
        assert!(selection.items.iter().all(|item| item.tradable));
    }

    #[test]
    fn ignores_unloaded_bundles() {
        let bundles = BundleMap::from([(40, GameCardBundle::new(40, full_sets(40, 5, 3, 1)))]);
        let selection = select_sets(&bundles, &LevelMap::new(), 5, 1);

        assert_eq!(selection, SetSelection::default());
    }

    #[test]
    fn zero_target_selects_nothing() {
        let selection = select_sets(&two_games(), &LevelMap::new(), 5, 0);

        assert_eq!(selection.sets, 0);
        assert!(selection.items.is_empty());
    }
}
