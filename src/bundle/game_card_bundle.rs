use crate::response::Asset;
use crate::types::{AppId, ClassId};
use std::collections::BTreeMap;

/// How many cards make up a set for a game, as far as a bundle knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardsPerSet {
    /// Not looked up yet.
    #[default]
    Unknown,
    /// The last lookup failed. It is retried on the next full load.
    LookupFailed,
    /// The number of distinct cards in a set. `0` when the game has no trading cards.
    Known(u32),
}

/// Counts of one card within a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCount {
    pub tradable: u32,
    pub total: u32,
}

/// The cards of one game held by a bot, along with how many complete sets they form.
/// 
/// The counts are derived from the items and the set size and are recomputed whenever either 
/// changes. Sets are only counted when every card of the set is present; when the number of 
/// distinct cards differs from the set size (partial or rotating event sets) every card is 
/// counted as extra.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCardBundle {
    appid: AppId,
    cards_per_set: CardsPerSet,
    items: Vec<Asset>,
    tradable_sets: u32,
    nontradable_sets: u32,
    extra_tradable: u32,
    extra_nontradable: u32,
}

impl GameCardBundle {
    /// Creates a bundle whose set size is not yet known.
    pub fn new(appid: AppId, items: Vec<Asset>) -> Self {
        Self {
            appid,
            cards_per_set: CardsPerSet::Unknown,
            items,
            tradable_sets: 0,
            nontradable_sets: 0,
            extra_tradable: 0,
            extra_nontradable: 0,
        }
    }
    
    /// The game the cards belong to.
    pub fn appid(&self) -> AppId {
        self.appid
    }
    
    pub fn cards_per_set(&self) -> CardsPerSet {
        self.cards_per_set
    }
    
    /// The items in this bundle. Items in outgoing offers are not included.
    pub fn items(&self) -> &[Asset] {
        &self.items
    }
    
    /// Complete sets made of tradable cards only.
    pub fn tradable_sets(&self) -> u32 {
        self.tradable_sets
    }
    
    /// Complete sets counting tradable and untradable cards alike.
    pub fn nontradable_sets(&self) -> u32 {
        self.nontradable_sets
    }
    
    /// Tradable cards left over after taking out the tradable sets.
    pub fn extra_tradable(&self) -> u32 {
        self.extra_tradable
    }
    
    /// All cards left over after taking out the sets counted by 
    /// [`nontradable_sets`][Self::nontradable_sets].
    pub fn extra_nontradable(&self) -> u32 {
        self.extra_nontradable
    }
    
    /// Whether the set size is known so the counts are meaningful.
    pub fn is_loaded(&self) -> bool {
        matches!(self.cards_per_set, CardsPerSet::Known(_))
    }
    
    /// Sets the set size and recomputes the counts.
    pub fn set_cards_per_set(&mut self, cards_per_set: CardsPerSet) {
        self.cards_per_set = cards_per_set;
        self.recompute();
    }
    
    /// Replaces the items and recomputes the counts.
    pub fn set_items(&mut self, items: Vec<Asset>) {
        self.items = items;
        self.recompute();
    }
    
    /// Applies a looked up set size. Sizes of at least `min_set_size` are applied, as is `0`
    /// which confirms the game has no sets. Anything in between is implausible and leaves the 
    /// bundle as it was. Returns whether the size was applied.
    pub fn apply_set_size(&mut self, cards_per_set: u32, min_set_size: u32) -> bool {
        if cards_per_set != 0 && cards_per_set < min_set_size {
            return false;
        }
        
        self.set_cards_per_set(CardsPerSet::Known(cards_per_set));
        true
    }
    
    /// Counts of each card in the bundle, keyed by class ID.
    pub fn class_counts(&self) -> BTreeMap<ClassId, ClassCount> {
        let mut counts: BTreeMap<ClassId, ClassCount> = BTreeMap::new();
        
        for item in &self.items {
            let count = counts.entry(item.classid).or_default();
            
            count.total += 1;
            
            if item.tradable {
                count.tradable += 1;
            }
        }
        
        counts
    }
    
    fn recompute(&mut self) {
        self.tradable_sets = 0;
        self.nontradable_sets = 0;
        self.extra_tradable = 0;
        self.extra_nontradable = 0;
        
        let CardsPerSet::Known(cards_per_set) = self.cards_per_set else {
            return;
        };
        let counts = self.class_counts();
        let tradable_total = counts.values().map(|count| count.tradable).sum::<u32>();
        let total = counts.values().map(|count| count.total).sum::<u32>();
        
        if cards_per_set > 0 && counts.len() == cards_per_set as usize {
            self.tradable_sets = counts.values().map(|count| count.tradable).min().unwrap_or(0);
            self.nontradable_sets = counts.values().map(|count| count.total).min().unwrap_or(0);
        }
        
        self.extra_tradable = tradable_total - cards_per_set * self.tradable_sets;
        self.extra_nontradable = total - cards_per_set * self.nontradable_sets;
    }
}
