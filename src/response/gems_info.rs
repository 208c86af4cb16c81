use crate::enums::ItemKind;
use super::Asset;

/// The number of gems in one sack of gems.
pub const GEMS_PER_SACK: u64 = 1000;

/// Counts of the gems held in an inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GemsInfo {
    /// Loose gems which can be traded.
    pub tradable_gems: u64,
    /// Loose gems which cannot be traded.
    pub untradable_gems: u64,
    /// Sacks of gems which can be traded.
    pub tradable_sacks: u64,
    /// Sacks of gems which cannot be traded.
    pub untradable_sacks: u64,
}

impl GemsInfo {
    /// Tallies the gems and sacks of gems among `items`. Other items are ignored.
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Asset>,
    {
        let mut info = Self::default();
        
        for item in items {
            let amount = u64::from(item.amount);
            
            match (item.kind, item.tradable) {
                (ItemKind::Gems, true) => info.tradable_gems += amount,
                (ItemKind::Gems, false) => info.untradable_gems += amount,
                (ItemKind::SackOfGems, true) => info.tradable_sacks += amount,
                (ItemKind::SackOfGems, false) => info.untradable_sacks += amount,
                _ => {},
            }
        }
        
        info
    }
    
    /// Total gems, counting each sack as its worth in gems.
    pub fn total_gems(&self) -> u64 {
        self.tradable_gems +
        self.untradable_gems +
        (self.tradable_sacks + self.untradable_sacks) * GEMS_PER_SACK
    }
}
