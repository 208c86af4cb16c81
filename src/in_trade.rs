use crate::enums::TradeOfferState;
use crate::response::Asset;
use crate::types::{AssetId, TradeOfferId};
use std::collections::HashSet;

/// The outcome of an offer reported by the host after it was sent.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    /// The offer this outcome belongs to, if known.
    pub tradeofferid: Option<TradeOfferId>,
    /// The final state of the offer.
    pub state: TradeOfferState,
    /// Items the bot gave in the offer.
    pub items_given: Vec<Asset>,
    /// Items the bot received in the offer. Only used when the offer was accepted.
    pub items_received: Vec<Asset>,
}

impl TradeOutcome {
    /// Whether the items changed hands.
    pub fn is_accepted(&self) -> bool {
        self.state == TradeOfferState::Accepted
    }
}

/// Tracks the asset IDs of items placed into outgoing offers which have not been resolved yet.
#[derive(Debug, Clone, Default)]
pub struct InTradeTracker {
    assetids: HashSet<AssetId>,
}

impl InTradeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the items as in trade. Returns how many were not already marked.
    pub fn commit<'a, I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a Asset>,
    {
        items
            .into_iter()
            .filter(|item| self.assetids.insert(item.assetid))
            .count()
    }

    /// Removes the marks from the items. Returns how many were marked.
    pub fn release<'a, I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a Asset>,
    {
        items
            .into_iter()
            .filter(|item| self.assetids.remove(&item.assetid))
            .count()
    }

    pub fn contains(&self, assetid: AssetId) -> bool {
        self.assetids.contains(&assetid)
    }

    pub fn len(&self) -> usize {
        self.assetids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assetids.is_empty()
    }

    pub fn clear(&mut self) {
        self.assetids.clear();
    }

    /// Drops the marks of items which are no longer in `items`. Items leave the inventory once
    /// their offer is accepted.
    pub fn retain_present<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a Asset>,
    {
        let present = items
            .into_iter()
            .map(|item| item.assetid)
            .collect::<HashSet<_>>();

        self.assetids.retain(|assetid| present.contains(assetid));
    }

    /// Items which are not in trade.
    pub fn available<'a, I>(&'a self, items: I) -> impl Iterator<Item = &'a Asset> + 'a
    where
        I: IntoIterator<Item = &'a Asset>,
        I::IntoIter: 'a,
    {
        items
            .into_iter()
            .filter(move |item| !self.contains(item.assetid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::card;

    #[test]
    fn commits_and_releases() {
        let items = vec![card(1, 10, 440, true), card(2, 11, 440, true)];
        let mut tracker = InTradeTracker::new();

        assert_eq!(tracker.commit(&items), 2);
        // already committed
        assert_eq!(tracker.commit(&items[..1]), 0);
        assert!(tracker.contains(1));
        assert_eq!(tracker.release(&items[..1]), 1);
        assert!(!tracker.contains(1));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn filters_available_items() {
        let items = vec![card(1, 10, 440, true), card(2, 11, 440, true), card(3, 12, 440, true)];
        let mut tracker = InTradeTracker::new();

        tracker.commit(&items[1..2]);

        let available = tracker.available(&items)
            .map(|item| item.assetid)
            .collect::<Vec<_>>();

        assert_eq!(available, vec![1, 3]);
    }
}
