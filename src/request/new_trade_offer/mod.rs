mod item;
mod builder;

pub use item::NewTradeOfferItem;
pub use builder::NewTradeOfferBuilder;

use steamid_ng::SteamID;

/// An offer giving items to a partner, not yet sent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTradeOffer {
    /// The partner receiving the items.
    pub partner: SteamID,
    /// The items to give.
    pub items_to_give: Vec<NewTradeOfferItem>,
    /// The message to send with the offer.
    pub message: Option<String>,
    /// The access token for sending an offer if you are not friends with the partner.
    pub token: Option<String>,
}

impl NewTradeOffer {
    pub fn builder(partner: SteamID) -> NewTradeOfferBuilder {
        NewTradeOfferBuilder::new(partner)
    }
    
    /// Checks if any items are included in the offer.
    pub fn is_empty(&self) -> bool {
        self.items_to_give.is_empty()
    }
}
