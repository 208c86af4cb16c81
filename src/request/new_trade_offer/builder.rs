use super::{NewTradeOfferItem, NewTradeOffer};
use steamid_ng::SteamID;

/// Builder for constructing a [`NewTradeOffer`].
#[derive(Debug, Clone)]
pub struct NewTradeOfferBuilder {
    offer: NewTradeOffer,
}

impl NewTradeOfferBuilder {
    /// Starts an empty offer to `partner`.
    pub fn new(partner: SteamID) -> Self {
        Self {
            offer: NewTradeOffer {
                partner,
                items_to_give: Vec::new(),
                message: None,
                token: None,
            },
        }
    }

    /// Replaces the items given to the partner.
    pub fn items_to_give<T>(mut self, items: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<NewTradeOfferItem>,
    {
        self.offer.items_to_give = items.into_iter().map(Into::into).collect();
        self
    }

    /// The partner's trade token, needed unless the bot is friends with them.
    pub fn token(mut self, token: Option<String>) -> Self {
        self.offer.token = token;
        self
    }

    pub fn message(mut self, message: Option<String>) -> Self {
        self.offer.message = message;
        self
    }

    pub fn build(self) -> NewTradeOffer {
        self.offer
    }
}
