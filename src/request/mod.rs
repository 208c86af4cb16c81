//! Models for requests sent to Steam.

mod new_trade_offer;

pub use new_trade_offer::{NewTradeOffer, NewTradeOfferItem, NewTradeOfferBuilder};
