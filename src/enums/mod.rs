//! Enumerated types.

mod item_kind;
mod trade_offer_state;

pub use item_kind::ItemKind;
pub use trade_offer_state::TradeOfferState;
