//! Models of data received from Steam.

mod asset;
mod gems_info;
mod sent_offer;

pub use asset::Asset;
pub use gems_info::{GemsInfo, GEMS_PER_SACK};
pub use sent_offer::SentOffer;
