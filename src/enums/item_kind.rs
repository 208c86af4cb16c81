use num_enum::{TryFromPrimitive, IntoPrimitive};
use serde_repr::{Serialize_repr, Deserialize_repr};
use strum_macros::{Display, EnumString};
use crate::types::{ClassId, GEMS_CLASSID, SACK_OF_GEMS_CLASSID};

/// The kind of a Steam community item. Only the kinds relevant to card sets are distinguished.
#[derive(Serialize_repr, Deserialize_repr, Display, EnumString, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ItemKind {
    Other = 0,
    TradingCard = 1,
    FoilTradingCard = 2,
    Gems = 3,
    SackOfGems = 4,
}

impl ItemKind {
    /// Classifies an item from its class ID, its `item_class` tag and whether it has a foil card
    /// border.
    /// 
    /// Steam tags trading cards with `item_class_2`, gems with `item_class_7` and foil cards 
    /// additionally with `cardborder_1`. Gems and sacks of gems share a tag and are told apart by
    /// their fixed class IDs, which do not depend on the inventory language.
    pub fn from_tags(classid: ClassId, item_class: Option<&str>, is_foil: bool) -> Self {
        match (classid, item_class) {
            (SACK_OF_GEMS_CLASSID, _) => Self::SackOfGems,
            (GEMS_CLASSID, _) => Self::Gems,
            (_, Some("item_class_2")) if is_foil => Self::FoilTradingCard,
            (_, Some("item_class_2")) => Self::TradingCard,
            (_, Some("item_class_7")) => Self::Gems,
            _ => Self::Other,
        }
    }
}
