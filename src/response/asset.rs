use crate::enums::ItemKind;
use crate::types::{AppId, ContextId, AssetId, Amount, ClassId, STEAM_APPID, COMMUNITY_CONTEXTID};
use crate::serializers::string;
use serde::{Serialize, Deserialize};

/// An item in a Steam community inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// The app ID of the inventory. For community items this is always `753`.
    pub appid: AppId,
    /// The context ID of the inventory. For community items this is always `6`.
    #[serde(with = "string")]
    pub contextid: ContextId,
    /// The unique asset ID.
    #[serde(with = "string")]
    pub assetid: AssetId,
    /// Identifies which card of a set this is.
    #[serde(with = "string")]
    pub classid: ClassId,
    /// The app ID of the game this item belongs to.
    pub market_fee_app: AppId,
    /// The kind of item.
    pub kind: ItemKind,
    /// Whether this item can be traded.
    pub tradable: bool,
    /// The stack size. Cards are always `1`, gems stack.
    pub amount: Amount,
}

impl Asset {
    /// Creates a new community item with an amount of `1`.
    pub fn new(
        assetid: AssetId,
        classid: ClassId,
        market_fee_app: AppId,
        kind: ItemKind,
        tradable: bool,
    ) -> Self {
        Self {
            appid: STEAM_APPID,
            contextid: COMMUNITY_CONTEXTID,
            assetid,
            classid,
            market_fee_app,
            kind,
            tradable,
            amount: 1,
        }
    }
}
