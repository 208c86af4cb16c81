use crate::response::Asset;
use crate::types::{AppId, ContextId, AssetId, Amount};
use crate::serializers::string;
use serde::{Serialize, Deserialize};

/// An item to send in a trade offer.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct NewTradeOfferItem {
    /// The app ID. `753` for Steam community items.
    pub appid: AppId,
    #[serde(with = "string")]
    /// The context ID.
    pub contextid: ContextId,
    #[serde(with = "string")]
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    pub assetid: AssetId,
    /// The amount. If this item is not stackable the amount will be `1`.
    pub amount: Amount,
}

impl From<&Asset> for NewTradeOfferItem {
    fn from(asset: &Asset) -> NewTradeOfferItem {
        NewTradeOfferItem {
            appid: asset.appid,
            contextid: asset.contextid,
            assetid: asset.assetid,
            amount: asset.amount,
        }
    }
}

impl From<Asset> for NewTradeOfferItem {
    fn from(asset: Asset) -> NewTradeOfferItem {
        NewTradeOfferItem::from(&asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ItemKind;
    
    #[test]
    fn serializes_ids_as_strings() {
        let asset = Asset::new(22202000000, 1000, 730, ItemKind::TradingCard, true);
        let item = NewTradeOfferItem::from(&asset);
        
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"appid":753,"contextid":"6","assetid":"22202000000","amount":1}"#,
        );
    }
}
