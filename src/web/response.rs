use crate::enums::ItemKind;
use crate::error::{Error, MissingDescriptionError};
use crate::response::Asset;
use crate::serializers::{string, from_int_to_bool, option_str_to_number};
use crate::types::{AppId, ContextId, AssetId, Amount, ClassId};
use std::collections::HashMap;
use serde::{Deserialize, Deserializer};

type InstanceId = u64;

/// Deserializes a number which is sometimes sent as a string.
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<AppId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(AppId),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Deserialize, Debug)]
pub struct RawAsset {
    pub appid: AppId,
    #[serde(with = "string")]
    pub contextid: ContextId,
    #[serde(with = "string")]
    pub assetid: AssetId,
    #[serde(with = "string")]
    pub classid: ClassId,
    #[serde(default, deserialize_with = "option_str_to_number")]
    pub instanceid: Option<InstanceId>,
    #[serde(with = "string")]
    pub amount: Amount,
}

#[derive(Deserialize, Debug)]
pub struct RawTag {
    pub category: String,
    pub internal_name: String,
}

#[derive(Deserialize, Debug)]
pub struct RawDescription {
    #[serde(with = "string")]
    pub classid: ClassId,
    #[serde(default, deserialize_with = "option_str_to_number")]
    pub instanceid: Option<InstanceId>,
    #[serde(deserialize_with = "from_int_to_bool")]
    pub tradable: bool,
    #[serde(default, deserialize_with = "number_or_string")]
    pub market_fee_app: Option<AppId>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
}

impl RawDescription {
    fn tag(&self, category: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.category == category)
            .map(|tag| tag.internal_name.as_str())
    }

    pub fn kind(&self) -> ItemKind {
        let is_foil = self.tag("cardborder") == Some("cardborder_1");

        ItemKind::from_tags(self.classid, self.tag("item_class"), is_foil)
    }
}

/// One page of `/inventory/{steamid}/{appid}/{contextid}`.
#[derive(Deserialize, Debug)]
pub struct GetInventoryResponse {
    #[serde(default, deserialize_with = "from_int_to_bool")]
    pub success: bool,
    #[serde(default, deserialize_with = "from_int_to_bool")]
    pub more_items: bool,
    #[serde(default)]
    pub assets: Vec<RawAsset>,
    #[serde(default)]
    pub descriptions: Vec<RawDescription>,
    #[serde(default, deserialize_with = "option_str_to_number")]
    pub last_assetid: Option<AssetId>,
}

impl GetInventoryResponse {
    /// Checks the page and returns where the next page starts, or `None` on the last page.
    /// `start_assetid` is where this page was requested from.
    pub fn next_page(&self, start_assetid: Option<AssetId>) -> Result<Option<AssetId>, Error> {
        if !self.success {
            return Err(Error::ResponseUnsuccessful);
        }

        if !self.more_items {
            return Ok(None);
        }

        // a cursor that does not move would page forever
        match self.last_assetid {
            Some(last_assetid) if Some(last_assetid) != start_assetid => Ok(Some(last_assetid)),
            _ => Err(Error::MalformedResponse),
        }
    }

    /// Joins each asset with its description.
    pub fn into_assets(self) -> Result<Vec<Asset>, Error> {
        let descriptions = self.descriptions
            .iter()
            .map(|description| ((description.classid, description.instanceid.unwrap_or(0)), description))
            .collect::<HashMap<_, _>>();

        self.assets
            .iter()
            .map(|asset| {
                let key = (asset.classid, asset.instanceid.unwrap_or(0));
                let description = descriptions
                    .get(&key)
                    .ok_or_else(|| Error::MissingDescription(MissingDescriptionError {
                        appid: asset.appid,
                        classid: asset.classid,
                        assetid: asset.assetid,
                    }))?;

                Ok(Asset {
                    appid: asset.appid,
                    contextid: asset.contextid,
                    assetid: asset.assetid,
                    classid: asset.classid,
                    market_fee_app: description.market_fee_app.unwrap_or(0),
                    kind: description.kind(),
                    tradable: description.tradable,
                    amount: asset.amount,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "assets": [
            {"appid":753,"contextid":"6","assetid":"25000000001","classid":"4631300","instanceid":"0","amount":"1"},
            {"appid":753,"contextid":"6","assetid":"25000000002","classid":"4631301","instanceid":"0","amount":"1"},
            {"appid":753,"contextid":"6","assetid":"25000000003","classid":"667924416","instanceid":"0","amount":"1250"}
        ],
        "descriptions": [
            {
                "appid":753,"classid":"4631300","instanceid":"0","tradable":1,"name":"Sniper",
                "type":"Team Fortress 2 Trading Card","market_fee_app":"440",
                "tags":[
                    {"category":"Game","internal_name":"app_440"},
                    {"category":"item_class","internal_name":"item_class_2"},
                    {"category":"cardborder","internal_name":"cardborder_0"}
                ]
            },
            {
                "appid":753,"classid":"4631301","instanceid":"0","tradable":0,"name":"Spy (Foil)",
                "type":"Team Fortress 2 Foil Trading Card","market_fee_app":440,
                "tags":[
                    {"category":"item_class","internal_name":"item_class_2"},
                    {"category":"cardborder","internal_name":"cardborder_1"}
                ]
            },
            {
                "appid":753,"classid":"667924416","instanceid":"0","tradable":1,"name":"Gems",
                "type":"Steam Gems","market_fee_app":"753",
                "tags":[{"category":"item_class","internal_name":"item_class_7"}]
            }
        ],
        "more_items":1,
        "last_assetid":"25000000003",
        "total_inventory_count":3,
        "success":1
    }"#;

    #[test]
    fn joins_assets_with_descriptions() {
        let response: GetInventoryResponse = serde_json::from_str(PAGE).unwrap();

        assert!(response.success);
        assert!(response.more_items);
        assert_eq!(response.last_assetid, Some(25000000003));

        let assets = response.into_assets().unwrap();

        assert_eq!(assets.len(), 3);
        assert_eq!(assets[0].kind, ItemKind::TradingCard);
        assert_eq!(assets[0].market_fee_app, 440);
        assert!(assets[0].tradable);
        assert_eq!(assets[1].kind, ItemKind::FoilTradingCard);
        assert_eq!(assets[1].market_fee_app, 440);
        assert!(!assets[1].tradable);
        assert_eq!(assets[2].kind, ItemKind::Gems);
        assert_eq!(assets[2].amount, 1250);
    }

    #[test]
    fn parses_empty_inventory() {
        let response: GetInventoryResponse = serde_json::from_str(
            r#"{"total_inventory_count":0,"success":1,"rwgrsn":-2}"#,
        ).unwrap();

        assert!(response.success);
        assert!(!response.more_items);
        assert!(response.into_assets().unwrap().is_empty());
    }

    #[test]
    fn missing_description_is_an_error() {
        let response: GetInventoryResponse = serde_json::from_str(r#"{
            "assets":[{"appid":753,"contextid":"6","assetid":"1","classid":"2","instanceid":"0","amount":"1"}],
            "descriptions":[],
            "success":1
        }"#).unwrap();

        assert!(matches!(
            response.into_assets(),
            Err(Error::MissingDescription(MissingDescriptionError { classid: 2, assetid: 1, .. })),
        ));
    }

    #[test]
    fn pages_until_the_last_page() {
        let response: GetInventoryResponse = serde_json::from_str(PAGE).unwrap();

        assert_eq!(response.next_page(None).unwrap(), Some(25000000003));

        let last: GetInventoryResponse = serde_json::from_str(
            r#"{"assets":[],"descriptions":[],"more_items":0,"success":1}"#,
        ).unwrap();

        assert_eq!(last.next_page(Some(25000000003)).unwrap(), None);
    }

    #[test]
    fn repeated_cursor_is_malformed() {
        let response: GetInventoryResponse = serde_json::from_str(PAGE).unwrap();

        assert!(matches!(response.next_page(Some(25000000003)), Err(Error::MalformedResponse)));

        let no_cursor: GetInventoryResponse = serde_json::from_str(
            r#"{"more_items":1,"success":1}"#,
        ).unwrap();

        assert!(matches!(no_cursor.next_page(None), Err(Error::MalformedResponse)));
    }

    #[test]
    fn unsuccessful_page_is_an_error() {
        let response: GetInventoryResponse = serde_json::from_str(
            r#"{"success":0,"more_items":1,"last_assetid":"5"}"#,
        ).unwrap();

        assert!(matches!(response.next_page(None), Err(Error::ResponseUnsuccessful)));
    }

    #[test]
    fn classifies_gems_by_classid_in_any_language() {
        let response: GetInventoryResponse = serde_json::from_str(r#"{
            "assets":[
                {"appid":753,"contextid":"6","assetid":"1","classid":"667933237","instanceid":"0","amount":"2"},
                {"appid":753,"contextid":"6","assetid":"2","classid":"667924416","instanceid":"0","amount":"35"}
            ],
            "descriptions":[
                {
                    "appid":753,"classid":"667933237","instanceid":"0","tradable":1,"name":"Sac de gemmes",
                    "type":"Gemmes Steam","market_fee_app":"753",
                    "tags":[{"category":"item_class","internal_name":"item_class_7"}]
                },
                {
                    "appid":753,"classid":"667924416","instanceid":"0","tradable":1,"name":"Gemmes",
                    "type":"Gemmes Steam","market_fee_app":"753",
                    "tags":[{"category":"item_class","internal_name":"item_class_7"}]
                }
            ],
            "success":1
        }"#).unwrap();
        let assets = response.into_assets().unwrap();

        assert_eq!(assets[0].kind, ItemKind::SackOfGems);
        assert_eq!(assets[1].kind, ItemKind::Gems);
        assert_eq!(crate::response::GemsInfo::from_items(&assets).total_gems(), 2 * 1000 + 35);
    }
}
