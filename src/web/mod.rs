//! A client for the Steam Community website.

mod helpers;
mod response;

use helpers::{offer_referer, set_size_from_badge_page};
use response::GetInventoryResponse;
use crate::error::Error;
use crate::helpers::{
    USER_AGENT_STRING,
    check_response,
    generate_sessionid,
    get_default_middleware,
    get_sessionid_and_steamid_from_cookies,
    parses_response,
};
use crate::provider::{InventoryProvider, SetSizeProvider, TradeOfferSender};
use crate::request::{NewTradeOffer, NewTradeOfferItem};
use crate::response::{Asset, SentOffer};
use crate::serializers::steamid_as_string;
use crate::types::{AppId, AssetId, HttpClient, STEAM_APPID, COMMUNITY_CONTEXTID};
use std::sync::{Arc, PoisonError, RwLock};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::REFERER;
use serde::Serialize;
use steamid_ng::SteamID;
use url::Url;

pub(crate) const HOSTNAME: &str = "https://steamcommunity.com";
/// The number of items to fetch per page when getting inventories.
pub const DEFAULT_INVENTORY_PAGE_SIZE: u32 = 2000;

/// Fetches inventories and badge pages and sends offers using a logged-in web session.
#[derive(Debug)]
pub struct SteamCommunityClient {
    client: HttpClient,
    cookies: Arc<Jar>,
    sessionid: RwLock<Option<String>>,
    steamid: RwLock<Option<SteamID>>,
    language: String,
    inventory_page_size: u32,
}

impl SteamCommunityClient {
    /// Creates a client from web session cookies, e.g. `sessionid=...` and
    /// `steamLoginSecure=...`. A sessionid is generated when none is given.
    pub fn new(cookies: &[String]) -> Result<Self, Error> {
        let jar = Arc::new(Jar::default());
        let client = get_default_middleware(Arc::clone(&jar), USER_AGENT_STRING)?;
        let this = Self {
            client,
            cookies: jar,
            sessionid: RwLock::new(None),
            steamid: RwLock::new(None),
            language: String::from("english"),
            inventory_page_size: DEFAULT_INVENTORY_PAGE_SIZE,
        };

        this.set_cookies(cookies)?;
        Ok(this)
    }

    /// The language for item names in inventories.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// The number of items to fetch per inventory page.
    pub fn inventory_page_size(mut self, inventory_page_size: u32) -> Self {
        self.inventory_page_size = inventory_page_size.max(1);
        self
    }

    /// Replaces the web session, e.g. after logging in again.
    pub fn set_cookies(&self, cookies: &[String]) -> Result<(), Error> {
        let url = HOSTNAME.parse::<Url>()?;
        let (sessionid, steamid) = get_sessionid_and_steamid_from_cookies(cookies);

        for cookie_str in cookies {
            self.cookies.add_cookie_str(cookie_str, &url);
        }

        let sessionid = match sessionid {
            Some(sessionid) => sessionid,
            None => {
                let sessionid = generate_sessionid();

                self.cookies.add_cookie_str(&format!("sessionid={sessionid}"), &url);
                sessionid
            },
        };

        *self.sessionid.write().unwrap_or_else(PoisonError::into_inner) = Some(sessionid);
        *self.steamid.write().unwrap_or_else(PoisonError::into_inner) = steamid.map(SteamID::from);

        Ok(())
    }

    /// The account the session belongs to, if the cookies included it.
    pub fn steamid(&self) -> Option<SteamID> {
        *self.steamid.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn sessionid(&self) -> Option<String> {
        self.sessionid.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn get_uri(&self, pathname: &str) -> String {
        format!("{HOSTNAME}{pathname}")
    }

    /// Gets the community inventory of `steamid`, following every page.
    pub async fn get_inventory(&self, steamid: SteamID) -> Result<Vec<Asset>, Error> {
        #[derive(Serialize, Debug)]
        struct Query<'a> {
            l: &'a str,
            count: u32,
            #[serde(skip_serializing_if = "Option::is_none")]
            start_assetid: Option<AssetId>,
        }

        let sid = u64::from(steamid);
        let uri = self.get_uri(&format!("/inventory/{sid}/{STEAM_APPID}/{COMMUNITY_CONTEXTID}"));
        let referer = self.get_uri(&format!("/profiles/{sid}/inventory"));
        let mut inventory = Vec::new();
        let mut start_assetid: Option<AssetId> = None;

        loop {
            let response = self.client.get(&uri)
                .header(REFERER, &referer)
                .query(&Query {
                    l: &self.language,
                    count: self.inventory_page_size,
                    start_assetid,
                })
                .send()
                .await?;
            let body: GetInventoryResponse = parses_response(response).await?;
            let next_page = body.next_page(start_assetid)?;

            inventory.extend(body.into_assets()?);

            match next_page {
                Some(last_assetid) => start_assetid = Some(last_assetid),
                None => break,
            }
        }

        log::debug!("Got {} items in inventory of {sid}", inventory.len());

        Ok(inventory)
    }

    /// Gets the number of cards in the set of `appid` from the badge page of `steamid`. Returns
    /// `0` for games without trading cards.
    pub async fn get_set_size(&self, steamid: SteamID, appid: AppId) -> Result<u32, Error> {
        let uri = self.get_uri(&format!("/profiles/{}/gamecards/{appid}/", u64::from(steamid)));
        let response = self.client.get(&uri)
            .send()
            .await?;
        let path = response.url().path().to_owned();
        let body = check_response(response).await?;
        let html = String::from_utf8_lossy(&body);

        set_size_from_badge_page(appid, &path, &html)
    }

    /// Sends an offer giving items.
    pub async fn send_offer(&self, offer: &NewTradeOffer) -> Result<SentOffer, Error> {
        #[derive(Serialize, Debug)]
        struct OfferFormUser<'b> {
            assets: &'b [NewTradeOfferItem],
            currency: [(); 0],
            ready: bool,
        }

        #[derive(Serialize, Debug)]
        struct OfferForm<'b> {
            newversion: bool,
            version: usize,
            me: OfferFormUser<'b>,
            them: OfferFormUser<'b>,
        }

        #[derive(Serialize, Debug)]
        struct TradeOfferCreateParams<'b> {
            #[serde(skip_serializing_if = "Option::is_none")]
            trade_offer_access_token: Option<&'b str>,
        }

        #[derive(Serialize, Debug)]
        struct SendOfferParams<'b> {
            sessionid: &'b str,
            serverid: u32,
            json_tradeoffer: String,
            tradeoffermessage: &'b str,
            captcha: &'static str,
            trade_offer_create_params: String,
            #[serde(serialize_with = "steamid_as_string")]
            partner: &'b SteamID,
        }

        if offer.is_empty() {
            return Err(Error::Parameter("Cannot send an empty offer"));
        }

        let sessionid = self.sessionid()
            .ok_or(Error::NotLoggedIn)?;
        let referer = offer_referer(offer)?;
        let json_tradeoffer = serde_json::to_string(&OfferForm {
            newversion: true,
            version: offer.items_to_give.len() + 1,
            me: OfferFormUser {
                assets: &offer.items_to_give,
                currency: [],
                ready: false,
            },
            them: OfferFormUser {
                assets: &[],
                currency: [],
                ready: false,
            },
        })?;
        let trade_offer_create_params = serde_json::to_string(&TradeOfferCreateParams {
            trade_offer_access_token: offer.token.as_deref(),
        })?;
        let params = SendOfferParams {
            sessionid: &sessionid,
            serverid: 1,
            json_tradeoffer,
            tradeoffermessage: offer.message.as_deref().unwrap_or_default(),
            captcha: "",
            trade_offer_create_params,
            partner: &offer.partner,
        };
        let response = self.client.post(self.get_uri("/tradeoffer/new/send"))
            .header(REFERER, referer.as_str())
            .form(&params)
            .send()
            .await?;
        let body: SentOffer = parses_response(response).await?;

        Ok(body)
    }
}

#[async_trait]
impl InventoryProvider for SteamCommunityClient {
    async fn fetch_inventory(&self, steamid: SteamID) -> Result<Vec<Asset>, Error> {
        self.get_inventory(steamid).await
    }
}

#[async_trait]
impl SetSizeProvider for SteamCommunityClient {
    async fn fetch_set_size(&self, steamid: SteamID, appid: AppId) -> Result<u32, Error> {
        self.get_set_size(steamid, appid).await
    }
}

#[async_trait]
impl TradeOfferSender for SteamCommunityClient {
    async fn send_offer(&self, offer: &NewTradeOffer) -> Result<SentOffer, Error> {
        SteamCommunityClient::send_offer(self, offer).await
    }
}
