//! Mock providers and item factories shared by the unit tests.

use crate::enums::ItemKind;
use crate::error::Error;
use crate::provider::{InventoryProvider, SetSizeProvider, TradeOfferSender, TradeConfirmer};
use crate::request::NewTradeOffer;
use crate::response::{Asset, SentOffer};
use crate::types::{AppId, AssetId, ClassId, TradeOfferId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use steamid_ng::SteamID;

pub fn steamid() -> SteamID {
    SteamID::from(76561198080179568)
}

pub fn partner() -> SteamID {
    SteamID::from(76561198000000001)
}

pub fn card(assetid: AssetId, classid: ClassId, appid: AppId, tradable: bool) -> Asset {
    Asset::new(assetid, classid, appid, ItemKind::TradingCard, tradable)
}

pub fn foil(assetid: AssetId, classid: ClassId, appid: AppId) -> Asset {
    Asset::new(assetid, classid, appid, ItemKind::FoilTradingCard, true)
}

/// `sets` tradable copies of each of the `cards_per_set` cards of a game. Class IDs are
/// `appid * 100 + n` and asset IDs count up from `first_assetid`.
pub fn full_sets(appid: AppId, cards_per_set: u32, sets: u32, first_assetid: AssetId) -> Vec<Asset> {
    let mut assetid = first_assetid;
    let mut items = Vec::new();

    for _ in 0..sets {
        for n in 0..cards_per_set {
            items.push(card(assetid, class_of(appid, n), appid, true));
            assetid += 1;
        }
    }

    items
}

pub fn class_of(appid: AppId, n: u32) -> ClassId {
    u64::from(appid) * 100 + u64::from(n)
}

pub struct MockSetSizes {
    sizes: Mutex<HashMap<AppId, u32>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    delay: Option<Duration>,
}

impl MockSetSizes {
    /// Games not in `sizes` fail to look up.
    pub fn new<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = (AppId, u32)>,
    {
        Self {
            sizes: Mutex::new(sizes.into_iter().collect()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set(&self, appid: AppId, cards_per_set: u32) {
        self.sizes.lock().unwrap().insert(appid, cards_per_set);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SetSizeProvider for MockSetSizes {
    async fn fetch_set_size(&self, _steamid: SteamID, appid: AppId) -> Result<u32, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let size = self.sizes.lock().unwrap().get(&appid).copied();

        size.ok_or(Error::Http(reqwest::StatusCode::BAD_GATEWAY))
    }
}

pub struct MockInventory {
    items: Mutex<Option<Vec<Asset>>>,
    calls: AtomicUsize,
}

impl MockInventory {
    pub fn new(items: Vec<Asset>) -> Self {
        Self {
            items: Mutex::new(Some(items)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_items(&self, items: Vec<Asset>) {
        *self.items.lock().unwrap() = Some(items);
    }

    /// Makes the next fetches fail.
    pub fn fail(&self) {
        *self.items.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryProvider for MockInventory {
    async fn fetch_inventory(&self, _steamid: SteamID) -> Result<Vec<Asset>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.items.lock().unwrap()
            .clone()
            .ok_or(Error::Http(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}

pub struct MockSender {
    pub sent: Mutex<Vec<NewTradeOffer>>,
    pub needs_confirmation: bool,
    pub fails: bool,
}

impl MockSender {
    pub fn new(needs_confirmation: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            needs_confirmation,
            fails: false,
        }
    }
}

#[async_trait]
impl TradeOfferSender for MockSender {
    async fn send_offer(&self, offer: &NewTradeOffer) -> Result<SentOffer, Error> {
        if self.fails {
            return Err(Error::Trade("You cannot trade with this user.".into()));
        }

        let mut sent = self.sent.lock().unwrap();

        sent.push(offer.clone());

        Ok(SentOffer {
            tradeofferid: 1000 + sent.len() as TradeOfferId,
            needs_mobile_confirmation: self.needs_confirmation,
            needs_email_confirmation: false,
            email_domain: None,
        })
    }
}

pub struct MockConfirmer {
    pub confirmed: Mutex<Vec<TradeOfferId>>,
    pub succeeds: bool,
}

impl MockConfirmer {
    pub fn new(succeeds: bool) -> Self {
        Self {
            confirmed: Mutex::new(Vec::new()),
            succeeds,
        }
    }
}

#[async_trait]
impl TradeConfirmer for MockConfirmer {
    async fn confirm(&self, tradeofferids: &[TradeOfferId]) -> Result<bool, Error> {
        self.confirmed.lock().unwrap().extend_from_slice(tradeofferids);

        Ok(self.succeeds)
    }
}
