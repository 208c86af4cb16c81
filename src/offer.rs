//! Sending card sets to another account.

use crate::error::Error;
use crate::inventory_cache::InventoryCache;
use crate::provider::{TradeOfferSender, TradeConfirmer};
use crate::request::NewTradeOffer;
use crate::response::SentOffer;
use crate::selector::SetSelection;
use crate::types::LevelMap;
use steamid_ng::SteamID;

/// A request to send card sets.
#[derive(Debug, Clone)]
pub struct SetOfferRequest {
    /// The account receiving the sets.
    pub partner: SteamID,
    /// Trade token of the partner, needed when the bot is not friends with them.
    pub token: Option<String>,
    /// Message to include with the offer.
    pub message: Option<String>,
    /// How many sets to send.
    pub target_sets: u32,
    /// Current badge levels of the partner.
    pub levels: LevelMap,
    /// Send whatever is available when fewer than `target_sets` sets can be found.
    pub allow_partial: bool,
}

impl SetOfferRequest {
    pub fn new(partner: SteamID, target_sets: u32) -> Self {
        Self {
            partner,
            token: None,
            message: None,
            target_sets,
            levels: LevelMap::new(),
            allow_partial: false,
        }
    }
}

/// What happened to a [`SetOfferRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum SetOfferOutcome {
    /// Not enough sets were available so nothing was sent.
    Insufficient {
        available: u32,
        target: u32,
    },
    /// The offer was sent and its items committed.
    Sent {
        sent_offer: SentOffer,
        selection: SetSelection,
        /// Whether the offer is confirmed. `false` when confirmation was needed but failed; the
        /// offer then waits on a manual confirmation.
        confirmed: bool,
    },
}

/// Selects sets from the bot's inventory, sends them and confirms the offer.
///
/// The offered items are committed as soon as the offer is sent, so they are not offered again
/// before the host reports the offer's outcome through [`InventoryCache::release`].
pub async fn send_sets(
    cache: &mut InventoryCache,
    sender: &dyn TradeOfferSender,
    confirmer: &dyn TradeConfirmer,
    request: &SetOfferRequest,
) -> Result<SetOfferOutcome, Error> {
    if request.target_sets == 0 {
        return Err(Error::Parameter("Cannot send zero sets"));
    }

    let selection = cache.select_sets(&request.levels, request.target_sets).await;

    if selection.sets == 0 || (!selection.is_complete(request.target_sets) && !request.allow_partial) {
        log::info!(
            "Only {} of {} sets available for {}",
            selection.sets,
            request.target_sets,
            u64::from(request.partner),
        );

        return Ok(SetOfferOutcome::Insufficient {
            available: selection.sets,
            target: request.target_sets,
        });
    }

    let offer = NewTradeOffer::builder(request.partner)
        .items_to_give(&selection.items)
        .token(request.token.clone())
        .message(request.message.clone())
        .build();
    let sent_offer = sender.send_offer(&offer).await?;

    cache.commit(&selection.items);
    log::info!(
        "Sent offer {} with {} sets from {} games",
        sent_offer.tradeofferid,
        selection.sets,
        selection.games(),
    );

    let confirmed = if sent_offer.needs_confirmation() {
        match confirmer.confirm(&[sent_offer.tradeofferid]).await {
            Ok(confirmed) => confirmed,
            Err(error) => {
                log::warn!("Error confirming offer {}: {error}", sent_offer.tradeofferid);
                false
            },
        }
    } else {
        true
    };

    Ok(SetOfferOutcome::Sent {
        sent_offer,
        selection,
        confirmed,
    })
}
