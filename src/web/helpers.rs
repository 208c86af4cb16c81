use super::HOSTNAME;
use crate::error::{Error, ParseHtmlError};
use crate::request::NewTradeOffer;
use crate::types::AppId;
use scraper::{Html, Selector};
use url::Url;

/// Counts the cards shown on a badge page. Each card of the set is listed once whether the
/// account owns it or not.
pub fn count_badge_cards(html: &str) -> Result<u32, ParseHtmlError> {
    let document = Html::parse_document(html);
    let card_selector = Selector::parse(".badge_card_set_card")
        .map_err(|_e| ParseHtmlError::ParseSelector)?;
    let count = document.select(&card_selector).count();

    if count == 0 {
        // a page for a game without cards redirects to the badge list instead
        return Err(ParseHtmlError::Malformed("No cards on badge page"));
    }

    u32::try_from(count)
        .map_err(|_e| ParseHtmlError::Malformed("Too many cards on badge page"))
}

/// Reads the set size from a badge page request which ended on `path`.
///
/// Games without trading cards redirect to the badge list, which gives `0`. Any other page is
/// an error so that a bad response is never cached as a size.
pub fn set_size_from_badge_page(appid: AppId, path: &str, html: &str) -> Result<u32, Error> {
    if path.starts_with("/login") {
        return Err(Error::NotLoggedIn);
    }

    if path.contains("/gamecards/") {
        return Ok(count_badge_cards(html)?);
    }

    if path.trim_end_matches('/').ends_with("/badges") {
        log::debug!("Badge page for {appid} redirected to the badge list");
        return Ok(0);
    }

    log::debug!("Badge page for {appid} redirected to {path}");
    Err(ParseHtmlError::Malformed("Badge page redirected to an unexpected page").into())
}

/// The page an offer is sent from.
pub fn offer_referer(offer: &NewTradeOffer) -> Result<Url, Error> {
    let mut url = Url::parse(&format!("{HOSTNAME}/tradeoffer/new/"))?;

    {
        let mut query = url.query_pairs_mut();

        query.append_pair("partner", &offer.partner.account_id().to_string());

        if let Some(token) = &offer.token {
            query.append_pair("token", token);
        }
    }

    Ok(url)
}
