use crate::error::Error;
use crate::types::HttpClient;
use std::path::Path;
use std::sync::Arc;
use reqwest::{header, cookie::CookieStore};
use reqwest_middleware::ClientBuilder;
use serde::de::DeserializeOwned;
use lazy_regex::{regex_is_match, regex_captures};

pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub fn get_default_middleware<T>(
    cookie_store: Arc<T>,
    user_agent_string: &'static str,
) -> Result<HttpClient, reqwest::Error>
where
    T: CookieStore + 'static,
{
    let mut headers = header::HeaderMap::new();

    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));

    let client = reqwest::ClientBuilder::new()
        .cookie_provider(cookie_store)
        .default_headers(headers)
        .build()?;

    Ok(ClientBuilder::new(client).build())
}

/// Generates a random sessionid.
pub fn generate_sessionid() -> String {
    // Should look like "37bf523a24034ec06c60ec61"
    (0..12)
        .map(|_| {
            let b = rand::random::<u8>();

            format!("{b:02x}")
        })
        .collect()
}

/// Extracts the sessionid and the 64-bit SteamID from a list of cookies.
pub fn get_sessionid_and_steamid_from_cookies(
    cookies: &[String],
) -> (Option<String>, Option<u64>) {
    let mut sessionid = None;
    let mut steamid = None;

    for cookie in cookies {
        if let Some((_, value)) = regex_captures!(r#"^sessionid=([^;]+)"#, cookie) {
            sessionid = Some(value.to_string());
        } else if let Some((_, value)) = regex_captures!(r#"^steamLoginSecure=(\d{17})"#, cookie) {
            steamid = value.parse::<u64>().ok();
        }
    }

    (sessionid, steamid)
}

fn is_login(location_option: Option<&header::HeaderValue>) -> bool {
    match location_option {
        Some(location) => {
            if let Ok(location_str) = location.to_str() {
                regex_is_match!("/login", location_str)
            } else {
                false
            }
        },
        None => false,
    }
}

/// Checks the status of a response, returning its body.
pub async fn check_response(response: reqwest::Response) -> Result<bytes::Bytes, Error> {
    let status = response.status();

    match status.as_u16() {
        300..=399 if is_login(response.headers().get(header::LOCATION)) => {
            Err(Error::NotLoggedIn)
        },
        400..=599 => {
            Err(Error::Http(status))
        },
        _ => {
            Ok(response.bytes().await?)
        }
    }
}

/// Checks the response and parses its body as JSON.
pub async fn parses_response<D>(response: reqwest::Response) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    let body = check_response(response).await?;

    parse_body(&body)
}

pub(crate) fn parse_body<D>(body: &[u8]) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    match serde_json::from_slice::<D>(body) {
        Ok(body) => Ok(body),
        Err(parse_error) => {
            // unexpected response
            let html = String::from_utf8_lossy(body);

            if regex_is_match!(r#"<h1>Sorry!</h1>"#, &html) {
                if let Some((_, message)) = regex_captures!("<h3>(.+)</h3>", &html) {
                    Err(Error::Response(message.into()))
                } else {
                    Err(Error::Response("Unexpected error".into()))
                }
            } else if regex_is_match!(r#"<h1>Sign In</h1>"#, &html) && regex_is_match!(r#"g_steamID = false;"#, &html) {
                Err(Error::NotLoggedIn)
            } else if let Some((_, message)) = regex_captures!(r#"<div id="error_msg">\s*([^<]+)\s*</div>"#, &html) {
                Err(Error::Trade(message.trim().into()))
            } else {
                Err(Error::Parse(parse_error))
            }
        }
    }
}

/// Writes a file atomically by writing to a temporary file then renaming it over the
/// destination.
pub async fn write_file_atomic<P>(
    filepath: P,
    bytes: &[u8],
) -> std::io::Result<()>
where
    P: AsRef<Path>,
{
    let filepath = filepath.as_ref();
    let mut temp_filename = filepath.as_os_str().to_owned();

    temp_filename.push(".tmp");

    let temp_filepath = Path::new(&temp_filename);

    if let Some(parent) = filepath.parent() {
        if !parent.as_os_str().is_empty() {
            async_fs::create_dir_all(parent).await?;
        }
    }

    match async_fs::write(temp_filepath, bytes).await {
        Ok(_) => async_fs::rename(temp_filepath, filepath).await,
        Err(error) => {
            // something went wrong writing to this file...
            let _ = async_fs::remove_file(temp_filepath).await;

            Err(error)
        }
    }
}
