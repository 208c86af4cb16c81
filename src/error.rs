//! Error types.

use crate::types::{AppId, AssetId, ClassId};
use reqwest_middleware;
use std::num::ParseIntError;

/// An error reading or writing a file.
#[derive(thiserror::Error, Debug)]
pub enum FileError {
    #[error("Filesystem error: {}", .0)]
    FileSystem(#[from] std::io::Error),
    #[error("Error parsing file contents: {}", .0)]
    Parse(#[from] serde_json::Error),
}

/// Any error from a request to Steam.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid parameter: {}", .0)]
    Parameter(&'static str),
    #[error("Unexpected response: {}", .0)]
    Response(String),
    #[error("Response was not successful")]
    ResponseUnsuccessful,
    #[error("Malformed response")]
    MalformedResponse,
    #[error("Request error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    #[error("Request middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    #[error("Error {}", .0)]
    Http(reqwest::StatusCode),
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Error parsing HTML document: {}", .0)]
    Html(#[from] ParseHtmlError),
    #[error("Missing description for {}:{} (asset {})", .0.appid, .0.classid, .0.assetid)]
    MissingDescription(MissingDescriptionError),
    #[error("Trade error: {}", .0)]
    Trade(String),
    #[error("Invalid URL: {}", .0)]
    Url(#[from] url::ParseError),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}

impl Error {
    /// Whether the error is likely to go away if the request is tried again later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Reqwest(error) => error.is_timeout() || error.is_connect() || error.is_request(),
            Self::ReqwestMiddleware(_) => true,
            Self::Http(status) => status.is_server_error() || status.as_u16() == 429,
            Self::ResponseUnsuccessful => true,
            _ => false,
        }
    }
}

/// An asset in an inventory response had no matching description.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingDescriptionError {
    pub appid: AppId,
    pub classid: ClassId,
    pub assetid: AssetId,
}

/// An HTML page did not have the expected structure.
#[derive(thiserror::Error, Debug)]
pub enum ParseHtmlError {
    #[error("{}", .0)]
    Malformed(&'static str),
    #[error("Invalid selector")]
    ParseSelector,
    #[error("{}", .0)]
    ParseInt(#[from] ParseIntError),
}
