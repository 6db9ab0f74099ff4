//! Errors raised while talking to the site

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("site answered with status {0}")]
    Status(StatusCode),
    #[error("invalid site address: {0}")]
    Address(#[from] url::ParseError),
    #[error("unexpected response: {0}")]
    Decode(String),
}
