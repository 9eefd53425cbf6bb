//! Single-page HTTP retrieval with the client identity and timeout every
//! upstream request shares.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Generic, non-identifying client identity sent with every request
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Upstream search requests are cut off after this many seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

/// Why one category produced no records
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid search url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
}

/// Fetch one page body. Non-success statuses are errors; the caller
/// decides whether that is fatal.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .header("User-Agent", USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    Ok(response.text().await?)
}
