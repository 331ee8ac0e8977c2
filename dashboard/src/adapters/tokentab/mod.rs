//! TokenTab HTTP adapter
//!
//! Clients for the feed, prices and bubbles endpoints.

pub mod feed_client;
pub mod market_client;

pub use feed_client::HttpFeedClient;
pub use market_client::HttpMarketClient;

use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Map a response to `T`: non-2xx is `Status`, an undecodable body is `Parse`
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, FetchError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(FetchError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
}
