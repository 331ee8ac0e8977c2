//! Prices and bubbles endpoint client

use async_trait::async_trait;
use reqwest::Client;

use super::handle_response;
use crate::domain::entities::{MarketEntry, Token};
use crate::domain::ports::MarketDataSource;
use crate::error::FetchError;

pub struct HttpMarketClient {
    http: Client,
    prices_url: String,
    bubbles_url: String,
}

impl HttpMarketClient {
    pub fn new(prices_url: String, bubbles_url: String) -> Self {
        Self {
            http: Client::new(),
            prices_url,
            bubbles_url,
        }
    }
}

#[async_trait]
impl MarketDataSource for HttpMarketClient {
    async fn fetch_bubbles(&self) -> Result<Vec<MarketEntry>, FetchError> {
        let response = self.http.get(&self.bubbles_url).send().await?;
        let entries: Vec<MarketEntry> = handle_response(response).await?;
        tracing::debug!(count = entries.len(), "Fetched market entries");
        Ok(entries)
    }

    async fn fetch_tokens(&self) -> Result<Vec<Token>, FetchError> {
        let response = self.http.get(&self.prices_url).send().await?;
        let tokens: Vec<Token> = handle_response(response).await?;
        tracing::debug!(count = tokens.len(), "Fetched token prices");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PerformanceWindow;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HttpMarketClient {
        HttpMarketClient::new(
            format!("{}/getPrices", server.uri()),
            format!("{}/bubbles.json", server.uri()),
        )
    }

    #[tokio::test]
    async fn fetches_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/getPrices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "eth",
                "attributes": {
                    "name": "Ethereum",
                    "symbol": "ETH",
                    "icon": {"url": "https://icons.example/eth.png"},
                    "market_data": {"price": 3012.4, "changes": {"percent_1d": -0.8}}
                }
            }])))
            .mount(&server)
            .await;

        let tokens = client(&server).fetch_tokens().await.unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].attributes.symbol, "ETH");
        assert_eq!(tokens[0].attributes.market_data.changes.percent_1d, Some(-0.8));
    }

    #[tokio::test]
    async fn fetches_bubbles_with_null_windows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bubbles.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "btc", "name": "Bitcoin", "symbol": "BTC", "price": 67000.0,
                 "performance": {"day": 2.5, "week": null}},
                {"id": "odd", "name": "Odd", "symbol": "ODD", "price": null,
                 "performance": {}}
            ])))
            .mount(&server)
            .await;

        let entries = client(&server).fetch_bubbles().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_rankable(PerformanceWindow::Day));
        assert!(!entries[0].is_rankable(PerformanceWindow::Week));
        assert!(!entries[1].is_rankable(PerformanceWindow::Day));
    }

    #[tokio::test]
    async fn server_error_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client(&server).fetch_bubbles().await;

        assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
    }
}
