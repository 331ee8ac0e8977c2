//! Feed endpoint client

use async_trait::async_trait;
use reqwest::Client;

use super::handle_response;
use crate::domain::entities::FeedPage;
use crate::domain::ports::FeedSource;
use crate::error::FetchError;

/// `GET <feed-url>?page=<n>`
pub struct HttpFeedClient {
    http: Client,
    url: String,
}

impl HttpFeedClient {
    pub fn new(url: String) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl FeedSource for HttpFeedClient {
    async fn fetch_page(&self, page: u32) -> Result<FeedPage, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidPage(page));
        }

        let response = self
            .http
            .get(&self.url)
            .query(&[("page", page)])
            .send()
            .await?;

        handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::FeedItem;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HttpFeedClient {
        HttpFeedClient::new(format!("{}/getFeeds", server.uri()))
    }

    #[tokio::test]
    async fn fetches_requested_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/getFeeds"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cards": [
                    {
                        "type": "blog",
                        "id": "b1",
                        "title": "Weekly recap",
                        "publishedAt": "2024-05-02T08:00:00Z",
                        "websiteUrl": "https://blog.example/b1"
                    },
                    {"type": "poll", "id": "x"}
                ],
                "page": 2,
                "pageSize": 20,
                "totalItems": 22,
                "totalPages": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client(&server).fetch_page(2).await.unwrap();

        assert_eq!(page.page, 2);
        assert!(!page.has_more());
        assert_eq!(page.items.len(), 2);
        assert!(matches!(page.items[0], FeedItem::Article(_)));
        assert_eq!(page.items[1], FeedItem::Unknown);
    }

    #[tokio::test]
    async fn non_success_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/getFeeds"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let result = client(&server).fetch_page(1).await;

        match result {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/getFeeds"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let result = client(&server).fetch_page(1).await;

        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn page_zero_never_hits_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server).fetch_page(0).await;

        assert!(matches!(result, Err(FetchError::InvalidPage(0))));
    }
}
