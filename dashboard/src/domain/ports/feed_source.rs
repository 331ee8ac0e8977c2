//! Feed source port trait
//!
//! Defines the interface for the paginated feed endpoint.

use async_trait::async_trait;

use crate::domain::entities::FeedPage;
use crate::error::FetchError;

/// Port trait for fetching feed pages
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch one 1-based page of the feed
    async fn fetch_page(&self, page: u32) -> Result<FeedPage, FetchError>;
}
