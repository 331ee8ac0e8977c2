//! Market data port trait
//!
//! Defines the interface for the read-only price and bubbles datasets.

use async_trait::async_trait;

use crate::domain::entities::{MarketEntry, Token};
use crate::error::FetchError;

/// Port trait for market data
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the full bubbles dataset (price and performance per window)
    async fn fetch_bubbles(&self) -> Result<Vec<MarketEntry>, FetchError>;

    /// Fetch the token price list
    async fn fetch_tokens(&self) -> Result<Vec<Token>, FetchError>;
}
