//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing and that
//! record the calls made against them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::entities::{FeedPage, MarketEntry, Token};
use crate::domain::ports::{
    AnalyticsClient, AnalyticsEvent, FeedSource, KeyValueStore, MarketDataSource,
};
use crate::error::{AnalyticsError, FetchError, StoreError};

// ============================================================================
// Mock Feed Source
// ============================================================================

#[derive(Default)]
pub struct MockFeedSource {
    pages: HashMap<u32, FeedPage>,
    failures: HashMap<u32, u16>,
    calls: Mutex<Vec<u32>>,
    gate: Option<Arc<Notify>>,
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `page` for its page number
    pub fn with_page(mut self, page: FeedPage) -> Self {
        self.pages.insert(page.page, page);
        self
    }

    /// Fail requests for `page` with an HTTP status
    pub fn with_failure(mut self, page: u32, status: u16) -> Self {
        self.failures.insert(page, status);
        self
    }

    /// Hold every fetch until the returned gate is notified
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Requested page numbers, in call order
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch_page(&self, page: u32) -> Result<FeedPage, FetchError> {
        self.calls.lock().unwrap().push(page);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if let Some(status) = self.failures.get(&page) {
            return Err(FetchError::Status {
                status: *status,
                message: "mock failure".to_string(),
            });
        }

        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                message: format!("no page {}", page),
            })
    }
}

// ============================================================================
// Mock Market Data Source
// ============================================================================

#[derive(Default)]
pub struct MockMarketDataSource {
    tokens: Vec<Token>,
    entries: Vec<MarketEntry>,
    fail: bool,
}

impl MockMarketDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch fails with a 500
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens.push(token);
        self
    }

    pub fn with_entry(mut self, entry: MarketEntry) -> Self {
        self.entries.push(entry);
        self
    }

    fn check(&self) -> Result<(), FetchError> {
        if self.fail {
            return Err(FetchError::Status {
                status: 500,
                message: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MarketDataSource for MockMarketDataSource {
    async fn fetch_bubbles(&self) -> Result<Vec<MarketEntry>, FetchError> {
        self.check()?;
        Ok(self.entries.clone())
    }

    async fn fetch_tokens(&self) -> Result<Vec<Token>, FetchError> {
        self.check()?;
        Ok(self.tokens.clone())
    }
}

// ============================================================================
// Mock Analytics Client
// ============================================================================

#[derive(Default)]
pub struct MockAnalyticsClient {
    tracked: Mutex<Vec<(String, AnalyticsEvent)>>,
    fail: bool,
}

impl MockAnalyticsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `(distinct_id, event)` pairs, in call order
    pub fn tracked(&self) -> Vec<(String, AnalyticsEvent)> {
        self.tracked.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalyticsClient for MockAnalyticsClient {
    async fn track(
        &self,
        distinct_id: &str,
        event: &AnalyticsEvent,
    ) -> Result<(), AnalyticsError> {
        if self.fail {
            return Err(AnalyticsError::Rejected {
                status: 500,
                message: "mock failure".to_string(),
            });
        }
        self.tracked
            .lock()
            .unwrap()
            .push((distinct_id.to_string(), event.clone()));
        Ok(())
    }
}

// ============================================================================
// Failing Store
// ============================================================================

/// Store whose reads see `entries` and whose writes always fail
#[derive(Default)]
pub struct FailingStore {
    entries: HashMap<String, String>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only store",
        )))
    }
}
