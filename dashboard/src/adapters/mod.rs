//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod posthog;
pub mod storage;
pub mod tokentab;
pub mod visibility;

pub use posthog::{NoopAnalyticsClient, PostHogClient};
pub use storage::{InMemoryStore, JsonFileStore};
pub use tokentab::{HttpFeedClient, HttpMarketClient};
pub use visibility::ManualVisibilityNotifier;
