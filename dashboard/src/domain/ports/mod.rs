//! Domain ports (traits)
//!
//! Port traits define interfaces that the application layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod analytics;
pub mod feed_source;
pub mod market_source;
pub mod storage;
pub mod visibility;

pub use analytics::{AnalyticsClient, AnalyticsEvent};
pub use feed_source::FeedSource;
pub use market_source::MarketDataSource;
pub use storage::KeyValueStore;
pub use visibility::{ElementHandle, ObservationId, VisibilityCallback, VisibilityNotifier};
