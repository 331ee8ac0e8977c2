//! Application layer
//!
//! Contains the dashboard use cases.
//! Services coordinate between domain entities and ports.

pub mod analytics_service;
pub mod feed_loader;
pub mod header_service;
pub mod layout;
pub mod market_ranker;
pub mod market_service;
pub mod scroll_sentinel;
pub mod widget_service;

pub use analytics_service::AnalyticsService;
pub use feed_loader::{FeedLoader, FeedState, LoadOutcome, LoaderStatus, PageTicket};
pub use header_service::{Greeting, HeaderService};
pub use layout::{distribute, is_featured, row_gap, ColumnBreakpoints};
pub use market_ranker::{bubble_size, bubble_tone, bubbles, rank, Bubble, BubbleTone};
pub use market_service::MarketService;
pub use scroll_sentinel::{FeedSession, ScrollSentinel};
pub use widget_service::WidgetService;
