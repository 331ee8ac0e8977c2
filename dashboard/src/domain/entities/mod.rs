//! Domain entities
//!
//! Pure domain models for the feed, market and sidebar widgets.

pub mod feed_item;
pub mod market;
pub mod widget;

pub use feed_item::{Article, Author, Engagement, FeedItem, FeedPage, Media, Post};
pub use market::{
    MarketEntry, PerformanceWindow, PriceChanges, Token, TokenAttributes, TokenIcon,
    TokenMarketData, TokenQuote, Trend,
};
pub use widget::{NftOfTheDay, PortfolioSnapshot, WidgetKind};
