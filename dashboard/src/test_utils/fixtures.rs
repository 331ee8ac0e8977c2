//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::collections::BTreeMap;

use crate::domain::entities::{
    Article, Author, Engagement, FeedItem, FeedPage, MarketEntry, Post, PriceChanges, Token,
    TokenAttributes, TokenMarketData,
};

/// Create a test post with a short body and no media
pub fn test_post(id: &str) -> FeedItem {
    FeedItem::Post(Post {
        id: id.to_string(),
        user: Author {
            username: "tester".to_string(),
            display_name: "Test User".to_string(),
            profile_photo: Some("https://avatars.example/tester.png".to_string()),
        },
        content: "gm".to_string(),
        html: "<p>gm</p>".to_string(),
        media: None,
        timestamp: "2024-05-01T10:00:00Z".to_string(),
        engagement: Engagement {
            views: 1234,
            likes: 56,
            replies: 7,
            reshares: 8,
            bookmarks: 0,
        },
    })
}

/// Create a test article linking to `https://blog.example/{id}`
pub fn test_article(id: &str) -> FeedItem {
    FeedItem::Article(Article {
        id: id.to_string(),
        title: format!("Article {}", id),
        description: "Market recap".to_string(),
        media: None,
        published_at: "2024-05-02T08:00:00Z".to_string(),
        website_url: format!("https://blog.example/{}", id),
    })
}

/// Create a feed page with 20 items per page
pub fn test_page(page: u32, total_pages: u32, items: Vec<FeedItem>) -> FeedPage {
    FeedPage {
        items,
        page,
        page_size: 20,
        total_items: u64::from(total_pages) * 20,
        total_pages,
    }
}

/// Create a market entry with a `day` performance value
pub fn test_market_entry(id: &str, day: Option<f64>) -> MarketEntry {
    MarketEntry {
        id: id.to_string(),
        name: id.to_string(),
        symbol: id.to_uppercase(),
        price: Some(1.0),
        performance: BTreeMap::from([("day".to_string(), day)]),
        marketcap: Some(1_000_000.0),
        dominance: None,
    }
}

/// Create a priced token
pub fn test_token(id: &str, name: &str, symbol: &str, price: f64, change_1d: f64) -> Token {
    Token {
        id: id.to_string(),
        attributes: TokenAttributes {
            name: name.to_string(),
            symbol: symbol.to_string(),
            icon: None,
            market_data: TokenMarketData {
                price: Some(price),
                changes: PriceChanges {
                    percent_1d: Some(change_1d),
                },
            },
        },
    }
}
