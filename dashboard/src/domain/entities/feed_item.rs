//! Feed item domain entities
//!
//! A feed mixes social posts and articles. Items arrive one page at a time
//! and are identified by a string id that is unique within a feed session.

use serde::{Deserialize, Serialize};

/// Media attached to a post or article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Author of a social post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

/// Engagement counters on a social post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub replies: u64,
    #[serde(rename = "retweets", default)]
    pub reshares: u64,
    #[serde(default)]
    pub bookmarks: u64,
}

/// A social post (wire tag `tweet`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user: Author,
    /// Plain-text body
    #[serde(default)]
    pub content: String,
    /// Body markup, may embed `<img>` tags
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub media: Option<Media>,
    pub timestamp: String,
    #[serde(default)]
    pub engagement: Engagement,
}

/// An article (wire tag `blog`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media: Option<Media>,
    pub published_at: String,
    pub website_url: String,
}

/// One unit of aggregated content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedItem {
    #[serde(rename = "tweet")]
    Post(Post),
    #[serde(rename = "blog")]
    Article(Article),
    /// A kind this client does not know how to present
    #[serde(other)]
    Unknown,
}

impl FeedItem {
    pub fn id(&self) -> Option<&str> {
        match self {
            FeedItem::Post(post) => Some(&post.id),
            FeedItem::Article(article) => Some(&article.id),
            FeedItem::Unknown => None,
        }
    }
}

/// One page of the paginated feed endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    #[serde(rename = "cards")]
    pub items: Vec<FeedItem>,
    /// 1-based page number
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_items: u64,
    pub total_pages: u32,
}

impl FeedPage {
    /// Whether another page exists after this one
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Check the pagination invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.page == 0 {
            return Err("page numbers are 1-based".to_string());
        }
        if self.total_pages > 0 && self.page > self.total_pages {
            return Err(format!(
                "page {} exceeds total pages {}",
                self.page, self.total_pages
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_post() {
        let json = r#"{
            "id": "t-1",
            "type": "tweet",
            "user": {"username": "vitalik", "displayName": "Vitalik", "profilePhoto": "https://img/v.png", "smartFollowerCount": 12},
            "content": "gm",
            "html": "<p>gm</p>",
            "timestamp": "2024-05-01T10:00:00Z",
            "engagement": {"likes": 10, "replies": 2, "retweets": 3, "views": 1500, "bookmarks": 1},
            "media": null
        }"#;

        let item: FeedItem = serde_json::from_str(json).unwrap();

        match item {
            FeedItem::Post(post) => {
                assert_eq!(post.id, "t-1");
                assert_eq!(post.user.display_name, "Vitalik");
                assert_eq!(post.engagement.reshares, 3);
                assert_eq!(post.engagement.views, 1500);
                assert!(post.media.is_none());
            }
            other => panic!("expected post, got {:?}", other),
        }
    }

    #[test]
    fn deserialize_article() {
        let json = r#"{
            "id": "b-1",
            "type": "blog",
            "title": "Rollups explained",
            "description": "A primer",
            "publishedAt": "2024-05-02T08:00:00Z",
            "websiteUrl": "https://blog.example/rollups",
            "media": {"type": "image", "url": "https://img/r.png"}
        }"#;

        let item: FeedItem = serde_json::from_str(json).unwrap();

        match item {
            FeedItem::Article(article) => {
                assert_eq!(article.title, "Rollups explained");
                assert_eq!(article.website_url, "https://blog.example/rollups");
                assert_eq!(article.media.unwrap().url, "https://img/r.png");
            }
            other => panic!("expected article, got {:?}", other),
        }
    }

    #[test]
    fn deserialize_unknown_kind() {
        let json = r#"{"id": "p-1", "type": "podcast", "title": "Weekly"}"#;

        let item: FeedItem = serde_json::from_str(json).unwrap();

        assert_eq!(item, FeedItem::Unknown);
        assert_eq!(item.id(), None);
    }

    #[test]
    fn deserialize_page() {
        let json = r#"{"cards": [], "page": 2, "pageSize": 20, "totalItems": 45, "totalPages": 3}"#;

        let page: FeedPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_more());
        assert!(page.validate().is_ok());
    }

    #[test]
    fn last_page_has_no_more() {
        let page = FeedPage {
            items: vec![],
            page: 3,
            page_size: 20,
            total_items: 45,
            total_pages: 3,
        };

        assert!(!page.has_more());
    }

    #[test]
    fn validate_rejects_page_past_total() {
        let page = FeedPage {
            items: vec![],
            page: 4,
            page_size: 20,
            total_items: 45,
            total_pages: 3,
        };

        assert!(page.validate().is_err());
    }

    #[test]
    fn validate_accepts_empty_feed() {
        let page = FeedPage {
            items: vec![],
            page: 1,
            page_size: 20,
            total_items: 0,
            total_pages: 0,
        };

        assert!(page.validate().is_ok());
        assert!(!page.has_more());
    }
}
