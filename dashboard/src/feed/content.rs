//! Content renderer
//!
//! Maps feed items to presentations: post cards with a representative image
//! and abbreviated counters, article cards with an external link.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;
use serde::Serialize;

use crate::domain::entities::{Article, FeedItem, Post};

static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("valid img tag regex"));

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid img src regex")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Presentation {
    Post(PostCard),
    Article(ArticleCard),
    /// Unknown item kinds render nothing
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCard {
    pub id: String,
    pub display_name: String,
    pub username: String,
    pub avatar: Option<String>,
    /// Body markup with `<img>` tags removed
    pub body: String,
    pub image: Option<String>,
    pub date: String,
    pub counters: EngagementCounters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementCounters {
    pub views: String,
    pub likes: String,
    pub replies: String,
    pub reshares: String,
    pub bookmarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub date: String,
    pub link: String,
}

pub fn render(item: &FeedItem) -> Presentation {
    match item {
        FeedItem::Post(post) => Presentation::Post(render_post(post)),
        FeedItem::Article(article) => Presentation::Article(render_article(article)),
        FeedItem::Unknown => Presentation::Nothing,
    }
}

fn render_post(post: &Post) -> PostCard {
    let image = post
        .media
        .as_ref()
        .map(|m| m.url.clone())
        .filter(|url| !url.is_empty())
        .or_else(|| first_image(&post.html));

    PostCard {
        id: post.id.clone(),
        display_name: post.user.display_name.clone(),
        username: post.user.username.clone(),
        avatar: post.user.profile_photo.clone(),
        body: strip_images(&post.html),
        image,
        date: format_date(&post.timestamp),
        counters: EngagementCounters {
            views: format_count(post.engagement.views),
            likes: format_count(post.engagement.likes),
            replies: format_count(post.engagement.replies),
            reshares: format_count(post.engagement.reshares),
            bookmarks: format_count(post.engagement.bookmarks),
        },
    }
}

fn render_article(article: &Article) -> ArticleCard {
    ArticleCard {
        id: article.id.clone(),
        title: article.title.clone(),
        description: article.description.clone(),
        image: article.media.as_ref().map(|m| m.url.clone()),
        date: format_date(&article.published_at),
        link: article.website_url.clone(),
    }
}

/// Remove every `<img ...>` tag from markup
pub fn strip_images(html: &str) -> String {
    IMG_TAG.replace_all(html, "").into_owned()
}

/// `src` of the first image in markup
pub fn first_image(html: &str) -> Option<String> {
    IMG_SRC
        .captures(html)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|src| src.as_str().replace("&amp;", "&"))
        .filter(|src| !src.is_empty())
}

/// Abbreviate a counter: `999`, `1K`, `1.5K`, `2.3M`
pub fn format_count(value: u64) -> String {
    if value < 1_000 {
        return value.to_string();
    }

    if value < 1_000_000 {
        let thousands = value as f64 / 1_000.0;
        // 999_950 and up would print as "1000K"
        if (thousands * 10.0).round() < 10_000.0 {
            return abbreviate(thousands, 'K');
        }
    }

    abbreviate(value as f64 / 1_000_000.0, 'M')
}

fn abbreviate(scaled: f64, suffix: char) -> String {
    let text = format!("{:.1}", scaled);
    let trimmed = text.strip_suffix(".0").unwrap_or(&text);
    format!("{}{}", trimmed, suffix)
}

/// `YYYY-MM-DD` for RFC 3339 timestamps, otherwise the input unchanged
fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Media;
    use crate::test_utils::{test_article, test_post};

    #[test]
    fn format_count_thresholds() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1K");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(12_340), "12.3K");
        assert_eq!(format_count(999_999), "1M");
        assert_eq!(format_count(1_000_000), "1M");
        assert_eq!(format_count(2_360_000), "2.4M");
    }

    #[test]
    fn embedded_image_becomes_representative() {
        let mut post = test_post("t1");
        post_mut(&mut post).html =
            r#"<p>gm</p><img src="https://img.example/a.png" alt="a"><p>wagmi</p>"#.to_string();
        post_mut(&mut post).media = None;

        let card = match render(&post) {
            Presentation::Post(card) => card,
            other => panic!("expected post card, got {:?}", other),
        };

        assert_eq!(card.image.as_deref(), Some("https://img.example/a.png"));
        assert!(!card.body.contains("<img"));
        assert_eq!(card.body, "<p>gm</p><p>wagmi</p>");
    }

    #[test]
    fn explicit_media_wins_over_embedded_image() {
        let mut post = test_post("t2");
        post_mut(&mut post).html = r#"<IMG SRC='https://img.example/b.png'>"#.to_string();
        post_mut(&mut post).media = Some(Media {
            kind: "photo".to_string(),
            url: "https://media.example/m.jpg".to_string(),
            thumbnail: None,
        });

        let card = match render(&post) {
            Presentation::Post(card) => card,
            other => panic!("expected post card, got {:?}", other),
        };

        assert_eq!(card.image.as_deref(), Some("https://media.example/m.jpg"));
        assert_eq!(card.body, "");
    }

    #[test]
    fn post_without_images_has_none() {
        let post = test_post("t3");

        match render(&post) {
            Presentation::Post(card) => {
                assert!(card.image.is_none());
                assert_eq!(card.counters.views, "1.2K");
                assert_eq!(card.date, "2024-05-01");
            }
            other => panic!("expected post card, got {:?}", other),
        }
    }

    #[test]
    fn first_image_decodes_ampersands() {
        let html = r#"<img alt="x" src="https://img.example/a.png?w=1&amp;h=2">"#;

        assert_eq!(
            first_image(html).as_deref(),
            Some("https://img.example/a.png?w=1&h=2")
        );
    }

    #[test]
    fn first_image_keeps_apostrophes_inside_double_quotes() {
        let html = r#"<p>x</p><img src="https://img.example/it's.png">"#;

        assert_eq!(
            first_image(html).as_deref(),
            Some("https://img.example/it's.png")
        );
    }

    #[test]
    fn first_image_keeps_double_quotes_inside_single_quotes() {
        let html = r#"<img src='https://img.example/"q".png'>"#;

        assert_eq!(
            first_image(html).as_deref(),
            Some(r#"https://img.example/"q".png"#)
        );
    }

    #[test]
    fn article_card() {
        let article = test_article("b1");

        match render(&article) {
            Presentation::Article(card) => {
                assert_eq!(card.id, "b1");
                assert_eq!(card.link, "https://blog.example/b1");
                assert_eq!(card.date, "2024-05-02");
            }
            other => panic!("expected article card, got {:?}", other),
        }
    }

    #[test]
    fn unknown_renders_nothing() {
        assert_eq!(render(&FeedItem::Unknown), Presentation::Nothing);
    }

    #[test]
    fn unparseable_date_kept_verbatim() {
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    fn post_mut(item: &mut FeedItem) -> &mut Post {
        match item {
            FeedItem::Post(post) => post,
            _ => panic!("fixture is not a post"),
        }
    }
}
