//! Dashboard renderer
//!
//! Renders widgets to LLM-readable markdown.

use std::sync::LazyLock;

use regex::Regex;

use crate::app::feed_loader::FeedState;
use crate::app::header_service::Greeting;
use crate::app::layout::{distribute, is_featured};
use crate::app::market_ranker::Bubble;
use crate::domain::entities::{
    NftOfTheDay, PerformanceWindow, PortfolioSnapshot, Token, TokenQuote, Trend, WidgetKind,
};
use crate::feed::content::{render, ArticleCard, PostCard, Presentation};

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Render the accumulated feed laid out in `columns` columns
pub fn render_updates(state: &FeedState, columns: usize) -> String {
    let mut buf = String::new();

    buf.push_str("# Updates\n\n");

    // Initial load failed: error in place of content
    if state.items().is_empty() {
        if let Some(error) = state.error() {
            buf.push_str(&format!("[ERROR] {}\n", error));
            return buf;
        }
        if state.is_loading() || state.current_page() == 0 {
            buf.push_str("_Loading updates..._\n");
        } else {
            buf.push_str("_No updates yet._\n");
        }
        return buf;
    }

    for (column, entries) in distribute(state.items(), columns).iter().enumerate() {
        if columns > 1 {
            buf.push_str(&format!("## Column {}\n\n", column + 1));
        }
        for (index, item) in entries {
            let card = match render(item) {
                Presentation::Post(card) => render_post_card(*index, &card),
                Presentation::Article(card) => render_article_card(*index, &card),
                Presentation::Nothing => continue,
            };
            buf.push_str(&card);
            buf.push('\n');
        }
    }

    buf.push_str("---\n\n");
    if let Some(error) = state.error() {
        buf.push_str(&format!("[ERROR] Could not load more updates: {}\n", error));
    }
    if state.is_loading() {
        buf.push_str("Loading more updates...\n");
    } else if !state.has_more() {
        buf.push_str("No more updates to load\n");
    } else {
        buf.push_str(&format!(
            "Page {} of {}. Scroll for more.\n",
            state.current_page(),
            state.total_pages()
        ));
    }

    buf
}

fn featured_marker(index: usize) -> &'static str {
    if is_featured(index) {
        " [FEATURED]"
    } else {
        ""
    }
}

fn render_post_card(index: usize, card: &PostCard) -> String {
    let mut out = format!(
        "[{}]{} {} (@{}) - {}\n",
        index + 1,
        featured_marker(index),
        card.display_name,
        card.username,
        card.date
    );

    let text = markup_to_text(&card.body);
    if !text.is_empty() {
        out.push_str(&format!("    {}\n", truncate(&text, 280)));
    }
    if let Some(image) = &card.image {
        out.push_str(&format!("    Image: {}\n", image));
    }

    let c = &card.counters;
    out.push_str(&format!(
        "    Views {} | Likes {} | Replies {} | Reshares {} | Bookmarks {}\n",
        c.views, c.likes, c.replies, c.reshares, c.bookmarks
    ));
    out
}

fn render_article_card(index: usize, card: &ArticleCard) -> String {
    let mut out = format!(
        "[{}]{} {} - {}\n",
        index + 1,
        featured_marker(index),
        card.title,
        card.date
    );

    if !card.description.is_empty() {
        out.push_str(&format!("    {}\n", truncate(&card.description, 200)));
    }
    if let Some(image) = &card.image {
        out.push_str(&format!("    Image: {}\n", image));
    }
    out.push_str(&format!("    Read more: {}\n", card.link));
    out
}

/// Render the bubbles board
pub fn render_bubbles(window: PerformanceWindow, bubbles: &[Bubble]) -> String {
    let mut buf = String::new();

    buf.push_str(&format!("# Bubbles ({})\n\n", window));

    if bubbles.is_empty() {
        buf.push_str("_No market data for this window._\n");
        return buf;
    }

    buf.push_str("| # | Symbol | Price | Change | Size | Tone |\n");
    buf.push_str("|---|--------|-------|--------|------|------|\n");
    for (i, bubble) in bubbles.iter().enumerate() {
        buf.push_str(&format!(
            "| {} | {} | {} | {} | {:.0} | {} |\n",
            i + 1,
            bubble.symbol,
            bubble.price_label(),
            bubble.performance_label(),
            bubble.size,
            bubble.tone
        ));
    }

    buf
}

/// Render the pinned token slots
pub fn render_market(quotes: &[Option<TokenQuote>]) -> String {
    let mut buf = String::new();

    buf.push_str("# Market\n\n");
    for (slot, quote) in quotes.iter().enumerate() {
        match quote {
            Some(q) => {
                let sign = if q.change_1d > 0.0 { "+" } else { "" };
                let arrow = match q.trend {
                    Trend::Up => "UP",
                    Trend::Down => "DOWN",
                };
                buf.push_str(&format!(
                    "[{}] {} {:.4} ({}{:.2}%) {}\n",
                    slot, q.symbol, q.price, sign, q.change_1d, arrow
                ));
            }
            None => buf.push_str(&format!("[{}] + Add Currency\n", slot)),
        }
    }

    buf
}

/// Render token search results
pub fn render_token_search(query: &str, tokens: &[Token]) -> String {
    let mut buf = String::new();

    buf.push_str(&format!("# Tokens matching \"{}\"\n\n", query));
    if tokens.is_empty() {
        buf.push_str("_No tokens found._\n");
        return buf;
    }

    for token in tokens {
        buf.push_str(&format!(
            "- {} ({}) id: {}\n",
            token.attributes.name, token.attributes.symbol, token.id
        ));
    }

    buf
}

pub fn render_header(greeting: Greeting, name: &str) -> String {
    format!("{}, {}\n", greeting, name)
}

/// Render the widget checklist
pub fn render_widgets(selected: &[WidgetKind]) -> String {
    let mut buf = String::new();

    buf.push_str("# Widgets\n\n");
    for kind in WidgetKind::ALL {
        let mark = if selected.contains(&kind) { "x" } else { " " };
        buf.push_str(&format!("- [{}] {} ({})\n", mark, kind.name(), kind.id()));
    }

    buf
}

pub fn render_portfolio(snapshot: &PortfolioSnapshot) -> String {
    format!(
        "## Portfolio\n\nTotal balance: {}\nAs of {}\n",
        format_usd(snapshot.total_usd),
        snapshot.as_of
    )
}

/// Render the NFT of the day card
pub fn render_nft(nft: &NftOfTheDay) -> String {
    let mut buf = String::new();

    buf.push_str("## NFT of the day\n\n");
    let verified = if nft.verified { " [VERIFIED]" } else { "" };
    buf.push_str(&format!("{} by {}{}\n", nft.title, nft.creator, verified));
    buf.push_str(&format!("Image: {}\n", nft.image));
    buf.push_str(&format!("Price: {}\n", nft.price));
    buf.push_str(&format!("Ends in {}\n", nft.ends_in));

    buf
}

/// CowSwap card, preset to sell USDC for COW on mainnet
pub fn render_cowswap() -> String {
    "## CowSwap\n\nSell USDC, buy COW (chain 1)\nTrade at https://swap.cow.fi\n".to_string()
}

/// Dollar amount with thousands separators and two decimals
fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Drop tags and decode the common entities
fn markup_to_text(markup: &str) -> String {
    let text = TAG.replace_all(markup, " ");
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string with ellipsis
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
