//! Market ranker
//!
//! Ranks market entries by the magnitude of their move over a window and maps
//! the top movers to bubble size and tone.

use serde::Serialize;

use crate::domain::entities::{MarketEntry, PerformanceWindow};

pub const DEFAULT_LIMIT: usize = 12;
pub const MIN_BUBBLE_SIZE: f64 = 50.0;
pub const MAX_BUBBLE_SIZE: f64 = 85.0;

/// Color family of a bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleTone {
    Gain,
    Loss,
    Neutral,
}

impl std::fmt::Display for BubbleTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BubbleTone::Gain => write!(f, "gain"),
            BubbleTone::Loss => write!(f, "loss"),
            BubbleTone::Neutral => write!(f, "neutral"),
        }
    }
}

/// A ranked entry with its visual encoding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub performance: f64,
    pub size: f64,
    pub tone: BubbleTone,
}

impl Bubble {
    /// `$0.0042` below one cent, `$1.23` otherwise
    pub fn price_label(&self) -> String {
        if self.price < 0.01 {
            format!("${:.4}", self.price)
        } else {
            format!("${:.2}", self.price)
        }
    }

    pub fn performance_label(&self) -> String {
        let sign = if self.performance > 0.0 { "+" } else { "" };
        format!("{}{:.1}%", sign, self.performance)
    }
}

/// Filter, sort by |performance| descending (stable), take `limit`
pub fn rank(
    entries: &[MarketEntry],
    window: PerformanceWindow,
    limit: usize,
) -> Vec<(&MarketEntry, f64)> {
    let mut ranked: Vec<(&MarketEntry, f64)> = entries
        .iter()
        .filter(|entry| entry.is_rankable(window))
        .filter_map(|entry| entry.performance(window).map(|perf| (entry, perf)))
        .collect();

    ranked.sort_by(|(_, a), (_, b)| b.abs().total_cmp(&a.abs()));
    ranked.truncate(limit);
    ranked
}

/// Logarithmic size: 1% or less is the minimum, 100% or more the maximum
pub fn bubble_size(performance: f64) -> f64 {
    if !performance.is_finite() {
        return MIN_BUBBLE_SIZE;
    }

    let normalized = performance.abs().max(1.0).ln() / 100f64.ln();
    let size = MIN_BUBBLE_SIZE + normalized * (MAX_BUBBLE_SIZE - MIN_BUBBLE_SIZE);
    size.clamp(MIN_BUBBLE_SIZE, MAX_BUBBLE_SIZE)
}

pub fn bubble_tone(performance: f64) -> BubbleTone {
    if !performance.is_finite() || performance == 0.0 {
        BubbleTone::Neutral
    } else if performance > 0.0 {
        BubbleTone::Gain
    } else {
        BubbleTone::Loss
    }
}

/// Rank and encode in one pass
pub fn bubbles(entries: &[MarketEntry], window: PerformanceWindow, limit: usize) -> Vec<Bubble> {
    rank(entries, window, limit)
        .into_iter()
        .map(|(entry, performance)| Bubble {
            id: entry.id.clone(),
            symbol: entry.symbol.clone(),
            name: entry.name.clone(),
            price: entry.price.unwrap_or_default(),
            performance,
            size: bubble_size(performance),
            tone: bubble_tone(performance),
        })
        .collect()
}
