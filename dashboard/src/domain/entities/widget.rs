//! Sidebar widget entities
//!
//! The sidebar shows a user-chosen subset of a fixed widget catalog. The
//! portfolio and NFT cards carry their own display data.

use serde::{Deserialize, Serialize};

/// Sidebar widget catalog, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "portfolio")]
    Portfolio,
    #[serde(rename = "cowswap")]
    CowSwap,
    #[serde(rename = "crypto-bubbles")]
    CryptoBubbles,
    #[serde(rename = "nft")]
    Nft,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 4] = [
        WidgetKind::Portfolio,
        WidgetKind::CowSwap,
        WidgetKind::CryptoBubbles,
        WidgetKind::Nft,
    ];

    /// Stable id, as persisted
    pub fn id(&self) -> &'static str {
        match self {
            WidgetKind::Portfolio => "portfolio",
            WidgetKind::CowSwap => "cowswap",
            WidgetKind::CryptoBubbles => "crypto-bubbles",
            WidgetKind::Nft => "nft",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Portfolio => "Portfolio",
            WidgetKind::CowSwap => "CowSwap",
            WidgetKind::CryptoBubbles => "Crypto Bubbles",
            WidgetKind::Nft => "NFT Gallery",
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for WidgetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        WidgetKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| format!("Unknown widget: {}", s))
    }
}

/// The featured NFT card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftOfTheDay {
    pub title: String,
    pub creator: String,
    pub image: String,
    /// Current bid with its unit, e.g. `2.10 ETH`
    pub price: String,
    /// Time left in the auction, as displayed
    pub ends_in: String,
    pub verified: bool,
}

impl NftOfTheDay {
    pub fn featured() -> Self {
        Self {
            title: "Zo World Founder".to_string(),
            creator: "Zo World".to_string(),
            image: "/nft-image.jpg".to_string(),
            price: "2.10 ETH".to_string(),
            ends_in: "10H 24M 05S".to_string(),
            verified: true,
        }
    }
}

/// Portfolio card: total value in USD and when it was valued
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub total_usd: f64,
    pub as_of: String,
}

impl PortfolioSnapshot {
    pub fn featured() -> Self {
        Self {
            total_usd: 4356.07,
            as_of: "7 Nov 2022 At 11:00 Pm".to_string(),
        }
    }
}
