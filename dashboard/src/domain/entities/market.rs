//! Market data domain entities
//!
//! `MarketEntry` is one record of the bubbles dataset; `Token` is one record of
//! the prices endpoint. Both are transient and rebuilt on every refresh.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named time horizon over which a percentage price change is measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceWindow {
    Min1,
    Min5,
    Min15,
    Hour,
    Hour4,
    #[default]
    Day,
    Week,
    Month,
    Month3,
    Year,
}

impl PerformanceWindow {
    /// Windows offered by the bubbles widget
    pub const SELECTABLE: [PerformanceWindow; 5] = [
        PerformanceWindow::Hour,
        PerformanceWindow::Day,
        PerformanceWindow::Week,
        PerformanceWindow::Month,
        PerformanceWindow::Year,
    ];

    /// Key used in the dataset's `performance` object
    pub fn key(&self) -> &'static str {
        match self {
            PerformanceWindow::Min1 => "min1",
            PerformanceWindow::Min5 => "min5",
            PerformanceWindow::Min15 => "min15",
            PerformanceWindow::Hour => "hour",
            PerformanceWindow::Hour4 => "hour4",
            PerformanceWindow::Day => "day",
            PerformanceWindow::Week => "week",
            PerformanceWindow::Month => "month",
            PerformanceWindow::Month3 => "month3",
            PerformanceWindow::Year => "year",
        }
    }
}

impl std::fmt::Display for PerformanceWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for PerformanceWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "min1" => Ok(PerformanceWindow::Min1),
            "min5" => Ok(PerformanceWindow::Min5),
            "min15" => Ok(PerformanceWindow::Min15),
            "hour" | "1h" => Ok(PerformanceWindow::Hour),
            "hour4" | "4h" => Ok(PerformanceWindow::Hour4),
            "day" | "1d" => Ok(PerformanceWindow::Day),
            "week" | "1w" => Ok(PerformanceWindow::Week),
            "month" | "1mo" => Ok(PerformanceWindow::Month),
            "month3" | "3mo" => Ok(PerformanceWindow::Month3),
            "year" | "1y" => Ok(PerformanceWindow::Year),
            _ => Err(format!("Unknown performance window: {}", s)),
        }
    }
}

/// One record of the bubbles dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub price: Option<f64>,
    /// Percentage change keyed by window (`day`, `week`, ...); nulls are kept as `None`
    #[serde(default)]
    pub performance: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub marketcap: Option<f64>,
    #[serde(default)]
    pub dominance: Option<f64>,
}

impl MarketEntry {
    /// Finite percentage change for `window`, if any
    pub fn performance(&self, window: PerformanceWindow) -> Option<f64> {
        self.performance
            .get(window.key())
            .copied()
            .flatten()
            .filter(|value| value.is_finite())
    }

    /// Validity predicate applied before ranking
    pub fn is_rankable(&self, window: PerformanceWindow) -> bool {
        !self.symbol.is_empty()
            && self.price.is_some_and(f64::is_finite)
            && self.performance(window).is_some()
    }
}

/// One record of the prices endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub attributes: TokenAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAttributes {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub icon: Option<TokenIcon>,
    pub market_data: TokenMarketData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenIcon {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMarketData {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub changes: PriceChanges,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceChanges {
    #[serde(default)]
    pub percent_1d: Option<f64>,
}

impl Token {
    /// Case-insensitive match on name or symbol
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.attributes.name.to_lowercase().contains(&query)
            || self.attributes.symbol.to_lowercase().contains(&query)
    }
}

/// Price direction over the last day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// A pinned token resolved against the prices endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenQuote {
    pub token_id: String,
    pub symbol: String,
    pub price: f64,
    pub change_1d: f64,
    pub icon: Option<String>,
    pub trend: Trend,
}

impl TokenQuote {
    /// Build a quote, or `None` when the token has no usable price
    pub fn from_token(token: &Token) -> Option<Self> {
        let price = token
            .attributes
            .market_data
            .price
            .filter(|p| p.is_finite())?;
        let change_1d = token
            .attributes
            .market_data
            .changes
            .percent_1d
            .filter(|c| c.is_finite())
            .unwrap_or(0.0);

        Some(Self {
            token_id: token.id.clone(),
            symbol: token.attributes.symbol.clone(),
            price,
            change_1d,
            icon: token.attributes.icon.as_ref().map(|i| i.url.clone()),
            trend: if change_1d > 0.0 { Trend::Up } else { Trend::Down },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_round_trips_through_str() {
        for window in PerformanceWindow::SELECTABLE {
            let parsed: PerformanceWindow = window.key().parse().unwrap();
            assert_eq!(parsed, window);
        }
    }

    #[test]
    fn window_accepts_short_aliases() {
        assert_eq!("1d".parse::<PerformanceWindow>(), Ok(PerformanceWindow::Day));
        assert_eq!("1MO".parse::<PerformanceWindow>(), Ok(PerformanceWindow::Month));
        assert!("decade".parse::<PerformanceWindow>().is_err());
    }

    #[test]
    fn deserialize_entry_with_null_windows() {
        let json = r#"{
            "id": "bitcoin",
            "name": "Bitcoin",
            "symbol": "BTC",
            "price": 67000.5,
            "dominance": 0.52,
            "performance": {"hour": 0.4, "day": -1.2, "week": null},
            "marketcap": 1320000000000,
            "image": "data/logos/1.png"
        }"#;

        let entry: MarketEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.performance(PerformanceWindow::Day), Some(-1.2));
        assert_eq!(entry.performance(PerformanceWindow::Week), None);
        assert_eq!(entry.performance(PerformanceWindow::Year), None);
        assert!(entry.is_rankable(PerformanceWindow::Hour));
        assert!(!entry.is_rankable(PerformanceWindow::Week));
    }

    #[test]
    fn entry_without_symbol_or_price_is_not_rankable() {
        let mut entry = MarketEntry {
            id: "x".to_string(),
            name: "X".to_string(),
            symbol: String::new(),
            price: Some(1.0),
            performance: BTreeMap::from([("day".to_string(), Some(3.0))]),
            marketcap: None,
            dominance: None,
        };
        assert!(!entry.is_rankable(PerformanceWindow::Day));

        entry.symbol = "X".to_string();
        entry.price = Some(f64::NAN);
        assert!(!entry.is_rankable(PerformanceWindow::Day));

        entry.price = Some(2.0);
        assert!(entry.is_rankable(PerformanceWindow::Day));
    }

    #[test]
    fn non_finite_performance_is_absent() {
        let entry = MarketEntry {
            id: "x".to_string(),
            name: "X".to_string(),
            symbol: "X".to_string(),
            price: Some(1.0),
            performance: BTreeMap::from([
                ("day".to_string(), Some(f64::NAN)),
                ("week".to_string(), Some(f64::INFINITY)),
            ]),
            marketcap: None,
            dominance: None,
        };

        assert_eq!(entry.performance(PerformanceWindow::Day), None);
        assert_eq!(entry.performance(PerformanceWindow::Week), None);
    }

    #[test]
    fn deserialize_token_and_quote() {
        let json = r#"{
            "id": "eth",
            "attributes": {
                "name": "Ethereum",
                "symbol": "ETH",
                "icon": {"url": "https://cdn/eth.png"},
                "market_data": {"price": 3100.25, "changes": {"percent_1d": 2.5}}
            }
        }"#;

        let token: Token = serde_json::from_str(json).unwrap();
        let quote = TokenQuote::from_token(&token).unwrap();

        assert_eq!(quote.symbol, "ETH");
        assert_eq!(quote.price, 3100.25);
        assert_eq!(quote.trend, Trend::Up);
        assert_eq!(quote.icon.as_deref(), Some("https://cdn/eth.png"));
    }

    #[test]
    fn quote_requires_price() {
        let token = Token {
            id: "dead".to_string(),
            attributes: TokenAttributes {
                name: "Dead".to_string(),
                symbol: "DEAD".to_string(),
                icon: None,
                market_data: TokenMarketData {
                    price: None,
                    changes: PriceChanges::default(),
                },
            },
        };

        assert!(TokenQuote::from_token(&token).is_none());
    }

    #[test]
    fn token_matches_name_or_symbol() {
        let token: Token = serde_json::from_str(
            r#"{"id": "sol", "attributes": {"name": "Solana", "symbol": "SOL", "market_data": {"price": 150.0, "changes": {"percent_1d": -3.0}}}}"#,
        )
        .unwrap();

        assert!(token.matches("sol"));
        assert!(token.matches("LAN"));
        assert!(!token.matches("eth"));
    }
}
