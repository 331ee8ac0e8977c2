use std::env;
use std::path::PathBuf;

pub const DEFAULT_FEED_URL: &str = "https://api.tokentab.io/getFeeds";
pub const DEFAULT_PRICES_URL: &str = "https://api.tokentab.io/getPrices";
pub const DEFAULT_BUBBLES_URL: &str = "https://cryptobubbles.net/backend/data/bubbles1000.usd.json";
pub const DEFAULT_POSTHOG_HOST: &str = "https://us.i.posthog.com";
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1920;

#[derive(Debug, Clone)]
pub struct Config {
    /// Paginated feed endpoint (`?page=N` is appended per request)
    pub feed_url: String,
    pub prices_url: String,
    pub bubbles_url: String,
    /// JSON file backing the key-value store (pinned tokens, user name, analytics id)
    pub store_path: PathBuf,
    /// Width used to pick the feed column count
    pub viewport_width: u32,
    /// PostHog project key; analytics are disabled when unset
    pub posthog_api_key: Option<String>,
    pub posthog_host: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            feed_url: env::var("TOKENTAB_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            prices_url: env::var("TOKENTAB_PRICES_URL")
                .unwrap_or_else(|_| DEFAULT_PRICES_URL.to_string()),
            bubbles_url: env::var("TOKENTAB_BUBBLES_URL")
                .unwrap_or_else(|_| DEFAULT_BUBBLES_URL.to_string()),
            store_path: env::var("TOKENTAB_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("tokentab-store.json")),
            viewport_width: env::var("TOKENTAB_VIEWPORT_WIDTH")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(DEFAULT_VIEWPORT_WIDTH),
            posthog_api_key: env::var("POSTHOG_API_KEY").ok().filter(|k| !k.is_empty()),
            posthog_host: env::var("POSTHOG_HOST")
                .unwrap_or_else(|_| DEFAULT_POSTHOG_HOST.to_string()),
        }
    }

    /// Check if analytics capture is configured
    pub fn analytics_enabled(&self) -> bool {
        self.posthog_api_key.is_some()
    }
}
