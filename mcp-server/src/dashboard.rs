//! Dashboard wiring
//!
//! Builds the widget services on top of the HTTP, file and manual-visibility
//! adapters and implements each tool's behavior as plain text.

use std::sync::Arc;

use anyhow::Result;
use tokentab_dashboard::adapters::{
    HttpFeedClient, HttpMarketClient, JsonFileStore, ManualVisibilityNotifier,
    NoopAnalyticsClient, PostHogClient,
};
use tokentab_dashboard::app::{
    AnalyticsService, ColumnBreakpoints, FeedSession, HeaderService, MarketService,
    WidgetService,
};
use tokentab_dashboard::domain::entities::{PerformanceWindow, WidgetKind};
use tokentab_dashboard::domain::ports::{AnalyticsClient, AnalyticsEvent};
use tokentab_dashboard::feed::{
    render_bubbles, render_cowswap, render_header, render_market, render_nft, render_portfolio,
    render_token_search, render_updates, render_widgets,
};
use tokentab_dashboard::{Config, DashboardError};

pub struct Dashboard {
    columns: usize,
    session: FeedSession<HttpFeedClient, ManualVisibilityNotifier>,
    market: MarketService<HttpMarketClient, JsonFileStore>,
    header: HeaderService<JsonFileStore>,
    widgets: WidgetService<JsonFileStore>,
    analytics: AnalyticsService<dyn AnalyticsClient, JsonFileStore>,
}

impl Dashboard {
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(JsonFileStore::open(&config.store_path)?);
        let notifier = Arc::new(ManualVisibilityNotifier::new());

        let analytics_client: Arc<dyn AnalyticsClient> = match &config.posthog_api_key {
            Some(key) => Arc::new(PostHogClient::new(
                config.posthog_host.clone(),
                key.clone(),
            )),
            None => Arc::new(NoopAnalyticsClient),
        };

        Ok(Self {
            columns: ColumnBreakpoints::standard().columns_for(config.viewport_width),
            session: FeedSession::new(
                Arc::new(HttpFeedClient::new(config.feed_url.clone())),
                notifier,
            ),
            market: MarketService::new(
                Arc::new(HttpMarketClient::new(
                    config.prices_url.clone(),
                    config.bubbles_url.clone(),
                )),
                Arc::clone(&store),
            ),
            header: HeaderService::new(Arc::clone(&store)),
            widgets: WidgetService::new(Arc::clone(&store)),
            analytics: AnalyticsService::new(analytics_client, store),
        })
    }

    pub async fn session_started(&self) {
        self.analytics
            .track(AnalyticsEvent::SessionStarted {
                version: env!("CARGO_PKG_VERSION").to_string(),
            })
            .await;
    }

    /// First call loads page 1; later calls act as the sentinel crossing the
    /// last rendered item. Fetch errors are part of the rendered feed.
    pub async fn updates(&self) -> String {
        let outcomes = self.session.advance().await;
        self.analytics.track_feed_errors(&outcomes).await;

        self.session
            .loader()
            .read(|state| render_updates(state, self.columns))
    }

    pub async fn bubbles(&self, window: Option<&str>) -> Result<String, DashboardError> {
        let window = match window {
            Some(raw) => raw
                .parse::<PerformanceWindow>()
                .map_err(|_| DashboardError::UnknownWindow(raw.to_string()))?,
            None => PerformanceWindow::default(),
        };

        self.analytics
            .track_widget("bubbles", &format!("view_{}", window))
            .await;
        let board = self.market.movers(window).await?;
        Ok(render_bubbles(window, &board))
    }

    pub async fn market(&self) -> Result<String, DashboardError> {
        let quotes = self.market.quotes().await?;
        Ok(render_market(&quotes))
    }

    pub async fn pin_token(&self, slot: usize, token_id: &str) -> Result<String, DashboardError> {
        self.market.pin(slot, token_id)?;
        self.analytics.track_widget("market", "pin").await;
        self.market().await
    }

    pub async fn unpin_token(&self, slot: usize) -> Result<String, DashboardError> {
        self.market.unpin(slot)?;
        self.analytics.track_widget("market", "unpin").await;
        self.market().await
    }

    pub async fn search_tokens(&self, query: &str) -> Result<String, DashboardError> {
        let tokens = self.market.search(query).await?;
        Ok(render_token_search(query, &tokens))
    }

    pub fn greeting(&self) -> String {
        render_header(self.header.greeting(), &self.header.name())
    }

    pub async fn set_name(&self, name: &str) -> Result<String, DashboardError> {
        match self.header.set_name(name)? {
            Some(saved) => {
                self.analytics.track_widget("header", "rename").await;
                Ok(format!("Name set to {}", saved))
            }
            None => Ok(format!("Name unchanged ({})", self.header.name())),
        }
    }

    /// Widget checklist followed by the enabled widget cards
    pub async fn widgets(&self) -> String {
        let selected = self.widgets.selected();
        let mut buf = render_widgets(&selected);

        for kind in selected {
            buf.push('\n');
            match kind {
                WidgetKind::Portfolio => buf.push_str(&render_portfolio(&self.widgets.portfolio())),
                WidgetKind::CowSwap => buf.push_str(&render_cowswap()),
                WidgetKind::CryptoBubbles => {
                    let window = PerformanceWindow::Day;
                    match self.market.movers(window).await {
                        Ok(board) => buf.push_str(&render_bubbles(window, &board)),
                        Err(e) => buf.push_str(&format!("## Crypto Bubbles\n\n[ERROR] {}\n", e)),
                    }
                }
                WidgetKind::Nft => buf.push_str(&render_nft(&self.widgets.nft_of_the_day())),
            }
        }

        buf
    }

    pub async fn toggle_widget(&self, widget: &str) -> Result<String, DashboardError> {
        let kind = widget
            .parse::<WidgetKind>()
            .map_err(|_| DashboardError::UnknownWidget(widget.to_string()))?;

        let enabled = self.widgets.toggle(kind)?;
        let action = if enabled { "add" } else { "remove" };
        self.analytics.track_widget(kind.id(), action).await;

        Ok(render_widgets(&self.widgets.selected()))
    }
}
