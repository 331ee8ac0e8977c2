//! Analytics service
//!
//! Attaches a stable anonymous id to every event. Capture failures are logged
//! and swallowed so analytics never affect the dashboard.

use std::sync::Arc;

use uuid::Uuid;

use crate::app::feed_loader::LoadOutcome;
use crate::domain::ports::{AnalyticsClient, AnalyticsEvent, KeyValueStore};
use crate::error::FetchError;

/// Store key for the anonymous distinct id
pub const USER_ID_KEY: &str = "posthog_user_id";

pub struct AnalyticsService<A, K>
where
    A: AnalyticsClient + ?Sized,
    K: KeyValueStore,
{
    client: Arc<A>,
    store: Arc<K>,
}

impl<A, K> AnalyticsService<A, K>
where
    A: AnalyticsClient + ?Sized,
    K: KeyValueStore,
{
    pub fn new(client: Arc<A>, store: Arc<K>) -> Self {
        Self { client, store }
    }

    /// Stored id, or a fresh v4 UUID that is saved for next time
    pub fn distinct_id(&self) -> String {
        if let Some(id) = self.store.get(USER_ID_KEY) {
            return id;
        }

        let id = Uuid::new_v4().to_string();
        if let Err(e) = self.store.set(USER_ID_KEY, &id) {
            tracing::warn!(error = %e, "Failed to persist analytics id");
        }
        id
    }

    pub async fn track(&self, event: AnalyticsEvent) {
        let distinct_id = self.distinct_id();
        if let Err(e) = self.client.track(&distinct_id, &event).await {
            tracing::warn!(error = %e, event = event.name(), "Failed to track analytics event");
        }
    }

    /// Report a failed fetch as an `error` event
    pub async fn track_fetch_error(&self, error: &FetchError) {
        self.track(AnalyticsEvent::Error {
            error_name: "FetchError".to_string(),
            error_message: error.to_string(),
        })
        .await;
    }

    /// Report every failed outcome of a feed step
    pub async fn track_feed_errors(&self, outcomes: &[Result<LoadOutcome, FetchError>]) {
        for error in outcomes.iter().filter_map(|outcome| outcome.as_ref().err()) {
            self.track_fetch_error(error).await;
        }
    }

    pub async fn track_widget(&self, widget_id: &str, action: &str) {
        self.track(AnalyticsEvent::WidgetInteraction {
            widget_id: widget_id.to_string(),
            action: action.to_string(),
        })
        .await;
    }
}
