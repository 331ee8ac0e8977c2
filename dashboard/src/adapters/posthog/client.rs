//! PostHog capture client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::domain::ports::{AnalyticsClient, AnalyticsEvent};
use crate::error::AnalyticsError;

/// Sends events to `<host>/capture/`
pub struct PostHogClient {
    http: Client,
    host: String,
    api_key: String,
}

impl PostHogClient {
    pub fn new(host: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            host: host.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[derive(Serialize)]
struct CaptureRequest<'a> {
    api_key: &'a str,
    event: &'a str,
    properties: Value,
}

#[async_trait]
impl AnalyticsClient for PostHogClient {
    async fn track(
        &self,
        distinct_id: &str,
        event: &AnalyticsEvent,
    ) -> Result<(), AnalyticsError> {
        let mut properties = event.properties();
        if let Value::Object(map) = &mut properties {
            map.insert("distinct_id".to_string(), Value::from(distinct_id));
        }

        let body = CaptureRequest {
            api_key: &self.api_key,
            event: event.name(),
            properties,
        };

        let resp = self
            .http
            .post(format!("{}/capture/", self.host))
            .json(&body)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            Err(AnalyticsError::Rejected { status, message })
        }
    }
}

/// No-op analytics client, used when no PostHog key is configured
pub struct NoopAnalyticsClient;

#[async_trait]
impl AnalyticsClient for NoopAnalyticsClient {
    async fn track(
        &self,
        distinct_id: &str,
        event: &AnalyticsEvent,
    ) -> Result<(), AnalyticsError> {
        tracing::trace!(distinct_id, event = event.name(), "Analytics disabled, dropping event");
        Ok(())
    }
}
