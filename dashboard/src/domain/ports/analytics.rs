//! Analytics client port trait
//!
//! Defines the interface for product analytics capture.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::AnalyticsError;

/// Event types for analytics tracking
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    SessionStarted {
        version: String,
    },
    WidgetInteraction {
        widget_id: String,
        action: String,
    },
    Error {
        error_name: String,
        error_message: String,
    },
}

impl AnalyticsEvent {
    /// Event name as sent to the capture endpoint
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::SessionStarted { .. } => "session_started",
            AnalyticsEvent::WidgetInteraction { .. } => "widget_interaction",
            AnalyticsEvent::Error { .. } => "error",
        }
    }

    pub fn properties(&self) -> Value {
        match self {
            AnalyticsEvent::SessionStarted { version } => json!({ "version": version }),
            AnalyticsEvent::WidgetInteraction { widget_id, action } => {
                json!({ "widget_id": widget_id, "action": action })
            }
            AnalyticsEvent::Error {
                error_name,
                error_message,
            } => json!({ "error_name": error_name, "error_message": error_message }),
        }
    }
}

/// Port trait for analytics operations
#[async_trait]
pub trait AnalyticsClient: Send + Sync {
    /// Track an analytics event for a distinct user
    async fn track(&self, distinct_id: &str, event: &AnalyticsEvent)
        -> Result<(), AnalyticsError>;
}
