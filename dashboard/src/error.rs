//! Unified error types for the TokenTab dashboard
//!
//! This module defines error types for each layer:
//! - `FetchError`: read-only JSON endpoint failures (transport, status, shape)
//! - `StoreError`: key-value persistence failures
//! - `AnalyticsError`: analytics capture failures
//! - `DashboardError`: service-level errors surfaced to the outer surface

use thiserror::Error;

/// Errors from the feed, prices and bubbles endpoints.
///
/// A body that does not match the expected shape is reported as `Parse`,
/// which callers handle exactly like any other fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Parse(String),

    #[error("Invalid page number: {0}")]
    InvalidPage(u32),
}

/// Key-value store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Analytics capture errors
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Capture rejected: {status} - {message}")]
    Rejected { status: u16, message: String },
}

/// Service-level errors
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Slot {slot} is out of range (0..{slots})")]
    InvalidSlot { slot: usize, slots: usize },

    #[error("Unknown performance window: {0}")]
    UnknownWindow(String),

    #[error("Unknown widget: {0}")]
    UnknownWidget(String),
}
