//! TokenTab dashboard core
//!
//! Feed loading, market ranking and widget state for the TokenTab new-tab
//! dashboard. Uses hexagonal (ports & adapters) architecture: the application
//! services only see the traits in `domain::ports`, and `adapters` provides the
//! HTTP, file and in-process implementations.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{AnalyticsError, DashboardError, FetchError, StoreError};
