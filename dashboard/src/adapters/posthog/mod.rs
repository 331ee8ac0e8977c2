//! PostHog analytics adapter
//!
//! Capture client for PostHog and a no-op client for when no key is set.

pub mod client;

pub use client::{NoopAnalyticsClient, PostHogClient};
