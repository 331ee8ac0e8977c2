//! Domain layer
//!
//! Contains pure dashboard models with no I/O.
//! - `entities`: feed items, pages and market records
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
