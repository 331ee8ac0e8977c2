//! Storage adapter
//!
//! Key-value stores backing widget settings.

pub mod file_store;
pub mod memory_store;

pub use file_store::JsonFileStore;
pub use memory_store::InMemoryStore;
