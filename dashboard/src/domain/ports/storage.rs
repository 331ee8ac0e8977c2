//! Key-value persistence port
//!
//! Widget settings (pinned tokens, user name, analytics id) are stored as
//! string values under fixed keys. Services never touch the backing storage
//! directly.

use crate::error::StoreError;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
