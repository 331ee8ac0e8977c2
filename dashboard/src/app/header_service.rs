//! Header service
//!
//! Time-of-day greeting and the user's display name.

use std::sync::Arc;

use chrono::{Local, Timelike};

use crate::domain::ports::KeyValueStore;
use crate::error::StoreError;

pub const USER_NAME_KEY: &str = "userName";
pub const DEFAULT_NAME: &str = "anon";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Greeting {
    /// 05-11 morning, 12-16 afternoon, 17-21 evening, otherwise night
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Greeting::Morning,
            12..=16 => Greeting::Afternoon,
            17..=21 => Greeting::Evening,
            _ => Greeting::Night,
        }
    }
}

impl std::fmt::Display for Greeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Greeting::Morning => write!(f, "Good Morning"),
            Greeting::Afternoon => write!(f, "Good Afternoon"),
            Greeting::Evening => write!(f, "Good Evening"),
            Greeting::Night => write!(f, "Good Night"),
        }
    }
}

pub struct HeaderService<K>
where
    K: KeyValueStore,
{
    store: Arc<K>,
}

impl<K> HeaderService<K>
where
    K: KeyValueStore,
{
    pub fn new(store: Arc<K>) -> Self {
        Self { store }
    }

    pub fn greeting(&self) -> Greeting {
        Greeting::for_hour(Local::now().hour())
    }

    pub fn name(&self) -> String {
        self.store
            .get(USER_NAME_KEY)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string())
    }

    /// Save a new name. Blank input is ignored and returns `None`.
    pub fn set_name(&self, raw: &str) -> Result<Option<String>, StoreError> {
        let name = raw.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.store.set(USER_NAME_KEY, name)?;
        Ok(Some(name.to_string()))
    }
}
