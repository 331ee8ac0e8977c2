//! Widget service
//!
//! Which sidebar widgets are shown. The selection is persisted as a JSON
//! array of widget ids; adding a widget appends it, removing drops it.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entities::{NftOfTheDay, PortfolioSnapshot, WidgetKind};
use crate::domain::ports::KeyValueStore;
use crate::error::StoreError;

/// Store key for the selected widget ids
pub const SELECTED_WIDGETS_KEY: &str = "selectedWidgets";

pub const DEFAULT_WIDGETS: [WidgetKind; 4] = [
    WidgetKind::Portfolio,
    WidgetKind::CowSwap,
    WidgetKind::CryptoBubbles,
    WidgetKind::Nft,
];

pub struct WidgetService<K>
where
    K: KeyValueStore,
{
    store: Arc<K>,
    selected: Mutex<Vec<WidgetKind>>,
}

impl<K> WidgetService<K>
where
    K: KeyValueStore,
{
    /// Create the service, restoring the selection from the store
    pub fn new(store: Arc<K>) -> Self {
        let selected = load_selected(store.as_ref());
        Self {
            store,
            selected: Mutex::new(selected),
        }
    }

    fn lock_selected(&self) -> MutexGuard<'_, Vec<WidgetKind>> {
        self.selected
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Selected widgets in catalog order
    pub fn selected(&self) -> Vec<WidgetKind> {
        let selected = self.lock_selected();
        WidgetKind::ALL
            .into_iter()
            .filter(|kind| selected.contains(kind))
            .collect()
    }

    pub fn is_enabled(&self, kind: WidgetKind) -> bool {
        self.lock_selected().contains(&kind)
    }

    /// Add `kind` if absent, remove it if present. Returns whether it is now shown.
    pub fn toggle(&self, kind: WidgetKind) -> Result<bool, StoreError> {
        let mut selected = self.lock_selected();
        let mut updated = selected.clone();

        let enabled = if updated.contains(&kind) {
            updated.retain(|k| *k != kind);
            false
        } else {
            updated.push(kind);
            true
        };

        let json = serde_json::to_string(&updated)?;
        self.store.set(SELECTED_WIDGETS_KEY, &json)?;
        *selected = updated;

        tracing::info!(widget = %kind, enabled, "Toggled widget");
        Ok(enabled)
    }

    pub fn nft_of_the_day(&self) -> NftOfTheDay {
        NftOfTheDay::featured()
    }

    pub fn portfolio(&self) -> PortfolioSnapshot {
        PortfolioSnapshot::featured()
    }
}

/// Read the selection, falling back to the defaults. Unknown ids are dropped.
fn load_selected<K: KeyValueStore + ?Sized>(store: &K) -> Vec<WidgetKind> {
    let Some(raw) = store.get(SELECTED_WIDGETS_KEY) else {
        return DEFAULT_WIDGETS.to_vec();
    };

    let ids = match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed widget selection");
            return DEFAULT_WIDGETS.to_vec();
        }
    };

    let mut selected = Vec::new();
    for id in ids {
        match id.parse::<WidgetKind>() {
            Ok(kind) if !selected.contains(&kind) => selected.push(kind),
            Ok(_) => {}
            Err(_) => tracing::debug!(id, "Dropping unknown widget id"),
        }
    }
    selected
}
