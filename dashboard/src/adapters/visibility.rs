//! Manual visibility notifier
//!
//! A notifier driven by the host instead of a viewport: the host reports that
//! an element became visible and the matching callbacks run. The MCP server
//! uses it to turn "show me more" into a crossing of the last item.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::ports::{ElementHandle, ObservationId, VisibilityCallback, VisibilityNotifier};

#[derive(Default)]
struct Observations {
    next_id: u64,
    active: BTreeMap<u64, (ElementHandle, VisibilityCallback)>,
    observe_count: usize,
}

#[derive(Default)]
pub struct ManualVisibilityNotifier {
    inner: Mutex<Observations>,
}

impl ManualVisibilityNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn callbacks_where(
        &self,
        pred: impl Fn(u64, &ElementHandle) -> bool,
    ) -> Vec<VisibilityCallback> {
        let inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner
            .active
            .iter()
            .filter(|(id, (handle, _))| pred(**id, handle))
            .map(|(_, (_, callback))| callback.clone())
            .collect()
    }

    /// Report `target` as visible. Returns how many callbacks ran.
    pub fn reveal(&self, target: &ElementHandle) -> usize {
        // Callbacks may observe or unobserve, so run them unlocked
        let callbacks = self.callbacks_where(|_, handle| handle == target);
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Report the most recently observed element as visible
    pub fn reveal_last(&self) -> usize {
        let last = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .active
            .keys()
            .next_back()
            .copied();

        match last {
            Some(last) => {
                let callbacks = self.callbacks_where(|id, _| id == last);
                for callback in &callbacks {
                    callback();
                }
                callbacks.len()
            }
            None => 0,
        }
    }

    /// Elements currently observed, oldest first
    pub fn observed(&self) -> Vec<ElementHandle> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .active
            .values()
            .map(|(handle, _)| handle.clone())
            .collect()
    }

    /// Total `observe` calls over the notifier's lifetime
    pub fn observe_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .observe_count
    }
}

impl VisibilityNotifier for ManualVisibilityNotifier {
    fn observe(&self, target: ElementHandle, on_visible: VisibilityCallback) -> ObservationId {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observe_count += 1;
        inner.active.insert(id, (target, on_visible));
        ObservationId(id)
    }

    fn unobserve(&self, id: ObservationId) {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .active
            .remove(&id.0);
    }
}
