//! Visibility notifier port
//!
//! Abstraction over viewport intersection: a target element is observed and
//! the callback fires whenever the target becomes visible.

use std::sync::Arc;

/// Handle returned by `observe`, used to stop observing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationId(pub u64);

/// A rendered feed element, identified by its position and item id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    pub index: usize,
    pub item_id: Option<String>,
}

pub type VisibilityCallback = Arc<dyn Fn() + Send + Sync>;

pub trait VisibilityNotifier: Send + Sync {
    /// Start observing `target`; `on_visible` runs on every intersection
    fn observe(&self, target: ElementHandle, on_visible: VisibilityCallback) -> ObservationId;

    /// Stop observing. Unknown ids are ignored.
    fn unobserve(&self, id: ObservationId);
}
