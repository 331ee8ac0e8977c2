//! Feed loader
//!
//! Paginated, append-only accumulation of feed items. A loader owns one feed
//! session's state. At most one page fetch is in flight at a time; a request
//! made while another is pending is skipped, never queued.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entities::FeedItem;
use crate::domain::ports::{ElementHandle, FeedSource};
use crate::error::FetchError;

/// Loader state machine: `Idle -> Loading -> {Idle, Failed}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderStatus {
    Idle,
    Loading,
    /// Last fetch failed. Non-terminal: a later trigger may load again.
    Failed(String),
}

/// Accumulated feed for one session
#[derive(Debug, Clone)]
pub struct FeedState {
    items: Vec<FeedItem>,
    current_page: u32,
    total_pages: u32,
    has_more: bool,
    status: LoaderStatus,
    attached: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            total_pages: 0,
            has_more: true,
            status: LoaderStatus::Idle,
            attached: true,
        }
    }
}

impl FeedState {
    /// Items in display order
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    /// Last successfully applied page, 0 before the first load
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn status(&self) -> &LoaderStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoaderStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoaderStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Handle of the last rendered item, the sentinel's observation target
    pub fn last_handle(&self) -> Option<ElementHandle> {
        self.items.last().map(|item| ElementHandle {
            index: self.items.len() - 1,
            item_id: item.id().map(str::to_string),
        })
    }
}

/// Reservation for one page fetch. Granting a ticket moves the loader to
/// `Loading`; the ticket must be passed to `run` or `release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PageTicket {
    page: u32,
}

impl PageTicket {
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Result of a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was applied to the feed
    Applied {
        page: u32,
        received: usize,
        has_more: bool,
    },
    /// Another fetch was pending (or the loader is detached); nothing was fetched
    Skipped,
    /// The fetch completed after teardown and was dropped
    Discarded,
}

/// Held across a fetch. If the fetch future is dropped before its result is
/// applied, the loader goes back to `Idle` so later requests are not skipped.
struct InFlight<'a> {
    state: &'a Mutex<FeedState>,
    page: u32,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if state.is_loading() {
            tracing::debug!(page = self.page, "Feed fetch cancelled");
            state.status = LoaderStatus::Idle;
        }
    }
}

/// Loader for one feed session
pub struct FeedLoader<S>
where
    S: FeedSource,
{
    source: Arc<S>,
    state: Mutex<FeedState>,
}

impl<S> FeedLoader<S>
where
    S: FeedSource,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: Mutex::new(FeedState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        // State is only mutated in short non-panicking sections
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Read the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&FeedState) -> R) -> R {
        f(&self.lock())
    }

    pub fn snapshot(&self) -> FeedState {
        self.lock().clone()
    }

    pub fn last_handle(&self) -> Option<ElementHandle> {
        self.lock().last_handle()
    }

    /// Reserve a fetch of `page`. Returns `Ok(None)` if a fetch is pending.
    pub fn begin(&self, page: u32) -> Result<Option<PageTicket>, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidPage(page));
        }

        let mut state = self.lock();
        if !state.attached || state.is_loading() {
            return Ok(None);
        }
        state.status = LoaderStatus::Loading;
        Ok(Some(PageTicket { page }))
    }

    /// Reserve a fetch of the page after the current one, if there is one
    /// and nothing is pending.
    pub fn begin_next(&self) -> Option<PageTicket> {
        let mut state = self.lock();
        if !state.attached || !state.has_more || state.is_loading() {
            return None;
        }
        state.status = LoaderStatus::Loading;
        Some(PageTicket {
            page: state.current_page + 1,
        })
    }

    /// Give back a ticket that will not be run
    pub fn release(&self, ticket: PageTicket) {
        let mut state = self.lock();
        if state.is_loading() {
            tracing::debug!(page = ticket.page, "Released unused page ticket");
            state.status = LoaderStatus::Idle;
        }
    }

    /// Fetch the ticket's page and apply it.
    ///
    /// Page 1 replaces the accumulated items, later pages append. On failure
    /// the items are untouched and the error is recorded on the state.
    pub async fn run(&self, ticket: PageTicket) -> Result<LoadOutcome, FetchError> {
        let page = ticket.page;
        tracing::debug!(page, "Fetching feed page");

        let mut in_flight = InFlight {
            state: &self.state,
            page,
            armed: true,
        };

        let result = match self.source.fetch_page(page).await {
            Ok(fetched) => fetched
                .validate()
                .map(|_| fetched)
                .map_err(FetchError::Parse),
            Err(e) => Err(e),
        };

        // No await from here on: the result is always applied
        in_flight.armed = false;
        let mut state = self.lock();
        if !state.attached {
            tracing::debug!(page, "Feed detached, discarding fetched page");
            state.status = LoaderStatus::Idle;
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(fetched) => {
                if fetched.page != page {
                    tracing::warn!(
                        requested = page,
                        returned = fetched.page,
                        "Feed endpoint returned a different page than requested"
                    );
                }

                let received = fetched.items.len();
                let has_more = fetched.has_more();
                if page == 1 {
                    state.items = fetched.items;
                } else {
                    state.items.extend(fetched.items);
                }
                state.current_page = page;
                state.total_pages = fetched.total_pages;
                state.has_more = has_more;
                state.status = LoaderStatus::Idle;

                tracing::debug!(
                    page,
                    received,
                    total = state.items.len(),
                    has_more,
                    "Applied feed page"
                );

                Ok(LoadOutcome::Applied {
                    page,
                    received,
                    has_more,
                })
            }
            Err(e) => {
                tracing::error!(page, error = %e, "Failed to fetch feed page");
                state.status = LoaderStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Load a specific page, skipping if a fetch is already pending
    pub async fn load_page(&self, page: u32) -> Result<LoadOutcome, FetchError> {
        match self.begin(page)? {
            Some(ticket) => self.run(ticket).await,
            None => Ok(LoadOutcome::Skipped),
        }
    }

    /// Load the page after the current one, if any
    pub async fn load_next(&self) -> Result<LoadOutcome, FetchError> {
        match self.begin_next() {
            Some(ticket) => self.run(ticket).await,
            None => Ok(LoadOutcome::Skipped),
        }
    }

    /// Tear down: completions arriving after this are discarded
    pub fn detach(&self) {
        self.lock().attached = false;
    }
}
