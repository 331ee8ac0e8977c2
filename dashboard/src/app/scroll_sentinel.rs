//! Scroll sentinel
//!
//! Watches the last rendered feed item and turns its visibility into
//! page-advance requests. The loader's ticket reservation is what guarantees
//! one request per crossing: callbacks that fire while a fetch is pending (or
//! after the last page) get no ticket and produce nothing.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::app::feed_loader::{FeedLoader, LoadOutcome, PageTicket};
use crate::domain::ports::{ElementHandle, FeedSource, ObservationId, VisibilityNotifier};
use crate::error::FetchError;

pub struct ScrollSentinel<S, V>
where
    S: FeedSource + 'static,
    V: VisibilityNotifier,
{
    loader: Arc<FeedLoader<S>>,
    notifier: Arc<V>,
    requests: mpsc::UnboundedSender<PageTicket>,
    current: Mutex<Option<(ElementHandle, ObservationId)>>,
}

impl<S, V> ScrollSentinel<S, V>
where
    S: FeedSource + 'static,
    V: VisibilityNotifier,
{
    /// Create a sentinel and the receiver its page-advance requests go to
    pub fn new(
        loader: Arc<FeedLoader<S>>,
        notifier: Arc<V>,
    ) -> (Self, mpsc::UnboundedReceiver<PageTicket>) {
        let (requests, rx) = mpsc::unbounded_channel();
        (
            Self {
                loader,
                notifier,
                requests,
                current: Mutex::new(None),
            },
            rx,
        )
    }

    /// Observe `target`, replacing any previous observation.
    /// Re-attaching the current target is a no-op.
    pub fn attach(&self, target: Option<ElementHandle>) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if current.as_ref().map(|(handle, _)| handle) == target.as_ref() {
            return;
        }

        if let Some((previous, id)) = current.take() {
            tracing::trace!(index = previous.index, "Detaching sentinel");
            self.notifier.unobserve(id);
        }

        if let Some(target) = target {
            let loader = Arc::clone(&self.loader);
            let requests = self.requests.clone();
            let index = target.index;

            let id = self.notifier.observe(
                target.clone(),
                Arc::new(move || request_next(&loader, &requests, index)),
            );
            *current = Some((target, id));
        }
    }

    /// Act as if the observed target just became visible.
    /// Does nothing while no target is observed.
    pub fn cross(&self) {
        if let Some(target) = self.target() {
            request_next(&self.loader, &self.requests, target.index);
        }
    }

    /// Re-attach to whatever is currently the last item
    pub fn refresh(&self) {
        self.attach(self.loader.last_handle());
    }

    /// The element currently observed
    pub fn target(&self) -> Option<ElementHandle> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|(handle, _)| handle.clone())
    }

    /// Stop observing and detach the loader
    pub fn teardown(&self) {
        self.attach(None);
        self.loader.detach();
    }
}

/// One crossing: reserve the next page and queue it for the session
fn request_next<S: FeedSource>(
    loader: &FeedLoader<S>,
    requests: &mpsc::UnboundedSender<PageTicket>,
    index: usize,
) {
    match loader.begin_next() {
        Some(ticket) => {
            tracing::debug!(index, page = ticket.page(), "Sentinel requested next page");
            if requests.send(ticket).is_err() {
                loader.release(ticket);
            }
        }
        None => tracing::trace!(index, "Sentinel crossing ignored"),
    }
}

/// A loader wired to its sentinel. Owns the request receiver and applies
/// page-advance requests in the order they were granted.
pub struct FeedSession<S, V>
where
    S: FeedSource + 'static,
    V: VisibilityNotifier,
{
    loader: Arc<FeedLoader<S>>,
    sentinel: ScrollSentinel<S, V>,
    requests: tokio::sync::Mutex<mpsc::UnboundedReceiver<PageTicket>>,
}

impl<S, V> FeedSession<S, V>
where
    S: FeedSource + 'static,
    V: VisibilityNotifier,
{
    pub fn new(source: Arc<S>, notifier: Arc<V>) -> Self {
        let loader = Arc::new(FeedLoader::new(source));
        let (sentinel, rx) = ScrollSentinel::new(Arc::clone(&loader), notifier);
        Self {
            loader,
            sentinel,
            requests: tokio::sync::Mutex::new(rx),
        }
    }

    pub fn loader(&self) -> &FeedLoader<S> {
        &self.loader
    }

    pub fn sentinel(&self) -> &ScrollSentinel<S, V> {
        &self.sentinel
    }

    /// Load (or reload) page 1 and observe the new last item
    pub async fn start(&self) -> Result<LoadOutcome, FetchError> {
        let outcome = self.loader.load_page(1).await;
        self.sentinel.refresh();
        outcome
    }

    /// Run every page-advance request the sentinel has produced so far
    pub async fn drain(&self) -> Vec<Result<LoadOutcome, FetchError>> {
        let mut requests = self.requests.lock().await;
        let mut outcomes = Vec::new();
        while let Ok(ticket) = requests.try_recv() {
            outcomes.push(self.loader.run(ticket).await);
            self.sentinel.refresh();
        }
        outcomes
    }

    /// Move the feed forward one step, the way a reader scrolling would.
    ///
    /// Before page 1 has been applied (including after a failed first load)
    /// this loads page 1. Afterwards it crosses the sentinel and runs what
    /// the crossing requested, which is nothing once the feed is exhausted.
    pub async fn advance(&self) -> Vec<Result<LoadOutcome, FetchError>> {
        let fresh = self
            .loader
            .read(|state| state.current_page() == 0 && !state.is_loading());

        if fresh {
            return vec![self.start().await];
        }

        self.sentinel.cross();
        self.drain().await
    }

    pub fn teardown(&self) {
        self.sentinel.teardown();
    }
}
