//! Market service
//!
//! Backs the market widgets: four pinned token slots resolved against the
//! prices endpoint, token search, and the bubbles board of top movers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::app::market_ranker::{bubbles, Bubble, DEFAULT_LIMIT};
use crate::domain::entities::{PerformanceWindow, Token, TokenQuote};
use crate::domain::ports::{KeyValueStore, MarketDataSource};
use crate::error::{DashboardError, FetchError, StoreError};

/// Store key for the pinned slots (JSON array of id-or-null)
pub const PINNED_TOKENS_KEY: &str = "pinnedTokens";

pub const SLOT_COUNT: usize = 4;

/// Bitcoin, Ethereum, BNB, and an empty slot for the user's choice
pub const DEFAULT_PINNED: [Option<&str>; SLOT_COUNT] = [
    Some("ee9702a0-c587-4c69-ac0c-ce820a50c95b"),
    Some("eth"),
    Some("0xb8c77482e45f1f44de1745f52c74426c631bdd52"),
    None,
];

/// Service for market widgets
pub struct MarketService<M, K>
where
    M: MarketDataSource,
    K: KeyValueStore,
{
    market: Arc<M>,
    store: Arc<K>,
    pinned: Mutex<Vec<Option<String>>>,
}

impl<M, K> MarketService<M, K>
where
    M: MarketDataSource,
    K: KeyValueStore,
{
    /// Create the service, restoring pinned slots from the store
    pub fn new(market: Arc<M>, store: Arc<K>) -> Self {
        let pinned = load_pinned(store.as_ref());
        Self {
            market,
            store,
            pinned: Mutex::new(pinned),
        }
    }

    fn lock_pinned(&self) -> MutexGuard<'_, Vec<Option<String>>> {
        self.pinned
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn pinned(&self) -> Vec<Option<String>> {
        self.lock_pinned().clone()
    }

    /// Resolve every slot against the current price list.
    /// Empty slots and ids missing from the list come back as `None`.
    pub async fn quotes(&self) -> Result<Vec<Option<TokenQuote>>, FetchError> {
        let tokens = self.market.fetch_tokens().await?;
        let pinned = self.pinned();

        Ok(pinned
            .iter()
            .map(|slot| {
                let id = slot.as_deref()?;
                let token = tokens.iter().find(|t| t.id == id);
                if token.is_none() {
                    tracing::debug!(token_id = id, "Pinned token not in price list");
                }
                token.and_then(TokenQuote::from_token)
            })
            .collect())
    }

    pub fn pin(&self, slot: usize, token_id: &str) -> Result<(), DashboardError> {
        self.update_slot(slot, Some(token_id.to_string()))
    }

    pub fn unpin(&self, slot: usize) -> Result<(), DashboardError> {
        self.update_slot(slot, None)
    }

    fn update_slot(&self, slot: usize, value: Option<String>) -> Result<(), DashboardError> {
        if slot >= SLOT_COUNT {
            return Err(DashboardError::InvalidSlot {
                slot,
                slots: SLOT_COUNT,
            });
        }

        let mut pinned = self.lock_pinned();
        let mut updated = pinned.clone();
        updated[slot] = value;

        // Memory only changes once the store has accepted the new slots
        let json = serde_json::to_string(&updated).map_err(StoreError::from)?;
        self.store.set(PINNED_TOKENS_KEY, &json)?;
        *pinned = updated;

        tracing::info!(slot, token_id = ?pinned[slot], "Updated pinned token slot");
        Ok(())
    }

    /// Tokens not already pinned whose name or symbol contains `query`
    pub async fn search(&self, query: &str) -> Result<Vec<Token>, FetchError> {
        let tokens = self.market.fetch_tokens().await?;
        let pinned = self.pinned();
        let query = query.trim();

        Ok(tokens
            .into_iter()
            .filter(|token| !pinned.iter().flatten().any(|id| *id == token.id))
            .filter(|token| token.matches(query))
            .collect())
    }

    /// Top movers for `window`. Zero valid entries is an empty board.
    pub async fn movers(&self, window: PerformanceWindow) -> Result<Vec<Bubble>, FetchError> {
        let entries = self.market.fetch_bubbles().await?;
        let board = bubbles(&entries, window, DEFAULT_LIMIT);

        if board.is_empty() {
            tracing::warn!(
                %window,
                entries = entries.len(),
                "No valid market entries for window"
            );
        }

        Ok(board)
    }
}

/// Read pinned slots from the store, falling back to the defaults.
/// Stored lists are padded or cut to `SLOT_COUNT`.
fn load_pinned<K: KeyValueStore + ?Sized>(store: &K) -> Vec<Option<String>> {
    let stored = store.get(PINNED_TOKENS_KEY).and_then(|raw| {
        serde_json::from_str::<Vec<Option<String>>>(&raw)
            .map_err(|e| tracing::warn!(error = %e, "Ignoring malformed pinned tokens"))
            .ok()
    });

    let mut pinned = stored.unwrap_or_else(|| {
        DEFAULT_PINNED
            .iter()
            .map(|id| id.map(str::to_string))
            .collect()
    });
    pinned.resize(SLOT_COUNT, None);
    pinned
}
