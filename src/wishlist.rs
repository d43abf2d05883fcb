//! Wishlist store: the client-side copy of the user's saved products.
//!
//! Mirrors the cart engine's reconciliation discipline at a smaller
//! scale: every mutation goes through the gateway and is followed by a
//! full refetch; the local list is a cache subordinate to the next
//! successful fetch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::StorefrontClient;
use crate::models::{ProductId, WishlistItem};
use crate::outcome::OpOutcome;

/// Client-side wishlist container, refetched after every mutation.
#[derive(Debug)]
pub struct WishlistStore {
    /// Gateway client shared with the rest of the session.
    client: Arc<StorefrontClient>,
    /// Mutable store state behind one lock.
    state: Mutex<StoreState>,
}

/// Inner mutable state of the store.
#[derive(Debug, Default)]
struct StoreState {
    /// Saved products from the last successful fetch.
    items: Vec<WishlistItem>,
    /// Display-ready message from the most recent failure.
    last_error: Option<String>,
    /// Sequence number of the most recently issued fetch.
    issued: u64,
    /// Sequence number of the most recently applied fetch response.
    applied: u64,
    /// Generation of the local state; bumped on teardown so responses
    /// issued before a [`WishlistStore::clear_local`] are never applied.
    epoch: u64,
}

impl WishlistStore {
    /// Creates an empty store.
    #[inline]
    #[must_use]
    pub fn new(client: Arc<StorefrontClient>) -> Self {
        Self {
            client,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Returns a clone of the current wishlist items.
    #[inline]
    #[must_use]
    pub fn items(&self) -> Vec<WishlistItem> {
        self.lock_state().items.clone()
    }

    /// Returns `true` if the product is in the wishlist.
    #[inline]
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.lock_state()
            .items
            .iter()
            .any(|item| item.product_id == product_id)
    }

    /// Number of saved products.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.lock_state().items.len()
    }

    /// Message from the most recent failed operation, if any.
    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    /// Fetches the authoritative wishlist, replacing local state. On
    /// failure the list is emptied and the error recorded. Stale
    /// responses (superseded by a later fetch or issued before a
    /// teardown) are discarded.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self) -> OpOutcome {
        let (seq, epoch) = {
            let mut state = self.lock_state();
            state.issued = state.issued.wrapping_add(1);
            (state.issued, state.epoch)
        };
        let result = self.client.wishlist().await;
        let mut state = self.lock_state();
        if epoch != state.epoch || seq <= state.applied {
            // Superseded by a later fetch, or the state was torn down
            // while this fetch was in flight; drop the response.
            tracing::debug!(seq, applied = state.applied, "discarding stale wishlist response");
            return OpOutcome::ok();
        }
        state.applied = seq;
        match result {
            Ok(items) => {
                state.items = items;
                state.last_error = None;
                OpOutcome::ok()
            }
            Err(err) => {
                let message = err.user_message();
                state.items = Vec::new();
                state.last_error = Some(message.clone());
                OpOutcome::rejected(message)
            }
        }
    }

    /// Adds a product, then refetches.
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add(&self, product_id: ProductId) -> OpOutcome {
        match self.client.add_wishlist_item(product_id).await {
            Ok(()) => {
                let _refetch = self.refresh().await;
                OpOutcome::ok()
            }
            Err(err) => self.record_failure(&err),
        }
    }

    /// Removes a product, then refetches.
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove(&self, product_id: ProductId) -> OpOutcome {
        match self.client.remove_wishlist_item(product_id).await {
            Ok(()) => {
                let _refetch = self.refresh().await;
                OpOutcome::ok()
            }
            Err(err) => self.record_failure(&err),
        }
    }

    /// Adds the product if absent, removes it if present.
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn toggle(&self, product_id: ProductId) -> OpOutcome {
        if self.contains(product_id) {
            self.remove(product_id).await
        } else {
            self.add(product_id).await
        }
    }

    /// Drops all local state without touching the server. Called on
    /// logout so the next user cannot see this wishlist. Responses to
    /// fetches still in flight at this point are discarded.
    #[inline]
    pub fn clear_local(&self) {
        let mut state = self.lock_state();
        let epoch = state.epoch.wrapping_add(1);
        *state = StoreState {
            epoch,
            ..StoreState::default()
        };
    }

    /// Records a failed mutation, leaving the item list untouched.
    fn record_failure(&self, err: &crate::error::StorefrontError) -> OpOutcome {
        let message = err.user_message();
        self.lock_state().last_error = Some(message.clone());
        OpOutcome::rejected(message)
    }

    /// Acquires the state lock, recovering from poisoning.
    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
