//! Cart engine: the client-side source of truth for the current cart.
//!
//! The engine owns a cached copy of the server's cart and mediates every
//! mutation through the gateway. After each successful mutation it
//! re-fetches the full cart and replaces its snapshot wholesale; it never
//! patches the snapshot locally, so totals and stock bounds always
//! reflect server truth. A failed mutation leaves the last known-good
//! snapshot in place; a failed fetch clears it rather than retaining a
//! cart that may no longer exist.

use core::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::StorefrontClient;
use crate::error::Result;
use crate::models::{AddItemRequest, Cart, CartItemId, ProductId, VariantId};
use crate::outcome::OpOutcome;

/// Rejection message when a mutation overlaps an in-flight one.
const BUSY_MESSAGE: &str = "Another cart update is already in progress";

/// Rejection message for quantities below the lower bound.
const QUANTITY_TOO_LOW: &str = "Quantity must be at least 1";

/// Rejection message for quantities above available stock.
const QUANTITY_OVER_STOCK: &str = "Requested quantity exceeds available stock";

/// Rejection message when the targeted line is not in the cart.
const ITEM_NOT_FOUND: &str = "Item not found in cart";

/// Client-side cart state container, reconciled against the server after
/// every mutation.
///
/// Mutations are serialized per engine instance: a call arriving while
/// another is in flight is rejected without a network call, so
/// out-of-order refetch responses cannot overwrite each other.
#[derive(Debug)]
pub struct CartEngine {
    /// Gateway client shared with the rest of the session.
    client: Arc<StorefrontClient>,
    /// Mutable engine state behind one lock.
    state: Mutex<EngineState>,
}

/// Inner mutable state of the engine.
#[derive(Debug, Default)]
struct EngineState {
    /// Last known-good server snapshot; `None` before the first fetch,
    /// after logout, and after a failed fetch.
    cart: Option<Cart>,
    /// Display-ready message from the most recent failure.
    last_error: Option<String>,
    /// Whether a mutation is currently in flight.
    in_flight: bool,
    /// Sequence number of the most recently issued fetch.
    issued: u64,
    /// Sequence number of the most recently applied fetch response.
    applied: u64,
    /// Generation of the local state; bumped on teardown so responses
    /// issued before a [`CartEngine::clear_local`] are never applied.
    epoch: u64,
}

impl CartEngine {
    /// Creates an engine with no cart loaded.
    #[inline]
    #[must_use]
    pub fn new(client: Arc<StorefrontClient>) -> Self {
        Self {
            client,
            state: Mutex::new(EngineState::default()),
        }
    }

    /// Returns a clone of the current cart snapshot.
    #[inline]
    #[must_use]
    pub fn cart(&self) -> Option<Cart> {
        self.lock_state().cart.clone()
    }

    /// Sum of all item quantities, for badge display. Recomputed from the
    /// snapshot on every call, never cached independently.
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lock_state().cart.as_ref().map_or(0, Cart::count)
    }

    /// Server-computed cart total, or zero when no cart is loaded.
    #[inline]
    #[must_use]
    pub fn total(&self) -> i64 {
        self.lock_state().cart.as_ref().map_or(0, |cart| cart.total)
    }

    /// Message from the most recent failed operation, if any.
    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    /// Fetches the authoritative cart and replaces the snapshot wholesale.
    ///
    /// On failure the snapshot is cleared rather than left stale: a stale
    /// cart could let the user believe items remain that do not. Stale
    /// responses (superseded by a later fetch or issued before a
    /// teardown) are discarded.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self) -> OpOutcome {
        let (seq, epoch) = {
            let mut state = self.lock_state();
            state.issued = state.issued.wrapping_add(1);
            (state.issued, state.epoch)
        };
        let result = self.client.cart().await;
        let mut state = self.lock_state();
        if epoch != state.epoch || seq <= state.applied {
            // Superseded by a later fetch, or the state was torn down
            // while this fetch was in flight; drop the response.
            tracing::debug!(seq, applied = state.applied, "discarding stale cart response");
            return OpOutcome::ok();
        }
        state.applied = seq;
        match result {
            Ok(cart) => {
                state.cart = Some(cart);
                state.last_error = None;
                OpOutcome::ok()
            }
            Err(err) => {
                let message = err.user_message();
                state.cart = None;
                state.last_error = Some(message.clone());
                OpOutcome::rejected(message)
            }
        }
    }

    /// Adds a product to the cart, then re-fetches the full cart.
    ///
    /// The gateway's failure reason (e.g. insufficient stock) is passed
    /// through verbatim in the outcome message.
    #[tracing::instrument(skip_all, fields(product_id = %product_id, quantity))]
    pub async fn add_item(
        &self,
        product_id: ProductId,
        variant_id: Option<VariantId>,
        quantity: u32,
    ) -> OpOutcome {
        if quantity < 1 {
            return OpOutcome::rejected(QUANTITY_TOO_LOW);
        }
        let request = AddItemRequest {
            product_id,
            variant_id,
            quantity,
        };
        self.run_mutation(self.client.add_cart_item(&request)).await
    }

    /// Sets the quantity of one cart line, then re-fetches the full cart.
    ///
    /// Quantities below 1 are rejected without a network call. Quantities
    /// above the line's known stock are rejected with a user-facing
    /// message before any call is attempted; when the stock is unknown
    /// locally the server decides.
    #[tracing::instrument(skip_all, fields(item_id = %item_id, quantity))]
    pub async fn update_quantity(&self, item_id: CartItemId, quantity: u32) -> OpOutcome {
        if quantity < 1 {
            return OpOutcome::rejected(QUANTITY_TOO_LOW);
        }
        {
            let state = self.lock_state();
            let Some(cart) = state.cart.as_ref() else {
                return OpOutcome::rejected(ITEM_NOT_FOUND);
            };
            let Some(item) = cart.item(item_id) else {
                return OpOutcome::rejected(ITEM_NOT_FOUND);
            };
            if let Some(stock) = item.available_stock() {
                if quantity > stock {
                    return OpOutcome::rejected(QUANTITY_OVER_STOCK);
                }
            }
        }
        self.run_mutation(self.client.update_cart_item(item_id, quantity))
            .await
    }

    /// Removes one line from the cart, then re-fetches the full cart.
    #[tracing::instrument(skip_all, fields(item_id = %item_id))]
    pub async fn remove_item(&self, item_id: CartItemId) -> OpOutcome {
        self.run_mutation(self.client.remove_cart_item(item_id))
            .await
    }

    /// Empties the cart, then re-fetches (expected to yield an empty cart).
    #[tracing::instrument(skip_all)]
    pub async fn clear(&self) -> OpOutcome {
        self.run_mutation(self.client.clear_cart()).await
    }

    /// Drops all local state without touching the server. Called on
    /// logout so the next user cannot see this cart. Responses to
    /// fetches still in flight at this point are discarded.
    #[inline]
    pub fn clear_local(&self) {
        let mut state = self.lock_state();
        let epoch = state.epoch.wrapping_add(1);
        *state = EngineState {
            epoch,
            ..EngineState::default()
        };
    }

    /// Runs one serialized mutation: guard, call, refetch.
    ///
    /// If the mutation call itself fails the refetch is skipped and the
    /// snapshot stays at the last known-good state, since a failed
    /// mutation implies no server-side change occurred. A refetch failure
    /// after a successful mutation is absorbed by [`Self::refresh`]
    /// (snapshot cleared, error recorded) and does not fail the outcome.
    async fn run_mutation<F: Future<Output = Result<()>>>(&self, op: F) -> OpOutcome {
        if !self.try_begin() {
            return OpOutcome::rejected(BUSY_MESSAGE);
        }
        let outcome = match op.await {
            Ok(()) => {
                let _refetch = self.refresh().await;
                OpOutcome::ok()
            }
            Err(err) => {
                let message = err.user_message();
                self.lock_state().last_error = Some(message.clone());
                OpOutcome::rejected(message)
            }
        };
        self.finish();
        outcome
    }

    /// Marks a mutation as in flight; returns `false` if one already is.
    fn try_begin(&self) -> bool {
        let mut state = self.lock_state();
        if state.in_flight {
            false
        } else {
            state.in_flight = true;
            true
        }
    }

    /// Clears the in-flight flag.
    fn finish(&self) {
        self.lock_state().in_flight = false;
    }

    /// Acquires the state lock, recovering from poisoning.
    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
