//! Per-user application state with an explicit lifecycle.
//!
//! A [`Session`] is created on login, initialized once, and torn down on
//! logout. It owns the cart engine and wishlist store for exactly one
//! authenticated user, so switching users can never leak the previous
//! user's state. There are no ambient singletons: the session is passed
//! explicitly to whatever needs it.

use core::future::Future;
use std::sync::Arc;

use crate::cart::CartEngine;
use crate::checkout::Checkout;
use crate::client::StorefrontClient;
use crate::error::{Result, StorefrontError};
use crate::models::User;
use crate::outcome::OpOutcome;
use crate::wishlist::WishlistStore;

/// Prompt used before wiping the cart.
const CLEAR_CART_PROMPT: &str = "Remove all items from your cart?";

/// Normalized user role, resolved once at session-load time.
///
/// The gateway historically delivered the role in three shapes (plain
/// `role` string, `role_name` key, nested `role.name`); this enum is the
/// single place that ambiguity is resolved. Everything downstream
/// matches on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Regular shopper: cart, wishlist, orders.
    Customer,
    /// Seller: product and shipment management panels.
    Seller,
    /// Administrator: coupon, event, and user management panels.
    Admin,
}

impl Role {
    /// Parses a raw role name, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "CUSTOMER" => Some(Self::Customer),
            "SELLER" => Some(Self::Seller),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Asks the user to confirm a destructive action before it runs.
///
/// Replaces notification-driven confirm dialogs (a continuation handed
/// to a toast) with an explicit awaited yes/no, called inline before the
/// mutating operation.
pub trait Confirm {
    /// Returns `true` if the user approved the action.
    fn confirm(&self, prompt: &str) -> impl Future<Output = bool> + Send;
}

/// [`Confirm`] implementation that approves everything. For headless use
/// and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    #[inline]
    fn confirm(&self, _prompt: &str) -> impl Future<Output = bool> + Send {
        core::future::ready(true)
    }
}

/// Application state for one authenticated user.
#[derive(Debug)]
pub struct Session {
    /// Gateway client shared by all stores.
    client: Arc<StorefrontClient>,
    /// The authenticated user.
    user: User,
    /// Role normalized once at construction.
    role: Role,
    /// Cart engine scoped to this user.
    cart: CartEngine,
    /// Wishlist store scoped to this user.
    wishlist: WishlistStore,
}

impl Session {
    /// Creates a session for an authenticated user, resolving the role.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] if the user payload
    /// carries no recognizable role.
    pub fn new(client: Arc<StorefrontClient>, user: User) -> Result<Self> {
        let role = user
            .raw_role()
            .and_then(Role::parse)
            .ok_or_else(|| StorefrontError::Validation("unrecognized user role".to_owned()))?;
        Ok(Self {
            cart: CartEngine::new(Arc::clone(&client)),
            wishlist: WishlistStore::new(Arc::clone(&client)),
            client,
            user,
            role,
        })
    }

    /// Fetches the user's cart and, for customers, their wishlist.
    ///
    /// Fetch failures are absorbed into the stores' own error state; the
    /// session still comes up (with empty stores) so the rest of the UI
    /// is usable.
    #[tracing::instrument(skip_all, fields(user_id = %self.user.id))]
    pub async fn initialize(&self) {
        let _cart = self.cart.refresh().await;
        if self.role == Role::Customer {
            let _wishlist = self.wishlist.refresh().await;
        }
    }

    /// Drops all user-scoped state. Called on logout; no network calls.
    #[inline]
    pub fn teardown(&self) {
        self.cart.clear_local();
        self.wishlist.clear_local();
    }

    /// The authenticated user.
    #[inline]
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// The normalized role, resolved once at login.
    #[inline]
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The cart engine for this user.
    #[inline]
    #[must_use]
    pub const fn cart(&self) -> &CartEngine {
        &self.cart
    }

    /// The wishlist store for this user.
    #[inline]
    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// Starts a fresh checkout session sharing this session's client.
    #[inline]
    #[must_use]
    pub fn checkout(&self) -> Checkout {
        Checkout::new(Arc::clone(&self.client))
    }

    /// Empties the cart after an explicit user confirmation.
    ///
    /// Declining leaves the cart untouched and returns an unsuccessful
    /// outcome with no message (nothing went wrong; nothing happened).
    pub async fn clear_cart_confirmed<C: Confirm>(&self, confirm: &C) -> OpOutcome {
        if confirm.confirm(CLEAR_CART_PROMPT).await {
            self.cart.clear().await
        } else {
            OpOutcome {
                success: false,
                message: None,
            }
        }
    }
}
