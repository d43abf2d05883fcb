//! Wishlist entry model.

use serde::Deserialize;

use super::{ProductId, ProductSummary, WishlistItemId};

/// One saved product in a user's wishlist.
///
/// Membership is keyed by `product_id`; the wishlist is independent of
/// the cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WishlistItem {
    /// Wishlist entry identifier.
    pub id: WishlistItemId,
    /// Product saved.
    pub product_id: ProductId,
    /// Embedded product summary for display.
    #[serde(default)]
    pub product: Option<ProductSummary>,
}
