//! Cart and cart item models.

use serde::{Deserialize, Serialize};

use super::{CartItemId, ProductId, ProductSummary, VariantId};

/// The current user's active shopping cart as returned by the gateway.
///
/// The client-side copy is a cache of the server's durable cart and is
/// replaced wholesale after every successful fetch; `total` is
/// server-computed and never recalculated locally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Cart {
    /// Line items in insertion order (insertion order = display order).
    pub items: Vec<CartItem>,
    /// Sum of item subtotals in minor currency units, computed server-side.
    pub total: i64,
}

impl Cart {
    /// Sum of all item quantities, for badge display.
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Returns `true` if the cart holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a line item by its cart-scoped identifier.
    #[inline]
    #[must_use]
    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// One line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartItem {
    /// Identifier unique within the cart.
    pub id: CartItemId,
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Selected variant, if the product has variants.
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    /// Units of the product in the cart, always >= 1.
    pub quantity: u32,
    /// Unit price captured when the item was added, display-only.
    pub price_snapshot: i64,
    /// Unit price looked up fresh from the product record; authoritative
    /// for billing.
    pub current_price: i64,
    /// Embedded product summary (name, stock, image).
    #[serde(default)]
    pub product: Option<ProductSummary>,
}

impl CartItem {
    /// Line subtotal: current price times quantity.
    #[inline]
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.current_price.saturating_mul(i64::from(self.quantity))
    }

    /// Returns `true` when the price moved since the item was added, in
    /// which case the snapshot is shown struck through.
    #[inline]
    #[must_use]
    pub const fn price_changed(&self) -> bool {
        self.price_snapshot != self.current_price
    }

    /// Stock available for this line's product, when the summary is
    /// embedded. `None` means the bound cannot be checked locally and the
    /// server decides.
    #[inline]
    #[must_use]
    pub fn available_stock(&self) -> Option<u32> {
        self.product.as_ref().map(|product| product.stock)
    }
}

/// Request body for adding an item to the cart (`POST /cart`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddItemRequest {
    /// Product to add.
    pub product_id: ProductId,
    /// Selected variant, if any.
    pub variant_id: Option<VariantId>,
    /// Units to add, >= 1.
    pub quantity: u32,
}
