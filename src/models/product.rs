//! Product summary embedded in cart and wishlist lines.

use serde::{Deserialize, Serialize};

use super::ProductId;

/// Slim product record the gateway embeds in cart and wishlist items.
///
/// Carries just enough for display and for the client-side stock bound
/// check; the full product record lives behind the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current unit price in minor currency units.
    pub price: i64,
    /// Units currently available for sale.
    pub stock: u32,
    /// Primary image URL, if any.
    #[serde(default)]
    pub image_url: Option<String>,
}
