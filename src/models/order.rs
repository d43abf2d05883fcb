//! Order models and the order-create request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    AddressId, CouponId, OrderId, OrderStatus, Pagination, PaymentMethod, ProductId, VariantId,
};

/// One line of an order, with price captured permanently at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product ordered.
    pub product_id: ProductId,
    /// Selected variant, if any.
    pub variant_id: Option<VariantId>,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price locked at order creation, in minor currency units.
    pub price: i64,
}

/// Request body for `POST /orders`.
///
/// Items are a snapshot of the cart as it stood at submission time; the
/// server is the final arbiter of stock availability and may reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOrderRequest {
    /// Destination address, referenced by id.
    pub shipping_address_id: AddressId,
    /// Applied coupon, if any.
    pub coupon_id: Option<CouponId>,
    /// Payment method the user selected.
    pub payment_method: PaymentMethod,
    /// Cart items as they stood at submission time.
    pub items: Vec<OrderItem>,
}

/// A durable order. Immutable after creation; the client only reads
/// `status` as the server advances it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Order {
    /// Order identifier (UUID).
    pub uuid: OrderId,
    /// Lifecycle state, owned by the server.
    pub status: OrderStatus,
    /// Order total after discount, in minor currency units.
    pub total: i64,
    /// Ordered items with locked prices.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Coupon redeemed on this order, if any.
    #[serde(default)]
    pub coupon_id: Option<CouponId>,
    /// Shipping address reference.
    #[serde(default)]
    pub shipping_address_id: Option<AddressId>,
    /// Creation instant.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Query filters for the paginated order list (`GET /orders`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderListQuery {
    /// Restrict to orders in this status.
    pub status: Option<OrderStatus>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl OrderListQuery {
    /// Creates an empty query matching all orders.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to orders in the given status.
    #[inline]
    #[must_use]
    pub const fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Selects a page of results.
    #[inline]
    #[must_use]
    pub const fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    /// Renders the set filters as query-string pairs.
    #[must_use]
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            // serde renders the snake_case wire name; strip the JSON quotes.
            if let Ok(raw) = serde_json::to_string(&status) {
                pairs.push(("status", raw.trim_matches('"').to_owned()));
            }
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// One page of the order list with its paging metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPage {
    /// Orders on this page.
    pub orders: Vec<Order>,
    /// Paging metadata, when the gateway provides it.
    pub pagination: Option<Pagination>,
}
