//! Payment models and the payment-create request.

use serde::{Deserialize, Serialize};

use super::{OrderId, PaymentId, PaymentMethod, PaymentStatus};

/// Request body for `POST /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePaymentRequest {
    /// Order being paid for.
    pub order_id: OrderId,
    /// Payment provider/method.
    pub provider: PaymentMethod,
    /// Amount to charge (post-discount total), in minor currency units.
    pub amount: i64,
}

/// A payment record for an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Payment {
    /// Payment identifier.
    pub id: PaymentId,
    /// Order this payment settles.
    pub order_id: OrderId,
    /// Provider/method used.
    pub provider: PaymentMethod,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Lifecycle state, owned by the server.
    pub status: PaymentStatus,
    /// Provider page to send the user to, when the provider requires it.
    #[serde(default)]
    pub redirect_url: Option<String>,
}
