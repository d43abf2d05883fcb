//! Checkout orchestrator: turns a cart into a paid order.
//!
//! No distributed transaction spans the cart, order, and payment
//! resources, so the orchestrator imposes a strict sequence with defined
//! failure handling: validate inputs locally, create the order (prices
//! lock here), then create the payment referencing the new order. A
//! payment failure after order creation is reported with the existing
//! order id and never rolled back or retried automatically; retrying
//! blindly could create a duplicate order, so the user must explicitly
//! re-initiate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::StorefrontClient;
use crate::discount::{compute_total, normalize_code};
use crate::models::{
    Address, AddressId, Cart, Coupon, CreateOrderRequest, CreatePaymentRequest, OrderId,
    OrderItem, PaymentMethod,
};
use crate::outcome::OpOutcome;

/// Rejection message when no shipping address is selected.
const NO_ADDRESS: &str = "Please select a shipping address";

/// Rejection message when the cart is empty at checkout.
const EMPTY_CART: &str = "Your cart is empty";

/// Rejection message for an empty coupon code.
const EMPTY_CODE: &str = "Please enter a coupon code";

/// Rejection message when a coupon is already applied.
const COUPON_ALREADY_APPLIED: &str = "A coupon is already applied";

/// Rejection message when checkout is re-entered while submitting.
const CHECKOUT_IN_PROGRESS: &str = "Checkout is already in progress";

/// Where the checkout flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Gathering address, coupon, and payment method.
    CollectingInputs,
    /// Order-create request in flight.
    SubmittingOrder,
    /// Order exists server-side; payment not yet attempted.
    OrderCreated,
    /// Payment-create request in flight.
    SubmittingPayment,
    /// Payment created; no provider redirect required.
    PaymentInitiated,
    /// Payment created; the user must be sent to the provider page.
    Redirecting,
    /// A submission step failed; the user must re-initiate explicitly.
    Failed,
}

/// Result of a checkout attempt.
///
/// `order_id` is set whenever an order was created, including when the
/// subsequent payment step failed: the order then exists server-side in
/// a pending state and the user resumes from order history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Whether the full sequence completed.
    pub success: bool,
    /// Display-ready failure reason; `None` on success.
    pub message: Option<String>,
    /// Identifier of the created order, when one was created.
    pub order_id: Option<OrderId>,
    /// Provider page to navigate to; when `None` after success, the
    /// caller routes to the order detail view instead.
    pub redirect_url: Option<String>,
}

impl CheckoutOutcome {
    /// Failure before any order was created.
    fn failed<T: Into<String>>(message: T) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            order_id: None,
            redirect_url: None,
        }
    }

    /// Failure after the order was created (payment step).
    fn failed_with_order<T: Into<String>>(message: T, order_id: OrderId) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            order_id: Some(order_id),
            redirect_url: None,
        }
    }

    /// Full sequence completed.
    const fn completed(order_id: OrderId, redirect_url: Option<String>) -> Self {
        Self {
            success: true,
            message: None,
            order_id: Some(order_id),
            redirect_url,
        }
    }
}

/// Sequences address selection, coupon application, order creation, and
/// payment initiation for one checkout session.
#[derive(Debug)]
pub struct Checkout {
    /// Gateway client shared with the rest of the session.
    client: Arc<StorefrontClient>,
    /// Mutable checkout state behind one lock.
    state: Mutex<CheckoutState>,
}

/// Inner mutable state of a checkout session.
#[derive(Debug)]
struct CheckoutState {
    /// Addresses loaded for selection.
    addresses: Vec<Address>,
    /// Currently selected shipping address.
    selected_address: Option<AddressId>,
    /// Applied coupon; at most one per checkout session.
    coupon: Option<Coupon>,
    /// Selected payment method.
    payment_method: PaymentMethod,
    /// Flat shipping fee in minor currency units.
    shipping_fee: i64,
    /// Current flow phase.
    phase: CheckoutPhase,
}

impl Checkout {
    /// Creates a checkout session with no inputs collected yet.
    #[inline]
    #[must_use]
    pub fn new(client: Arc<StorefrontClient>) -> Self {
        Self {
            client,
            state: Mutex::new(CheckoutState {
                addresses: Vec::new(),
                selected_address: None,
                coupon: None,
                payment_method: PaymentMethod::BankTransfer,
                shipping_fee: 0,
                phase: CheckoutPhase::CollectingInputs,
            }),
        }
    }

    /// Current flow phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> CheckoutPhase {
        self.lock_state().phase
    }

    /// Addresses loaded for selection.
    #[inline]
    #[must_use]
    pub fn addresses(&self) -> Vec<Address> {
        self.lock_state().addresses.clone()
    }

    /// Currently selected shipping address, if any.
    #[inline]
    #[must_use]
    pub fn selected_address(&self) -> Option<AddressId> {
        self.lock_state().selected_address
    }

    /// Currently applied coupon, if any.
    #[inline]
    #[must_use]
    pub fn applied_coupon(&self) -> Option<Coupon> {
        self.lock_state().coupon.clone()
    }

    /// Loads the user's addresses and auto-selects the default one (or
    /// the first, when none is flagged default).
    #[tracing::instrument(skip_all)]
    pub async fn load_addresses(&self) -> OpOutcome {
        match self.client.addresses().await {
            Ok(addresses) => {
                let mut state = self.lock_state();
                let default = addresses
                    .iter()
                    .find(|address| address.is_default)
                    .or_else(|| addresses.first())
                    .map(|address| address.id);
                state.selected_address = default;
                state.addresses = addresses;
                OpOutcome::ok()
            }
            Err(err) => OpOutcome::rejected(err.user_message()),
        }
    }

    /// Selects the shipping address for this checkout.
    #[inline]
    pub fn select_address(&self, address_id: AddressId) {
        self.lock_state().selected_address = Some(address_id);
    }

    /// Selects the payment method.
    #[inline]
    pub fn set_payment_method(&self, method: PaymentMethod) {
        self.lock_state().payment_method = method;
    }

    /// Sets the flat shipping fee added after discount.
    #[inline]
    pub fn set_shipping_fee(&self, fee: i64) {
        self.lock_state().shipping_fee = fee;
    }

    /// Validates a coupon code via the gateway and applies it.
    ///
    /// The code is trimmed and uppercased before lookup. Re-applying
    /// while one is already applied is rejected locally; remove it
    /// first. Gateway rejections (unknown, expired, below minimum
    /// order) come back verbatim.
    #[tracing::instrument(skip_all)]
    pub async fn apply_coupon(&self, code: &str) -> OpOutcome {
        if code.trim().is_empty() {
            return OpOutcome::rejected(EMPTY_CODE);
        }
        if self.lock_state().coupon.is_some() {
            return OpOutcome::rejected(COUPON_ALREADY_APPLIED);
        }
        let normalized = normalize_code(code);
        match self.client.coupon(&normalized).await {
            Ok(coupon) => {
                self.lock_state().coupon = Some(coupon);
                OpOutcome::ok()
            }
            Err(err) => OpOutcome::rejected(err.user_message()),
        }
    }

    /// Removes the applied coupon, if any.
    #[inline]
    pub fn remove_coupon(&self) {
        self.lock_state().coupon = None;
    }

    /// Runs the checkout sequence against a snapshot of the cart.
    ///
    /// Preconditions (address selected, cart non-empty) are checked
    /// locally; a violation fails fast with zero network calls. Order
    /// creation locks prices at the items' current prices; if the server
    /// rejects (e.g. stock exhausted since the cart view), the verbatim
    /// reason is returned and the flow halts. Payment creation references
    /// the new order and the post-discount total.
    ///
    /// On success the server empties the cart; callers should refresh
    /// their cart engine afterwards.
    #[tracing::instrument(skip_all)]
    pub async fn place_order(&self, cart: &Cart) -> CheckoutOutcome {
        let (address_id, coupon, payment_method, shipping_fee) = {
            let mut state = self.lock_state();
            if matches!(
                state.phase,
                CheckoutPhase::SubmittingOrder | CheckoutPhase::SubmittingPayment
            ) {
                return CheckoutOutcome::failed(CHECKOUT_IN_PROGRESS);
            }
            let Some(address_id) = state.selected_address else {
                return CheckoutOutcome::failed(NO_ADDRESS);
            };
            if cart.is_empty() {
                return CheckoutOutcome::failed(EMPTY_CART);
            }
            state.phase = CheckoutPhase::SubmittingOrder;
            (
                address_id,
                state.coupon.clone(),
                state.payment_method,
                state.shipping_fee,
            )
        };

        let request = CreateOrderRequest {
            shipping_address_id: address_id,
            coupon_id: coupon.as_ref().map(|applied| applied.id),
            payment_method,
            // Billing uses current price; the snapshot price is
            // informational only.
            items: cart
                .items
                .iter()
                .map(|item| OrderItem {
                    product_id: item.product_id,
                    variant_id: item.variant_id,
                    quantity: item.quantity,
                    price: item.current_price,
                })
                .collect(),
        };

        let order = match self.client.create_order(&request).await {
            Ok(order) => order,
            Err(err) => {
                self.lock_state().phase = CheckoutPhase::Failed;
                return CheckoutOutcome::failed(err.user_message());
            }
        };
        self.lock_state().phase = CheckoutPhase::OrderCreated;
        tracing::debug!(order_id = %order.uuid, "order created");

        let amount = compute_total(cart.total, coupon.as_ref(), shipping_fee);
        let payment_request = CreatePaymentRequest {
            order_id: order.uuid.clone(),
            provider: payment_method,
            amount,
        };
        self.lock_state().phase = CheckoutPhase::SubmittingPayment;
        match self.client.create_payment(&payment_request).await {
            Ok(payment) => {
                let mut state = self.lock_state();
                state.phase = if payment.redirect_url.is_some() {
                    CheckoutPhase::Redirecting
                } else {
                    CheckoutPhase::PaymentInitiated
                };
                CheckoutOutcome::completed(order.uuid, payment.redirect_url)
            }
            Err(err) => {
                // The order exists server-side in a pending state; the
                // server owns reconciliation of unpaid orders.
                self.lock_state().phase = CheckoutPhase::Failed;
                CheckoutOutcome::failed_with_order(err.user_message(), order.uuid)
            }
        }
    }

    /// Acquires the state lock, recovering from poisoning.
    fn lock_state(&self) -> MutexGuard<'_, CheckoutState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
