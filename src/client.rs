//! HTTP client for the storefront gateway.
//!
//! One method per consumed endpoint. Every response arrives in the
//! `{success, data, message}` envelope; the client unwraps it and turns
//! declined envelopes and error statuses into
//! [`StorefrontError::Gateway`] carrying the server message verbatim.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{Result, StorefrontError};
use crate::models::{
    AddItemRequest, Address, AddressId, Cart, CartItemId, Coupon, CreateOrderRequest,
    CreatePaymentRequest, Envelope, NewAddress, Order, OrderId, OrderListQuery, OrderPage,
    Payment, PaymentId, ProductId, WishlistItem,
};

/// Base URL for the storefront gateway.
const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Cart endpoint path.
const CART_PATH: &str = "/cart";

/// Coupons endpoint path.
const COUPONS_PATH: &str = "/coupons";

/// Orders endpoint path.
const ORDERS_PATH: &str = "/orders";

/// Payments endpoint path.
const PAYMENTS_PATH: &str = "/payments";

/// Addresses endpoint path.
const ADDRESSES_PATH: &str = "/addresses";

/// Wishlist endpoint path.
const WISHLIST_PATH: &str = "/wishlist";

/// Builder for constructing a [`StorefrontClient`].
#[derive(Debug)]
pub struct StorefrontClientBuilder {
    /// Access token for API authentication.
    token: Option<SecretString>,
    /// Base URL override (for testing).
    base_url: Option<String>,
}

impl StorefrontClientBuilder {
    /// Sets the bearer access token attached to every request.
    #[inline]
    #[must_use]
    pub fn token<T: Into<String>>(mut self, token: T) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Overrides the base URL (useful for testing with a mock server).
    #[inline]
    #[must_use]
    pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::MissingToken`] if no token was provided.
    /// Returns [`StorefrontError::Http`] if the HTTP client fails to build.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub fn build(self) -> Result<StorefrontClient> {
        let token = self.token.ok_or(StorefrontError::MissingToken)?;
        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        tracing::debug!(base_url = %base_url, "building client");
        let http = reqwest::Client::builder().build()?;

        Ok(StorefrontClient {
            http,
            token,
            base_url,
        })
    }
}

/// Async client for the storefront gateway.
///
/// Use [`StorefrontClient::builder()`] to construct an instance.
#[derive(Debug)]
pub struct StorefrontClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Bearer access token.
    token: SecretString,
    /// API base URL.
    base_url: String,
}

impl StorefrontClient {
    /// Creates a new builder for configuring the client.
    #[inline]
    #[must_use]
    pub const fn builder() -> StorefrontClientBuilder {
        StorefrontClientBuilder {
            token: None,
            base_url: None,
        }
    }

    // ── Cart ────────────────────────────────────────────────────────

    /// Fetches the current user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the gateway declines,
    /// or the response cannot be deserialized.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub async fn cart(&self) -> Result<Cart> {
        self.get_data(CART_PATH).await
    }

    /// Adds an item to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Gateway`] with the server's reason
    /// (e.g. insufficient stock) if the add is rejected.
    #[inline]
    #[tracing::instrument(skip_all, fields(product_id = %request.product_id))]
    pub async fn add_cart_item(&self, request: &AddItemRequest) -> Result<()> {
        let url = format!("{}{CART_PATH}", self.base_url);
        self.execute(self.http.post(&url).json(request)).await
    }

    /// Updates the quantity of one cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all, fields(item_id = %item_id))]
    pub async fn update_cart_item(&self, item_id: CartItemId, quantity: u32) -> Result<()> {
        let url = format!("{}{CART_PATH}/{item_id}", self.base_url);
        let body = serde_json::json!({ "quantity": quantity });
        self.execute(self.http.put(&url).json(&body)).await
    }

    /// Removes one line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all, fields(item_id = %item_id))]
    pub async fn remove_cart_item(&self, item_id: CartItemId) -> Result<()> {
        let url = format!("{}{CART_PATH}/{item_id}", self.base_url);
        self.execute(self.http.delete(&url)).await
    }

    /// Empties the cart without destroying it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub async fn clear_cart(&self) -> Result<()> {
        let url = format!("{}{CART_PATH}", self.base_url);
        self.execute(self.http.delete(&url)).await
    }

    // ── Coupons ─────────────────────────────────────────────────────

    /// Validates a coupon code and fetches its descriptor.
    ///
    /// The gateway enforces expiry, usage cap, and minimum order; an
    /// inapplicable code comes back as [`StorefrontError::Gateway`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the code is invalid.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub async fn coupon(&self, code: &str) -> Result<Coupon> {
        let path = format!("{COUPONS_PATH}/{code}");
        self.get_data(&path).await
    }

    // ── Orders ──────────────────────────────────────────────────────

    /// Creates an order from a cart snapshot. Prices lock at this point.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Gateway`] with the server's reason if
    /// the order is rejected (e.g. stock exhausted since the cart view).
    #[inline]
    #[tracing::instrument(skip_all)]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order> {
        let url = format!("{}{ORDERS_PATH}", self.base_url);
        self.request_data(self.http.post(&url).json(request)).await
    }

    /// Fetches one page of the user's order history.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[tracing::instrument(skip_all)]
    pub async fn orders(&self, query: &OrderListQuery) -> Result<OrderPage> {
        let url = format!("{}{ORDERS_PATH}", self.base_url);
        let envelope: Envelope<Vec<Order>> = self
            .send(self.http.get(&url).query(&query.to_pairs()))
            .await?;
        Ok(OrderPage {
            orders: envelope.data.unwrap_or_default(),
            pagination: envelope.pagination,
        })
    }

    /// Fetches one order by UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all, fields(order_id = %order_id))]
    pub async fn order(&self, order_id: &OrderId) -> Result<Order> {
        let path = format!("{ORDERS_PATH}/{order_id}");
        self.get_data(&path).await
    }

    // ── Payments ────────────────────────────────────────────────────

    /// Creates a payment for an existing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all, fields(order_id = %request.order_id))]
    pub async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Payment> {
        let url = format!("{}{PAYMENTS_PATH}", self.base_url);
        self.request_data(self.http.post(&url).json(request)).await
    }

    /// Fetches one payment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all, fields(payment_id = %payment_id))]
    pub async fn payment(&self, payment_id: PaymentId) -> Result<Payment> {
        let path = format!("{PAYMENTS_PATH}/{payment_id}");
        self.get_data(&path).await
    }

    // ── Addresses ───────────────────────────────────────────────────

    /// Fetches all saved addresses for the current user.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub async fn addresses(&self) -> Result<Vec<Address>> {
        self.get_data(ADDRESSES_PATH).await
    }

    /// Creates a new address.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub async fn create_address(&self, address: &NewAddress) -> Result<Address> {
        let url = format!("{}{ADDRESSES_PATH}", self.base_url);
        self.request_data(self.http.post(&url).json(address)).await
    }

    /// Updates an existing address.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all, fields(address_id = %address_id))]
    pub async fn update_address(&self, address_id: AddressId, address: &NewAddress) -> Result<Address> {
        let url = format!("{}{ADDRESSES_PATH}/{address_id}", self.base_url);
        self.request_data(self.http.put(&url).json(address)).await
    }

    /// Deletes an address.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all, fields(address_id = %address_id))]
    pub async fn delete_address(&self, address_id: AddressId) -> Result<()> {
        let url = format!("{}{ADDRESSES_PATH}/{address_id}", self.base_url);
        self.execute(self.http.delete(&url)).await
    }

    // ── Wishlist ────────────────────────────────────────────────────

    /// Fetches the current user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all)]
    pub async fn wishlist(&self) -> Result<Vec<WishlistItem>> {
        self.get_data(WISHLIST_PATH).await
    }

    /// Adds a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_wishlist_item(&self, product_id: ProductId) -> Result<()> {
        let url = format!("{}{WISHLIST_PATH}", self.base_url);
        let body = serde_json::json!({ "product_id": product_id });
        self.execute(self.http.post(&url).json(&body)).await
    }

    /// Removes a product from the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the gateway declines.
    #[inline]
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_wishlist_item(&self, product_id: ProductId) -> Result<()> {
        let url = format!("{}{WISHLIST_PATH}/{product_id}", self.base_url);
        self.execute(self.http.delete(&url)).await
    }

    // ── Internals ───────────────────────────────────────────────────

    /// Sends a GET request for the given path and unwraps the data field.
    async fn get_data<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        self.request_data(self.http.get(&url)).await
    }

    /// Sends a request and unwraps the envelope's data field, failing if
    /// the gateway returned no payload.
    async fn request_data<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let envelope = self.send(request).await?;
        envelope.data.ok_or_else(|| StorefrontError::Gateway {
            status: 200,
            message: "response body missing data".to_owned(),
        })
    }

    /// Sends a request where only the acknowledgement matters.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<()> {
        let _envelope: Envelope<serde_json::Value> = self.send(request).await?;
        Ok(())
    }

    /// Sends an authenticated request and parses the response envelope.
    ///
    /// Error statuses and declined envelopes (`success: false`) become
    /// [`StorefrontError::Gateway`] with the server message verbatim.
    #[tracing::instrument(skip_all)]
    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>> {
        let response = request
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");
        let body = response.text().await?;
        if !status.is_success() {
            // Prefer the envelope message; fall back to the raw body.
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or(body);
            tracing::debug!(status = status.as_u16(), message = %message, "gateway error");
            return Err(StorefrontError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        tracing::trace!(body_len = body.len(), "parsing response body");
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "request rejected".to_owned());
            return Err(StorefrontError::Gateway {
                status: status.as_u16(),
                message,
            });
        }
        Ok(envelope)
    }
}
