//! Checkout sequencing against a mocked gateway: preconditions, the
//! order-then-payment happy path, coupon pricing, and failure isolation
//! between the two submission steps.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_rs::checkout::{Checkout, CheckoutPhase};
use storefront_rs::client::StorefrontClient;
use storefront_rs::models::{AddressId, Cart, CartItem, CartItemId, PaymentMethod, ProductId};

/// Builds a checkout session pointed at the mock server.
fn checkout_for(server: &MockServer) -> Checkout {
    let client = Arc::new(
        StorefrontClient::builder()
            .token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap(),
    );
    Checkout::new(client)
}

/// Success envelope wrapping the given data payload.
fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "data": data, "message": null })
}

/// A one-line cart with the given server-computed total.
fn cart_with_total(total: i64) -> Cart {
    Cart {
        items: vec![CartItem {
            id: CartItemId::new(1),
            product_id: ProductId::new(42),
            variant_id: None,
            quantity: 1,
            price_snapshot: total,
            current_price: total,
            product: None,
        }],
        total,
    }
}

/// A pending order as the gateway returns it from `POST /orders`.
fn order_body(uuid: &str, total: i64) -> serde_json::Value {
    json!({
        "uuid": uuid,
        "status": "pending",
        "total": total,
        "items": [],
        "coupon_id": null,
        "shipping_address_id": 1,
        "created_at": "2026-08-01T10:00:00Z"
    })
}

#[tokio::test]
async fn precondition_failures_make_no_network_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let checkout = checkout_for(&server);

    // No address selected.
    let outcome = checkout.place_order(&cart_with_total(150_000)).await;
    assert!(!outcome.success);
    assert_eq!(
        outcome.message.as_deref(),
        Some("Please select a shipping address")
    );

    // Address selected but the cart is empty.
    checkout.select_address(AddressId::new(1));
    let empty = Cart {
        items: vec![],
        total: 0,
    };
    let outcome = checkout.place_order(&empty).await;
    assert!(!outcome.success);
    assert_eq!(outcome.message.as_deref(), Some("Your cart is empty"));
    assert_eq!(checkout.phase(), CheckoutPhase::CollectingInputs);
}

#[tokio::test]
async fn order_then_payment_with_redirect() {
    let server = MockServer::start().await;
    let uuid = Uuid::new_v4().to_string();
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_partial_json(json!({
            "shipping_address_id": 1,
            "payment_method": "ewallet"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(order_body(&uuid, 150_000))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(body_partial_json(json!({
            "order_id": &uuid,
            "amount": 150_000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 9,
            "order_id": &uuid,
            "provider": "ewallet",
            "amount": 150_000,
            "status": "pending",
            "redirect_url": "https://pay.example/session/abc"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let checkout = checkout_for(&server);
    checkout.select_address(AddressId::new(1));
    checkout.set_payment_method(PaymentMethod::Ewallet);

    let outcome = checkout.place_order(&cart_with_total(150_000)).await;

    assert!(outcome.success);
    assert!(outcome.order_id.is_some());
    assert_eq!(
        outcome.redirect_url.as_deref(),
        Some("https://pay.example/session/abc")
    );
    assert_eq!(checkout.phase(), CheckoutPhase::Redirecting);
}

#[tokio::test]
async fn coupon_discounts_the_charged_amount() {
    let server = MockServer::start().await;
    let uuid = Uuid::new_v4().to_string();
    // The lookup must arrive trimmed and uppercased.
    Mock::given(method("GET"))
        .and(path("/coupons/SAVE10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 3,
            "code": "SAVE10",
            "discount_type": "percentage",
            "value": 10
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_partial_json(json!({ "coupon_id": 3 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(order_body(&uuid, 135_000))),
        )
        .expect(1)
        .mount(&server)
        .await;
    // 150 000 minus 10 percent.
    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(body_partial_json(json!({ "amount": 135_000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": 10,
            "order_id": &uuid,
            "provider": "bank_transfer",
            "amount": 135_000,
            "status": "pending"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let checkout = checkout_for(&server);
    checkout.select_address(AddressId::new(1));
    let applied = checkout.apply_coupon("  save10 ").await;
    assert!(applied.success);

    let outcome = checkout.place_order(&cart_with_total(150_000)).await;

    assert!(outcome.success);
    // No redirect from the provider: the flow ends on the detail view.
    assert!(outcome.redirect_url.is_none());
    assert_eq!(checkout.phase(), CheckoutPhase::PaymentInitiated);
}

#[tokio::test]
async fn payment_failure_keeps_the_created_order() {
    let server = MockServer::start().await;
    let uuid = Uuid::new_v4().to_string();
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(order_body(&uuid, 150_000))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({
            "success": false,
            "data": null,
            "message": "payment provider unavailable"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let checkout = checkout_for(&server);
    checkout.select_address(AddressId::new(1));

    let outcome = checkout.place_order(&cart_with_total(150_000)).await;

    assert!(!outcome.success);
    assert_eq!(
        outcome.message.as_deref(),
        Some("payment provider unavailable")
    );
    // The order exists server-side; its id travels with the failure so
    // the user can resume from order history.
    assert_eq!(
        outcome.order_id.as_ref().map(ToString::to_string),
        Some(uuid)
    );
    assert_eq!(checkout.phase(), CheckoutPhase::Failed);
}

#[tokio::test]
async fn stock_race_halts_before_payment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "data": null,
            "message": "insufficient stock for product 42"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let checkout = checkout_for(&server);
    checkout.select_address(AddressId::new(1));

    let outcome = checkout.place_order(&cart_with_total(150_000)).await;

    assert!(!outcome.success);
    assert_eq!(
        outcome.message.as_deref(),
        Some("insufficient stock for product 42")
    );
    assert!(outcome.order_id.is_none());
    assert_eq!(checkout.phase(), CheckoutPhase::Failed);
}

#[tokio::test]
async fn load_addresses_selects_the_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {
                "id": 1,
                "label": "Office",
                "recipient_name": "Ayu Lestari",
                "phone": "+62812345678",
                "address_line": "Jl. Asia Afrika 1",
                "city": "Bandung",
                "province": "Jawa Barat",
                "postal_code": "40112"
            },
            {
                "id": 2,
                "label": "Home",
                "recipient_name": "Ayu Lestari",
                "phone": "+62812345678",
                "address_line": "Jl. Merdeka 10",
                "city": "Bandung",
                "province": "Jawa Barat",
                "postal_code": "40111",
                "is_default": true
            }
        ]))))
        .mount(&server)
        .await;

    let checkout = checkout_for(&server);
    let outcome = checkout.load_addresses().await;

    assert!(outcome.success);
    assert_eq!(checkout.selected_address(), Some(AddressId::new(2)));
    assert_eq!(checkout.addresses().len(), 2);
}

#[tokio::test]
async fn load_addresses_falls_back_to_the_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {
                "id": 5,
                "label": "Office",
                "recipient_name": "Ayu Lestari",
                "phone": "+62812345678",
                "address_line": "Jl. Asia Afrika 1",
                "city": "Bandung",
                "province": "Jawa Barat",
                "postal_code": "40112"
            }
        ]))))
        .mount(&server)
        .await;

    let checkout = checkout_for(&server);
    let outcome = checkout.load_addresses().await;

    assert!(outcome.success);
    assert_eq!(checkout.selected_address(), Some(AddressId::new(5)));
}
