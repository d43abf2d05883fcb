//! Rust client library for a storefront REST API.
//!
//! This crate provides a typed async client for a storefront backend
//! (products, cart, coupons, orders, payments) together with the stateful
//! pieces a frontend needs on top of the raw endpoints: a cart engine that
//! keeps its local snapshot reconciled with the server, a pure discount
//! evaluator, and a checkout orchestrator that sequences order and payment
//! creation.

pub mod cart;
pub mod checkout;
pub mod client;
pub mod discount;
pub mod error;
pub mod models;
pub mod outcome;
pub mod session;
pub mod wishlist;
