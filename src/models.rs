//! Data models for storefront API entities.
//!
//! This module contains strongly-typed representations of the entities
//! the gateway exchanges, newtype ID wrappers, and enumeration types for
//! constrained values. All monetary amounts are integers in the smallest
//! currency unit; formatting is a display-layer concern.

mod address;
mod cart;
mod coupon;
mod enums;
mod envelope;
mod ids;
mod order;
mod payment;
mod product;
mod user;
mod wishlist;

pub use address::{Address, NewAddress};
pub use cart::{AddItemRequest, Cart, CartItem};
pub use coupon::Coupon;
pub use enums::{DiscountType, OrderStatus, PaymentMethod, PaymentStatus};
pub use envelope::{Envelope, Pagination};
pub use ids::{
    AddressId, CartItemId, CouponId, OrderId, PaymentId, ProductId, UserId, VariantId,
    WishlistItemId,
};
pub use order::{CreateOrderRequest, Order, OrderItem, OrderListQuery, OrderPage};
pub use payment::{CreatePaymentRequest, Payment};
pub use product::ProductSummary;
pub use user::{RoleField, User};
pub use wishlist::WishlistItem;
