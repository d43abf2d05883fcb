//! Pure discount arithmetic for applied coupons.
//!
//! Validation (existence, expiry, usage cap, minimum order) is a gateway
//! round trip; these functions only do the arithmetic once a [`Coupon`]
//! is in hand. All amounts are integers in minor currency units.

use crate::models::{Coupon, DiscountType};

/// Normalizes a coupon code the way the gateway stores them: trimmed and
/// uppercased.
#[inline]
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Computes the discount a coupon grants on the given subtotal.
///
/// A percentage coupon takes `value` percent of the subtotal; a fixed
/// coupon takes `value` outright. The result is clamped to
/// `[0, subtotal]` so a discount can never exceed the order subtotal.
#[must_use]
#[allow(
    clippy::integer_division,
    reason = "percentage discounts round down to whole minor units, matching the gateway"
)]
pub fn compute_discount(subtotal: i64, coupon: &Coupon) -> i64 {
    let raw = match coupon.discount_type {
        DiscountType::Percentage => subtotal.saturating_mul(coupon.value) / 100,
        DiscountType::Fixed => coupon.value,
    };
    raw.clamp(0, subtotal.max(0))
}

/// Computes the payable total: subtotal minus discount, floored at zero,
/// plus shipping.
#[must_use]
pub fn compute_total(subtotal: i64, coupon: Option<&Coupon>, shipping: i64) -> i64 {
    let discount = coupon.map_or(0, |applied| compute_discount(subtotal, applied));
    subtotal.saturating_sub(discount).max(0).saturating_add(shipping)
}
