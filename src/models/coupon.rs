//! Coupon model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CouponId, DiscountType};

/// A named discount rule with usage, expiry, and minimum-order constraints.
///
/// Applicability (minimum order, usage cap, expiry) is enforced by the
/// gateway at validation time; the client only carries the fields for
/// display and for the discount arithmetic in [`crate::discount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Coupon identifier.
    pub id: CouponId,
    /// Unique code, normalized to uppercase.
    pub code: String,
    /// How `value` is interpreted.
    pub discount_type: DiscountType,
    /// Percentage (0-100) or fixed amount in minor currency units,
    /// depending on `discount_type`.
    pub value: i64,
    /// Minimum order subtotal required to apply, if any.
    #[serde(default)]
    pub min_order: Option<i64>,
    /// Maximum number of redemptions allowed, if capped.
    #[serde(default)]
    pub max_usage: Option<u32>,
    /// Redemptions so far.
    #[serde(default)]
    pub current_usage: u32,
    /// Expiry instant, if the coupon expires.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_percentage_coupon() {
        let json = r#"{
            "id": 3,
            "code": "SAVE10",
            "discount_type": "percentage",
            "value": 10,
            "min_order": 100000,
            "max_usage": 50,
            "current_usage": 12,
            "expires_at": "2026-12-31T23:59:59Z"
        }"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.code, "SAVE10");
        assert_eq!(coupon.discount_type, DiscountType::Percentage);
        assert_eq!(coupon.min_order, Some(100_000));
        assert!(coupon.expires_at.is_some());
    }

    #[test]
    fn deserialize_minimal_fixed_coupon() {
        let json = r#"{"id": 4, "code": "FLAT5K", "discount_type": "fixed", "value": 5000}"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.discount_type, DiscountType::Fixed);
        assert!(coupon.min_order.is_none());
        assert_eq!(coupon.current_usage, 0);
    }
}
