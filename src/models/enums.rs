//! Enumeration types for constrained API values.

use serde::{Deserialize, Serialize};

/// How a coupon's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `value` is a percentage of the order subtotal (0-100).
    Percentage,
    /// `value` is an absolute amount in minor currency units.
    Fixed,
}

/// Lifecycle state of an order. Owned entirely by the server; the client
/// only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, awaiting payment.
    Pending,
    /// Payment settled.
    Paid,
    /// Being prepared by the seller.
    Processing,
    /// Handed to the shipment provider.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before fulfilment.
    Cancelled,
}

/// Payment method selected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Manual bank transfer.
    BankTransfer,
    /// Electronic wallet provider.
    Ewallet,
    /// Credit or debit card.
    CreditCard,
}

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Initiated, awaiting settlement.
    Pending,
    /// Settled successfully.
    Paid,
    /// Rejected or errored at the provider.
    Failed,
    /// Abandoned past the provider's deadline.
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_type_serde_roundtrip() {
        let variants = [
            (DiscountType::Percentage, r#""percentage""#),
            (DiscountType::Fixed, r#""fixed""#),
        ];
        for (variant, expected_json) in variants {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, expected_json);
            let deserialized: DiscountType = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }

    #[test]
    fn order_status_serde_roundtrip() {
        let variants = [
            (OrderStatus::Pending, r#""pending""#),
            (OrderStatus::Paid, r#""paid""#),
            (OrderStatus::Processing, r#""processing""#),
            (OrderStatus::Shipped, r#""shipped""#),
            (OrderStatus::Delivered, r#""delivered""#),
            (OrderStatus::Cancelled, r#""cancelled""#),
        ];
        for (variant, expected_json) in variants {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, expected_json);
            let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }

    #[test]
    fn payment_method_bank_transfer_wire_name() {
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, r#""bank_transfer""#);
        let deserialized: PaymentMethod = serde_json::from_str(r#""bank_transfer""#).unwrap();
        assert_eq!(deserialized, PaymentMethod::BankTransfer);
    }

    #[test]
    fn invalid_discount_type_fails() {
        let result = serde_json::from_str::<DiscountType>(r#""bogus""#);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_order_status_fails() {
        let result = serde_json::from_str::<OrderStatus>(r#""teleported""#);
        assert!(result.is_err());
    }
}
