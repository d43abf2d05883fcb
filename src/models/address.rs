//! Shipping address models.

use serde::{Deserialize, Serialize};

use super::AddressId;

/// A saved shipping destination. Users keep many; at most one is flagged
/// as the default. Orders reference an address by id at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Address identifier.
    pub id: AddressId,
    /// Short user-facing label ("Home", "Office").
    pub label: String,
    /// Name of the person receiving the shipment.
    pub recipient_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Street address line.
    pub address_line: String,
    /// City name.
    pub city: String,
    /// Province or state name.
    pub province: String,
    /// Postal code.
    pub postal_code: String,
    /// Whether this is the user's default address.
    #[serde(default)]
    pub is_default: bool,
}

/// Request body for creating or updating an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAddress {
    /// Short user-facing label.
    pub label: String,
    /// Name of the person receiving the shipment.
    pub recipient_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Street address line.
    pub address_line: String,
    /// City name.
    pub city: String,
    /// Province or state name.
    pub province: String,
    /// Postal code.
    pub postal_code: String,
    /// Whether to flag this address as the default.
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_address() {
        let json = r#"{
            "id": 2,
            "label": "Home",
            "recipient_name": "Ayu Lestari",
            "phone": "+62812345678",
            "address_line": "Jl. Merdeka 10",
            "city": "Bandung",
            "province": "Jawa Barat",
            "postal_code": "40111",
            "is_default": true
        }"#;
        let address: Address = serde_json::from_str(json).unwrap();
        assert_eq!(address.id, AddressId::new(2));
        assert!(address.is_default);
    }

    #[test]
    fn missing_default_flag_is_false() {
        let json = r#"{
            "id": 3,
            "label": "Office",
            "recipient_name": "Ayu Lestari",
            "phone": "+62812345678",
            "address_line": "Jl. Asia Afrika 1",
            "city": "Bandung",
            "province": "Jawa Barat",
            "postal_code": "40112"
        }"#;
        let address: Address = serde_json::from_str(json).unwrap();
        assert!(!address.is_default);
    }
}
