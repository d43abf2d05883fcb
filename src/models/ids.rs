//! Newtype wrappers for entity identifiers.
//!
//! These prevent accidentally mixing up IDs of different entity types
//! at compile time.

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapping a `Copy` inner type.
macro_rules! define_copy_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Creates a new identifier from the given value.
            #[inline]
            #[must_use]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Returns a reference to the inner value.
            #[inline]
            #[must_use]
            pub const fn as_inner(&self) -> &$inner {
                &self.0
            }

            /// Consumes the wrapper and returns the inner value.
            #[inline]
            #[must_use]
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

/// Macro to define a newtype ID wrapping a `String` inner type.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from the given string.
            #[inline]
            #[must_use]
            pub const fn new(value: String) -> Self {
                Self(value)
            }

            /// Returns a reference to the inner string.
            #[inline]
            #[must_use]
            pub fn as_inner(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner string.
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_copy_id! {
    /// Unique identifier for a user.
    UserId(i64)
}

define_copy_id! {
    /// Unique identifier for a product.
    ProductId(i64)
}

define_copy_id! {
    /// Unique identifier for a product variant.
    VariantId(i64)
}

define_copy_id! {
    /// Unique identifier for a cart line item (unique within the cart).
    CartItemId(i64)
}

define_copy_id! {
    /// Unique identifier for a coupon.
    CouponId(i64)
}

define_copy_id! {
    /// Unique identifier for a shipping address.
    AddressId(i64)
}

define_copy_id! {
    /// Unique identifier for a payment.
    PaymentId(i64)
}

define_copy_id! {
    /// Unique identifier for a wishlist entry.
    WishlistItemId(i64)
}

define_string_id! {
    /// Unique identifier for an order (UUID string).
    OrderId
}
