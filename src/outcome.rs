//! Uniform result shape for user-facing operations.
//!
//! Cart, wishlist, and checkout operations never propagate errors past
//! their own boundary. Instead they return an [`OpOutcome`] the UI can
//! branch on, with any failure reason already formatted for display.

/// Result of a user-facing mutation: success flag plus optional message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpOutcome {
    /// Whether the operation completed successfully.
    pub success: bool,
    /// Display-ready failure reason; `None` on success.
    pub message: Option<String>,
}

impl OpOutcome {
    /// Creates a successful outcome.
    #[inline]
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Creates a failed outcome carrying a display-ready message.
    #[inline]
    #[must_use]
    pub fn rejected<T: Into<String>>(message: T) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}
