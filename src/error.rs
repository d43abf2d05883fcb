//! Error types for the storefront client library.

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, StorefrontError>;

/// Fallback text shown when no better message is available.
const GENERIC_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Text shown for connectivity failures where no response arrived.
const NETWORK_MESSAGE: &str = "Could not reach the server. Check your connection and try again.";

/// All errors that can occur when using the storefront client.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// HTTP transport failed (connection refused, timeout, no response).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The gateway returned an error status or declined the request.
    ///
    /// `message` carries the server's reason verbatim so callers can show
    /// it to the user unchanged (e.g. "insufficient stock").
    #[error("gateway error ({status}): {message}")]
    Gateway {
        /// HTTP status code of the response.
        status: u16,
        /// Server-provided failure reason.
        message: String,
    },

    /// A local precondition failed before any network call was made.
    #[error("validation error: {0}")]
    Validation(String),

    /// No access token was configured on the client builder.
    #[error("access token is required but was not provided")]
    MissingToken,
}

impl StorefrontError {
    /// Returns `true` if this error means the server was never reached.
    #[inline]
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Returns a message suitable for direct display to the user.
    ///
    /// Gateway and validation messages pass through verbatim; transport
    /// failures map to a generic connectivity message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Gateway { message, .. } => message.clone(),
            Self::Validation(message) => message.clone(),
            Self::Http(_) => NETWORK_MESSAGE.to_owned(),
            Self::Serialization(_) | Self::MissingToken => GENERIC_MESSAGE.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = StorefrontError::from(serde_err);
        assert!(matches!(err, StorefrontError::Serialization(_)));
        assert!(err.to_string().contains("serialization error"));
    }

    #[test]
    fn gateway_message_passes_through_verbatim() {
        let err = StorefrontError::Gateway {
            status: 400,
            message: "insufficient stock".to_owned(),
        };
        assert_eq!(err.user_message(), "insufficient stock");
        assert!(!err.is_network());
    }

    #[test]
    fn validation_message_passes_through() {
        let err = StorefrontError::Validation("quantity must be at least 1".to_owned());
        assert_eq!(err.user_message(), "quantity must be at least 1");
    }

    #[test]
    fn missing_token_display() {
        let err = StorefrontError::MissingToken;
        assert!(err.to_string().contains("access token"));
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorefrontError>();
    }
}
