//! Unified error handling for page behaviors.
//!
//! Every failure a behavior can hit falls into one of four buckets:
//! client-side validation, a server-reported failure, a transport failure, or
//! a missing optional element. Only the first three are errors; the last is
//! modelled as `Option` at the capability checks and never reaches this type.

use thiserror::Error;

/// Generic alert shown when an OTP could not be requested.
pub const OTP_FAILED_MESSAGE: &str = "Failed to send OTP. Please try again.";

/// Alert shown when a quantity form submission fails.
pub const QUANTITY_FAILED_MESSAGE: &str = "Failed to update quantity. Please try again.";

/// Alert shown when removing a cart line fails.
pub const REMOVE_FAILED_MESSAGE: &str = "Failed to remove item. Please try again.";

/// Alert shown when moving a cart line to the wishlist fails.
pub const MOVE_FAILED_MESSAGE: &str = "Failed to move item to wishlist. Please try again.";

/// Client-side validation failures. Displaying one yields the exact alert text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter email address!")]
    MissingEmail,

    #[error("Please enter phone number!")]
    MissingPhone,
}

/// Error type for storefront requests and behaviors.
#[derive(Debug, Error)]
pub enum UiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest client.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status.
    #[error("Unexpected status: {status}")]
    Status { status: u16 },

    /// Response body was not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Endpoint could not be resolved against the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Input rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl UiError {
    /// Whether the request never produced a usable response.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Transport(_) | Self::Decode(_) | Self::InvalidUrl(_)
        )
    }
}

/// Result type alias for `UiError`.
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_alert_text() {
        assert_eq!(
            ValidationError::MissingEmail.to_string(),
            "Please enter email address!"
        );
        assert_eq!(
            ValidationError::MissingPhone.to_string(),
            "Please enter phone number!"
        );
        assert_eq!(
            UiError::from(ValidationError::MissingPhone).to_string(),
            "Please enter phone number!"
        );
    }

    #[test]
    fn test_transport_classification() {
        assert!(UiError::Transport("connection reset".to_string()).is_transport());
        assert!(!UiError::Status { status: 500 }.is_transport());
        assert!(!UiError::from(ValidationError::MissingEmail).is_transport());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            UiError::Status { status: 404 }.to_string(),
            "Unexpected status: 404"
        );
    }
}
