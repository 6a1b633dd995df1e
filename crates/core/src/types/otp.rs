//! One-time passcode request types.

use serde::{Deserialize, Serialize};

/// Why an OTP is being requested.
///
/// The purpose decides the endpoint, whether a phone number is mandatory, and
/// the idle label of the trigger button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpPurpose {
    /// New account registration (email + phone).
    Register,
    /// Password reset (email only).
    Reset,
}

impl OtpPurpose {
    /// Read the purpose from a trigger's `data-purpose` attribute.
    ///
    /// Only the exact value `register` selects registration; anything else,
    /// including a missing attribute, is a reset request.
    #[must_use]
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("register") => Self::Register,
            _ => Self::Reset,
        }
    }

    /// Endpoint the request is posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Register => "/send_register_otp",
            Self::Reset => "/send_reset_otp",
        }
    }

    /// Whether the request is rejected client-side without a phone number.
    #[must_use]
    pub const fn requires_phone(&self) -> bool {
        matches!(self, Self::Register)
    }

    /// Label the trigger button shows when idle.
    #[must_use]
    pub const fn idle_label(&self) -> &'static str {
        match self {
            Self::Register => "Send OTP",
            Self::Reset => "Send Reset OTP",
        }
    }
}

/// JSON body posted to the OTP endpoints.
///
/// `phone` is sent even for resets; the server ignores it there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRequest {
    pub email: String,
    pub phone: String,
}

/// JSON reply from the OTP endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_from_attribute() {
        assert_eq!(
            OtpPurpose::from_attribute(Some("register")),
            OtpPurpose::Register
        );
        assert_eq!(OtpPurpose::from_attribute(Some("reset")), OtpPurpose::Reset);
        assert_eq!(
            OtpPurpose::from_attribute(Some("Register")),
            OtpPurpose::Reset
        );
        assert_eq!(OtpPurpose::from_attribute(None), OtpPurpose::Reset);
    }

    #[test]
    fn test_purpose_routing() {
        assert_eq!(OtpPurpose::Register.endpoint(), "/send_register_otp");
        assert_eq!(OtpPurpose::Reset.endpoint(), "/send_reset_otp");
        assert!(OtpPurpose::Register.requires_phone());
        assert!(!OtpPurpose::Reset.requires_phone());
        assert_eq!(OtpPurpose::Register.idle_label(), "Send OTP");
        assert_eq!(OtpPurpose::Reset.idle_label(), "Send Reset OTP");
    }

    #[test]
    fn test_response_without_message() {
        let response: OtpResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.message, None);
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(OtpRequest {
            email: "user@example.com".to_string(),
            phone: "+91 9876543210".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"email": "user@example.com", "phone": "+91 9876543210"})
        );
    }
}
