//! Error types for the session layer.

use hotelgenie_protocol::ProtocolError;
use hotelgenie_transport::TransportError;

use crate::FormError;

/// Errors that can occur during session management.
///
/// Most of these never reach a caller: the controller turns storage and
/// validation failures into a logout. The ones that do escape come from
/// the explicit sign-in and registration flows, and carry a
/// [`user_message`](Self::user_message) suitable for showing under a form.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading or writing the persisted session failed.
    #[error("token store unavailable: {0}")]
    Storage(#[source] std::io::Error),

    /// The persisted session exists but can't be parsed.
    #[error("token store is corrupt: {0}")]
    StoreFormat(#[source] ProtocolError),

    /// The backend refused the credential, or couldn't be reached.
    #[error("session validation failed: {0}")]
    Validation(#[source] TransportError),

    /// The validation round-trip exceeded the configured timeout.
    #[error("session validation timed out")]
    ValidationTimeout,

    /// The backend answered with a role label we don't know.
    #[error("unexpected role from backend: {0}")]
    UnexpectedRole(#[source] ProtocolError),

    /// Client-side form validation failed; nothing was sent.
    #[error(transparent)]
    InvalidForm(#[from] FormError),

    /// The backend refused the email/password pair.
    #[error("invalid email or password")]
    LoginRejected,

    /// The login request didn't produce a usable answer.
    #[error("login request failed: {0}")]
    LoginFailed(#[source] TransportError),

    /// The backend refused the registration, optionally saying why.
    #[error("registration rejected: {}", message.as_deref().unwrap_or("no reason given"))]
    RegistrationRejected { message: Option<String> },

    /// The registration request didn't produce an answer.
    #[error("registration request failed: {0}")]
    RegistrationFailed(#[source] TransportError),
}

impl SessionError {
    /// Text to show the user. Never includes transport details.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidForm(form) => form.to_string(),
            Self::LoginRejected => "Invalid email or password.".to_string(),
            Self::LoginFailed(_) | Self::UnexpectedRole(_) => {
                "An error occurred during login. Please try again.".to_string()
            }
            Self::RegistrationRejected { message } => message
                .clone()
                .unwrap_or_else(|| "Registration failed.".to_string()),
            Self::RegistrationFailed(_) => {
                "An error occurred during registration. Please try again.".to_string()
            }
            Self::Storage(_)
            | Self::StoreFormat(_)
            | Self::Validation(_)
            | Self::ValidationTimeout => "An unexpected error occurred.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_login_rejected() {
        assert_eq!(
            SessionError::LoginRejected.user_message(),
            "Invalid email or password."
        );
    }

    #[test]
    fn test_user_message_form_error_passes_through() {
        let err = SessionError::from(FormError::PasswordTooShort);
        assert_eq!(
            err.user_message(),
            "Password must be at least 6 characters long."
        );
    }

    #[test]
    fn test_user_message_registration_prefers_server_text() {
        let with = SessionError::RegistrationRejected {
            message: Some("Email already registered".into()),
        };
        let without = SessionError::RegistrationRejected { message: None };
        assert_eq!(with.user_message(), "Email already registered");
        assert_eq!(without.user_message(), "Registration failed.");
    }

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = SessionError::LoginFailed(TransportError::Timeout);
        assert!(!err.user_message().contains("timed out"));
    }
}
