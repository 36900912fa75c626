//! Unified error type for HotelGenie.

use hotelgenie_protocol::ProtocolError;
use hotelgenie_session::SessionError;
use hotelgenie_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HotelGenieError {
    /// Talking to the backend failed (unreachable, rejected, bad body).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Wire vocabulary errors (unknown role or route, malformed token).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Session errors (storage, forms, sign-in and registration).
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl HotelGenieError {
    /// Text fit to show the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Session(e) => e.user_message(),
            _ => "An unexpected error occurred.".to_string(),
        }
    }
}
