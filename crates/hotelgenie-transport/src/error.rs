use hotelgenie_protocol::ProtocolError;

/// Errors that can occur talking to the REST backend.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The backend answered with a non-2xx status.
    ///
    /// `message` carries the `message` field of the error body when the
    /// backend sent one.
    #[error("backend rejected request with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The request never produced a response (DNS, connect, TLS, reset).
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The request took longer than the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// A 2xx response whose body didn't have the expected shape.
    #[error("malformed response body: {0}")]
    MalformedBody(#[source] ProtocolError),
}

impl TransportError {
    /// The HTTP status for [`TransportError::Rejected`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
