//! Error types for the protocol layer.
//!
//! Each crate in the workspace defines its own error enum. A
//! `ProtocolError` always means "these bytes or strings don't have the
//! shape we expected", never a network or storage problem.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: malformed JSON, missing required fields, or a
    /// response body that isn't JSON at all.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The credential is not a JWT, or its claims aren't the expected
    /// shape.
    #[error("malformed credential: {0}")]
    MalformedToken(String),

    /// A role label outside the known set.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    /// A path that doesn't name any route of the application.
    #[error("unknown route: {0:?}")]
    UnknownRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_message_quotes_label() {
        let err = ProtocolError::UnknownRole("ROLE_GUEST".into());
        assert_eq!(err.to_string(), "unknown role: \"ROLE_GUEST\"");
    }

    #[test]
    fn test_decode_wraps_serde_message() {
        let inner = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ProtocolError::Decode(inner);
        assert!(err.to_string().starts_with("decode failed:"));
    }
}
