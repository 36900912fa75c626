//! Codec trait and the JSON implementation.
//!
//! A "codec" (coder/decoder) converts between Rust values and raw bytes.
//! The persisted session document and the credential's claim payload both
//! go through a [`Codec`], so the storage layer never calls `serde_json`
//! directly and a different format can be swapped in behind the trait.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes Rust values to bytes and decodes bytes back.
///
/// ## Trait bounds
///
/// - `Send + Sync` → a codec is held by long-lived stores that may be
///   touched from any Tokio worker thread.
/// - `'static` → it owns everything it needs.
///
/// `decode` uses `DeserializeOwned` (not plain `Deserialize`) so the
/// result doesn't borrow from the input buffer, which is usually a
/// temporary read from disk or the network.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value can't be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// JSON is what the REST backend speaks and what the session file holds,
/// so it's the only codec the workspace ships.
///
/// ## Example
///
/// ```rust
/// use hotelgenie_protocol::{Codec, JsonCodec, LoginRequest};
///
/// let codec = JsonCodec;
/// let request = LoginRequest {
///     email: "guest@example.com".into(),
///     password: "hunter22".into(),
/// };
///
/// let bytes = codec.encode(&request).unwrap();
/// let decoded: LoginRequest = codec.decode(&bytes).unwrap();
/// assert_eq!(request, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
