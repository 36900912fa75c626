//! The validation round-trip.

use std::time::Duration;

use hotelgenie_protocol::{Credential, Role};
use hotelgenie_transport::AuthBackend;

use crate::SessionError;

/// Asks the backend whether a credential is still accepted.
///
/// The backend is the source of truth for authorization: whatever role it
/// returns overrides anything cached locally. One attempt only; a failure
/// here is a hard session failure, not something to retry.
#[derive(Debug)]
pub struct SessionValidator<B: AuthBackend> {
    backend: B,
    timeout: Duration,
}

impl<B: AuthBackend> SessionValidator<B> {
    /// Wraps `backend`, bounding each validation by `timeout`.
    pub fn new(backend: B, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// The backend this validator talks to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validates `credential`.
    ///
    /// Returns the server-declared role, or `Ok(None)` if the backend
    /// accepted the credential without naming one.
    ///
    /// # Errors
    /// - [`SessionError::Validation`]: non-2xx, transport failure, or a
    ///   malformed body
    /// - [`SessionError::ValidationTimeout`]: no answer within the timeout
    /// - [`SessionError::UnexpectedRole`]: a role label we don't know
    pub async fn validate(&self, credential: &Credential) -> Result<Option<Role>, SessionError> {
        let response =
            tokio::time::timeout(self.timeout, self.backend.validate_token(credential))
                .await
                .map_err(|_| SessionError::ValidationTimeout)?
                .map_err(SessionError::Validation)?;

        response.role().map_err(SessionError::UnexpectedRole)
    }
}
