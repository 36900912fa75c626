//! REST backend abstraction for HotelGenie.
//!
//! Provides the [`AuthBackend`] trait for the three auth endpoints the
//! front-end uses, plus [`BackendConfig`] for where the backend lives.
//!
//! # Feature Flags
//!
//! - `http` (default): [`HttpBackend`], backed by `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpBackend;

use std::future::Future;
use std::time::Duration;

use hotelgenie_protocol::{
    Credential, LoginRequest, LoginResponse, RegisterRequest, ValidateResponse,
};

/// Path of the token validation endpoint.
pub const VALIDATE_TOKEN_PATH: &str = "/api/auth/validate-token";
/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/auth/login";
/// Path of the client self-registration endpoint.
pub const REGISTER_PATH: &str = "/api/auth/client/register";

/// Where the backend lives and how long a request may take.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Scheme, host and port, e.g. `http://localhost:8080`. A trailing
    /// slash is tolerated.
    pub base_url: String,

    /// Upper bound for a whole request. `None` leaves it to the client.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl BackendConfig {
    /// A config pointing at `base_url` with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// The auth endpoints of the REST backend.
///
/// The session layer only ever talks to the backend through this trait,
/// which keeps it testable with an in-memory fake and keeps `reqwest` out
/// of its dependency list.
///
/// The futures are `Send` so callers may drive them from a spawned task.
pub trait AuthBackend: Send + Sync + 'static {
    /// `POST /api/auth/validate-token` with the credential as a bearer
    /// token. `Ok` only for a 2xx with a well-formed body.
    fn validate_token(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<ValidateResponse, TransportError>> + Send;

    /// `POST /api/auth/login` with an email/password body.
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<LoginResponse, TransportError>> + Send;

    /// `POST /api/auth/client/register`. The body of a 2xx is ignored.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}
