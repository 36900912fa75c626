//! Core types shared across the workspace.
//!
//! Everything here either crosses the REST boundary (request and response
//! bodies), gets persisted (credential and role), or names a place the
//! user can navigate to (routes).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// An opaque bearer token proving identity to the backend.
///
/// The backend issues a signed JWT. We never verify the signature: the
/// only thing read locally is the `exp` claim (see
/// [`decode_claims`](crate::decode_claims)), and the backend's
/// validation endpoint stays the real gate.
///
/// `Debug` is hand-written so a credential never ends up in a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token string. No validation happens here.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token, e.g. for an `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the credential and returns the raw token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<{} bytes>)", self.0.len())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The authorization label attached to a session.
///
/// The backend speaks Spring-style labels (`ROLE_ADMIN`, `ROLE_CLIENT`).
/// Parsing also accepts the bare form (`ADMIN`) and ignores ASCII case;
/// the canonical form used for persistence and the wire is always the
/// prefixed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Role {
    /// Hotel staff: sees the admin dashboard.
    Admin,
    /// A guest with an account: sees bookings.
    Client,
}

impl Role {
    /// The canonical label, as the backend spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::Client => "ROLE_CLIENT",
        }
    }

    /// Returns `true` for [`Role::Admin`].
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("ROLE_"))
            .map_or(trimmed, |_| &trimmed[5..]);

        if bare.eq_ignore_ascii_case("ADMIN") {
            Ok(Self::Admin)
        } else if bare.eq_ignore_ascii_case("CLIENT") {
            Ok(Self::Client)
        } else {
            Err(ProtocolError::UnknownRole(s.to_string()))
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for &'static str {
    fn from(role: Role) -> Self {
        role.as_str()
    }
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// A page of the application.
///
/// Routes are shared vocabulary: the session layer redirects to them, the
/// navigation layer decides which of them are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Recommendations,
    Login,
    Register,
    Bookings,
    Account,
    Admin,
    AdminRooms,
    AdminBookings,
    AdminClients,
    /// Checkout success landing page (payment provider redirects here).
    Success,
    /// Checkout cancelled landing page.
    Cancel,
}

impl Route {
    /// Every route, in navigation order.
    pub const ALL: [Route; 12] = [
        Route::Home,
        Route::Recommendations,
        Route::Login,
        Route::Register,
        Route::Bookings,
        Route::Account,
        Route::Admin,
        Route::AdminRooms,
        Route::AdminBookings,
        Route::AdminClients,
        Route::Success,
        Route::Cancel,
    ];

    /// The URL path of this route.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Recommendations => "/recommendations",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Bookings => "/bookings",
            Self::Account => "/account",
            Self::Admin => "/admin",
            Self::AdminRooms => "/admin/rooms",
            Self::AdminBookings => "/admin/bookings",
            Self::AdminClients => "/admin/clients",
            Self::Success => "/success",
            Self::Cancel => "/cancel",
        }
    }

    /// Where a freshly signed-in user lands: the dashboard for admins,
    /// home for everyone else.
    pub fn landing_for(role: Role) -> Self {
        if role.is_admin() { Self::Admin } else { Self::Home }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = ProtocolError;

    /// Parses a path. Query strings and a trailing slash are ignored, so
    /// `/success?session_id=cs_123` resolves to [`Route::Success`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| ProtocolError::UnknownRoute(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Wire bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful response of `POST /api/auth/login`.
///
/// The role stays a raw string here; [`LoginResponse::into_session`]
/// parses it, so an unknown label becomes a protocol error instead of a
/// JSON error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub role: String,
}

impl LoginResponse {
    /// Splits the response into the pair the session layer persists.
    ///
    /// # Errors
    /// [`ProtocolError::UnknownRole`] if the label isn't recognised.
    pub fn into_session(self) -> Result<(Credential, Role), ProtocolError> {
        let role = self.role.parse()?;
        Ok((Credential::new(self.access_token), role))
    }
}

/// Body of `POST /api/auth/client/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful response of `POST /api/auth/validate-token`.
///
/// The backend may omit the role, in which case the locally stored one is
/// used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    #[serde(default)]
    pub role: Option<String>,
}

impl ValidateResponse {
    /// The server-declared role, if any. An empty string counts as absent.
    ///
    /// # Errors
    /// [`ProtocolError::UnknownRole`] if a non-empty label isn't recognised.
    pub fn role(&self) -> Result<Option<Role>, ProtocolError> {
        match self.role.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(label) => label.parse().map(Some),
        }
    }
}

/// Error body some endpoints return alongside a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
