//! Session management for HotelGenie.
//!
//! This crate owns the signed-in state of the front-end:
//!
//! 1. **Storage** ([`TokenStore`]): where the credential and role live
//!    between runs ([`MemoryTokenStore`], [`FileTokenStore`])
//! 2. **Expiry** ([`is_expired`]): a local, unverified look at the
//!    credential's `exp` claim
//! 3. **Validation** ([`SessionValidator`]): the backend round-trip that
//!    decides whether the credential is still good and which role it has
//! 4. **Control** ([`SessionController`]): login, logout, and startup
//!    validation, published as a [`SessionState`]
//!
//! # How it fits in the stack
//!
//! ```text
//! Navigation (above)      ← reads SessionState to gate routes
//!     ↕
//! Session (this crate)    ← owns the credential and the state machine
//!     ↕
//! Transport (below)       ← AuthBackend round-trips
//! ```

#![allow(async_fn_in_trait)]

mod config;
mod controller;
mod error;
mod expiry;
mod forms;
mod navigator;
mod state;
mod store;
mod validator;

pub use config::SessionConfig;
pub use controller::SessionController;
pub use error::SessionError;
pub use expiry::{is_expired, is_expired_at, now_millis};
pub use forms::{FormError, LoginForm, RegistrationForm};
pub use navigator::{LogNavigator, Navigator};
pub use state::SessionState;
pub use store::{FileTokenStore, MemoryTokenStore, StoredSession, TokenStore};
pub use validator::SessionValidator;
