//! # HotelGenie
//!
//! Session core for the HotelGenie booking front-end.
//!
//! HotelGenie keeps track of who is signed in: it restores a persisted
//! credential at startup, checks it locally for expiry, asks the backend
//! whether it is still good, and publishes the result as a
//! [`SessionState`](hotelgenie_session::SessionState) that the route
//! guard and navigation bar are pure functions of.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hotelgenie::prelude::*;
//!
//! # async fn run() -> Result<(), HotelGenieError> {
//! hotelgenie::init_tracing();
//!
//! let app = HotelGenieBuilder::new()
//!     .base_url("http://localhost:8080")
//!     .build(LogNavigator)?;
//! app.start().await;
//!
//! if app.guard(Route::Bookings) == Decision::Allow {
//!     // render the bookings page
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Layers
//!
//! - [`protocol`]: credentials, roles, routes, wire bodies
//! - [`transport`]: the REST backend
//! - [`session`]: storage, expiry, validation, the state machine
//! - [`nav`]: route guard and navigation bar

mod client;
mod error;

pub use client::{DEFAULT_STORE_PATH, HotelGenie, HotelGenieBuilder, HttpSessionController};
pub use error::HotelGenieError;

pub use hotelgenie_nav as nav;
pub use hotelgenie_protocol as protocol;
pub use hotelgenie_session as session;
pub use hotelgenie_transport as transport;

use tracing_subscriber::{EnvFilter, fmt};

/// Installs a `tracing` subscriber that writes to stderr.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Does nothing
/// if a global subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Everything a front-end usually needs.
pub mod prelude {
    pub use crate::{HotelGenie, HotelGenieBuilder, HotelGenieError};
    pub use hotelgenie_nav::{Decision, NavEntry, NavTarget};
    pub use hotelgenie_protocol::{Credential, Role, Route};
    pub use hotelgenie_session::{
        LogNavigator, LoginForm, Navigator, RegistrationForm, SessionConfig, SessionState,
    };
    pub use hotelgenie_transport::BackendConfig;
}
