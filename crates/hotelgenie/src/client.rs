//! `HotelGenie` builder and handle.
//!
//! This is the entry point for a front-end. It ties together all the
//! layers: transport → session → navigation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hotelgenie_nav::{Decision, NavEntry};
use hotelgenie_protocol::Route;
use hotelgenie_session::{
    FileTokenStore, LoginForm, Navigator, RegistrationForm, SessionConfig, SessionController,
    SessionState,
};
use hotelgenie_transport::{BackendConfig, HttpBackend};
use tokio::sync::watch;

use crate::HotelGenieError;

/// Default location of the persisted session, relative to the working
/// directory.
pub const DEFAULT_STORE_PATH: &str = ".hotelgenie/session.json";

/// The controller as wired by [`HotelGenieBuilder`]: HTTP backend and a
/// JSON file store.
pub type HttpSessionController<N> = SessionController<HttpBackend, FileTokenStore, N>;

/// Builder for a [`HotelGenie`] handle.
///
/// # Example
///
/// ```rust,no_run
/// use hotelgenie::prelude::*;
///
/// # async fn run() -> Result<(), HotelGenieError> {
/// let app = HotelGenieBuilder::new()
///     .base_url("https://api.hotelgenie.example")
///     .store_path("/var/lib/hotelgenie/session.json")
///     .build(LogNavigator)?;
///
/// match app.start().await {
///     SessionState::Authenticated(role) => println!("welcome back ({role})"),
///     _ => println!("please sign in"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HotelGenieBuilder {
    backend: BackendConfig,
    store_path: PathBuf,
    session: SessionConfig,
}

impl HotelGenieBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            backend: BackendConfig::default(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            session: SessionConfig::default(),
        }
    }

    /// Sets the backend's scheme, host and port.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.backend.base_url = url.into();
        self
    }

    /// Bounds every backend request. `None` removes the bound.
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.backend.request_timeout = timeout;
        self
    }

    /// Sets where the session is persisted.
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session = config;
        self
    }

    /// Builds the handle. Nothing is loaded or validated until
    /// [`HotelGenie::start`].
    ///
    /// # Errors
    /// [`HotelGenieError::Transport`] if the HTTP client can't be created.
    pub fn build<N: Navigator>(self, navigator: N) -> Result<HotelGenie<N>, HotelGenieError> {
        tracing::debug!(
            base_url = %self.backend.base_url,
            store = %self.store_path.display(),
            "building session"
        );
        let backend = HttpBackend::new(self.backend)?;
        let store = FileTokenStore::new(self.store_path);
        let controller = SessionController::new(backend, store, navigator, self.session);
        Ok(HotelGenie {
            controller: Arc::new(controller),
        })
    }
}

impl Default for HotelGenieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A front-end's view of the session.
///
/// Cheap to clone; clones share one controller.
pub struct HotelGenie<N: Navigator> {
    controller: Arc<HttpSessionController<N>>,
}

impl<N: Navigator> Clone for HotelGenie<N> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
        }
    }
}

impl<N: Navigator> HotelGenie<N> {
    /// The underlying controller, for consumers that need the full API.
    pub fn controller(&self) -> &Arc<HttpSessionController<N>> {
        &self.controller
    }

    /// Restores and validates the persisted session. Call once at
    /// startup, and again whenever revalidation is wanted.
    pub async fn start(&self) -> SessionState {
        self.controller.bootstrap().await
    }

    /// The current session state.
    pub fn state(&self) -> SessionState {
        self.controller.state()
    }

    /// Every subsequent session transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.controller.subscribe()
    }

    /// Signs in and returns the page the user was sent to.
    ///
    /// # Errors
    /// See [`SessionController::sign_in`]. The error's
    /// [`user_message`](HotelGenieError::user_message) is what the form
    /// should show.
    pub async fn sign_in(&self, form: &LoginForm) -> Result<Route, HotelGenieError> {
        Ok(self.controller.sign_in(form).await?)
    }

    /// Registers a new client account.
    ///
    /// # Errors
    /// See [`SessionController::sign_up`].
    pub async fn sign_up(&self, form: &RegistrationForm) -> Result<(), HotelGenieError> {
        Ok(self.controller.sign_up(form).await?)
    }

    /// Signs out.
    pub async fn logout(&self) {
        self.controller.logout().await;
    }

    /// May `route` be shown right now?
    pub fn guard(&self, route: Route) -> Decision {
        hotelgenie_nav::guard(route, &self.state())
    }

    /// [`guard`](Self::guard) for a raw path.
    ///
    /// # Errors
    /// [`HotelGenieError::Protocol`] for a path that isn't a page.
    pub fn guard_path(&self, path: &str) -> Result<Decision, HotelGenieError> {
        Ok(hotelgenie_nav::guard_path(path, &self.state())?)
    }

    /// The navigation bar for the current state.
    pub fn nav_entries(&self) -> Vec<NavEntry> {
        hotelgenie_nav::nav_entries(&self.state())
    }
}

#[cfg(test)]
mod tests {
    use hotelgenie_session::LogNavigator;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = HotelGenieBuilder::default();
        assert_eq!(builder.backend.base_url, "http://localhost:8080");
        assert_eq!(builder.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(builder.session.logout_redirect_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_builder_setters_chain() {
        let builder = HotelGenieBuilder::new()
            .base_url("http://api.test")
            .request_timeout(None)
            .store_path("/tmp/s.json");
        assert_eq!(builder.backend.base_url, "http://api.test");
        assert_eq!(builder.backend.request_timeout, None);
        assert_eq!(builder.store_path, PathBuf::from("/tmp/s.json"));
    }

    #[tokio::test]
    async fn test_build_starts_unknown_with_public_menu() {
        let app = HotelGenieBuilder::new()
            .store_path("/nonexistent/session.json")
            .build(LogNavigator)
            .expect("client builds");

        assert_eq!(app.state(), SessionState::Unknown);
        assert_eq!(app.nav_entries().len(), 2);
        assert_eq!(app.guard(Route::Account), Decision::Pending);
    }
}
