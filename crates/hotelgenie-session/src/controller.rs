//! The session controller: the single owner of "who is signed in".
//!
//! It is responsible for:
//! - Validating a stored credential at startup (`bootstrap`)
//! - Adopting a fresh credential after sign-in (`login`)
//! - Forgetting everything on sign-out or failure (`logout`)
//! - Publishing every transition to all consumers
//!
//! # Concurrency note
//!
//! All methods take `&self`, so the controller can sit in an `Arc` and be
//! shared between the code that bootstraps it and the code that reacts to
//! user actions. State is published through a `tokio::sync::watch`
//! channel: a transition replaces the whole value at once, so readers
//! never see half of one.
//!
//! Nothing cancels an in-flight validation. Instead, every operation
//! advances an epoch counter, and a validation result is only applied if
//! the epoch is still the one it started under. That way a user who logs
//! out while the backend is thinking stays logged out.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use hotelgenie_protocol::{Credential, Role, Route};
use hotelgenie_transport::{AuthBackend, TransportError};
use tokio::sync::watch;

use crate::{
    LoginForm, Navigator, RegistrationForm, SessionConfig, SessionError, SessionState,
    SessionValidator, StoredSession, TokenStore, expiry,
};

/// Owns the session state machine.
///
/// ## Lifecycle
///
/// ```text
///                 bootstrap()
///   [Unknown] ──────────────→ [Validating] ──(validated)──→ [Authenticated]
///                                  │                               │
///                   (absent/expired/rejected/timeout)          logout()
///                                  ▼                               ▼
///                          [Unauthenticated] ←─────────────────────┘
///                                  │
///                                  └──── login() ──→ [Authenticated]
/// ```
///
/// The type parameters are the three seams to the outside world: the
/// backend (`B`), where the credential is persisted (`S`), and how the
/// user is redirected (`N`).
pub struct SessionController<B: AuthBackend, S: TokenStore, N: Navigator> {
    validator: SessionValidator<B>,
    store: S,
    navigator: Arc<N>,
    state: watch::Sender<SessionState>,
    /// Advanced by every operation. Shared with delayed redirect tasks.
    epoch: Arc<AtomicU64>,
    config: SessionConfig,
}

impl<B, S, N> SessionController<B, S, N>
where
    B: AuthBackend,
    S: TokenStore,
    N: Navigator,
{
    /// Creates a controller in the [`SessionState::Unknown`] state.
    ///
    /// Nothing is read from `store` until [`bootstrap`](Self::bootstrap).
    pub fn new(backend: B, store: S, navigator: N, config: SessionConfig) -> Self {
        let config = config.validated();
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            validator: SessionValidator::new(backend, config.validation_timeout),
            store,
            navigator: Arc::new(navigator),
            state,
            epoch: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    // =====================================================================
    // Observing
    // =====================================================================

    /// The current state.
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// A receiver that sees every subsequent transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Waits until the state is terminal (authenticated or not) and
    /// returns it. Returns immediately if it already is.
    pub async fn settled(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, which outlives this borrow, so the
        // channel can't close under us.
        match rx.wait_for(SessionState::is_settled).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        }
    }

    /// The configuration in effect (after validation).
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The token store the controller writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The navigator redirects are sent to.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    // =====================================================================
    // Operations
    // =====================================================================

    /// Validates the stored credential, if any.
    ///
    /// 1. No stored session, or a locally expired credential →
    ///    [`logout`](Self::logout) without touching the network.
    /// 2. Otherwise ask the backend. Success → `Authenticated` with the
    ///    server's role (the stored one only if the server names none).
    ///    Any failure → [`logout`](Self::logout).
    ///
    /// Never fails: every error ends as `Unauthenticated`. If another
    /// operation runs while this one is waiting, this one's outcome is
    /// dropped and the returned state is whatever that operation left.
    ///
    /// Can be called again at any time to revalidate.
    pub async fn bootstrap(&self) -> SessionState {
        let epoch = self.advance_epoch();
        self.transition(SessionState::Validating);

        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "token store unreadable, treating as signed out");
                None
            }
        };
        if !self.is_current(epoch) {
            return self.discarded();
        }

        let Some(stored) = stored else {
            tracing::info!("no stored session");
            self.logout().await;
            return self.state();
        };

        if expiry::is_expired(&stored.credential) {
            tracing::info!("stored credential expired, skipping validation");
            self.logout().await;
            return self.state();
        }

        let outcome = self.validator.validate(&stored.credential).await;
        if !self.is_current(epoch) {
            return self.discarded();
        }

        match outcome {
            Ok(server_role) => {
                let role = server_role.unwrap_or(stored.role);
                if role != stored.role {
                    tracing::info!(cached = %stored.role, server = %role, "server role overrides cached role");
                }
                self.transition(SessionState::Authenticated(role));
            }
            Err(e) => {
                tracing::warn!(error = %e, "session validation failed");
                self.logout().await;
            }
        }
        self.state()
    }

    /// Adopts a credential the caller just obtained (typically from the
    /// login endpoint). Does not contact the backend.
    ///
    /// The state changes even if persisting fails; the session then just
    /// won't survive a restart.
    pub async fn login(&self, credential: Credential, role: Role) {
        self.advance_epoch();
        self.transition(SessionState::Authenticated(role));

        let session = StoredSession { credential, role };
        if let Err(e) = self.store.save(&session).await {
            tracing::warn!(error = %e, "could not persist session");
        }
    }

    /// Forgets the session and redirects to the login page after
    /// [`SessionConfig::logout_redirect_delay`].
    ///
    /// Safe to call in any state. The redirect is dropped if the user
    /// signs in again before it fires.
    pub async fn logout(&self) {
        self.advance_epoch();
        self.transition(SessionState::Unauthenticated);

        if let Err(e) = self.store.clear().await {
            tracing::warn!(error = %e, "could not clear token store");
        }

        self.schedule_redirect(Route::Login, self.config.logout_redirect_delay);
    }

    /// Runs the sign-in form: client-side checks, the login request, then
    /// [`login`](Self::login) and an immediate redirect to the landing
    /// page for the returned role.
    ///
    /// # Errors
    /// - [`SessionError::InvalidForm`]: nothing was sent
    /// - [`SessionError::LoginRejected`]: wrong email or password
    /// - [`SessionError::LoginFailed`] / [`SessionError::UnexpectedRole`]:
    ///   the backend couldn't be reached or answered nonsense
    ///
    /// The session state is untouched on error.
    pub async fn sign_in(&self, form: &LoginForm) -> Result<Route, SessionError> {
        form.validate()?;

        let response = self
            .validator
            .backend()
            .login(&form.to_request())
            .await
            .map_err(|e| match e {
                TransportError::Rejected { .. } => SessionError::LoginRejected,
                other => SessionError::LoginFailed(other),
            })?;

        let (credential, role) = response
            .into_session()
            .map_err(SessionError::UnexpectedRole)?;

        self.login(credential, role).await;
        tracing::info!(%role, "signed in");

        let landing = Route::landing_for(role);
        self.navigator.navigate(landing);
        Ok(landing)
    }

    /// Runs the registration form. On success, redirects to the login
    /// page after [`SessionConfig::registration_redirect_delay`].
    ///
    /// Registration never signs the user in.
    ///
    /// # Errors
    /// - [`SessionError::InvalidForm`]: nothing was sent
    /// - [`SessionError::RegistrationRejected`]: carries the backend's
    ///   reason when it gave one
    /// - [`SessionError::RegistrationFailed`]: no answer
    pub async fn sign_up(&self, form: &RegistrationForm) -> Result<(), SessionError> {
        form.validate()?;

        match self.validator.backend().register(&form.to_request()).await {
            Ok(()) => {
                tracing::info!("registration accepted");
                self.schedule_redirect(Route::Login, self.config.registration_redirect_delay);
                Ok(())
            }
            Err(TransportError::Rejected { message, .. }) => {
                Err(SessionError::RegistrationRejected { message })
            }
            Err(e) => Err(SessionError::RegistrationFailed(e)),
        }
    }

    // =====================================================================
    // Internals
    // =====================================================================

    /// Starts a new epoch and returns it.
    fn advance_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    fn discarded(&self) -> SessionState {
        tracing::debug!("session changed during bootstrap, discarding its result");
        self.state()
    }

    fn transition(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::info!(from = %previous, to = %next, "session transition");
        }
    }

    /// Navigates to `route` after `delay`, unless the epoch moves first.
    fn schedule_redirect(&self, route: Route, delay: Duration) {
        if delay.is_zero() {
            self.navigator.navigate(route);
            return;
        }

        let navigator = Arc::clone(&self.navigator);
        let epoch = Arc::clone(&self.epoch);
        let scheduled_in = epoch.load(Ordering::SeqCst);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if epoch.load(Ordering::SeqCst) == scheduled_in {
                navigator.navigate(route);
            } else {
                tracing::debug!(%route, "session changed, dropping scheduled redirect");
            }
        });
    }
}

// =========================================================================
// Tests
// =========================================================================
