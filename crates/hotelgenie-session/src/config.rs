//! Session timing configuration.

use std::time::Duration;

/// Configuration for session behavior.
///
/// Controls how long the validation round-trip may take and how long the
/// controller waits before redirecting after a logout or a registration.
/// Sensible defaults are provided; override just the fields you care about:
///
/// ```rust
/// use std::time::Duration;
/// use hotelgenie_session::SessionConfig;
///
/// let config = SessionConfig {
///     logout_redirect_delay: Duration::ZERO,
///     ..SessionConfig::default()
/// };
/// assert_eq!(config.validation_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Upper bound for the startup validation call. Exceeding it counts
    /// as a failed validation, which logs the user out.
    ///
    /// Default: 10 seconds.
    pub validation_timeout: Duration,

    /// Delay between logout and the redirect to the login page, so any
    /// in-flight feedback can render first. Zero redirects immediately.
    ///
    /// Default: 1 second.
    pub logout_redirect_delay: Duration,

    /// Delay between a successful registration and the redirect to the
    /// login page.
    ///
    /// Default: 3 seconds.
    pub registration_redirect_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            validation_timeout: Duration::from_secs(10),
            logout_redirect_delay: Duration::from_secs(1),
            registration_redirect_delay: Duration::from_secs(3),
        }
    }
}

impl SessionConfig {
    /// Longest redirect delay accepted by [`validated`](Self::validated).
    pub const MAX_REDIRECT_DELAY: Duration = Duration::from_secs(30);

    /// Fixes out-of-range values so the config is safe to use.
    ///
    /// Called automatically by
    /// [`SessionController::new`](crate::SessionController::new). Rules:
    /// - a zero `validation_timeout` would fail every validation, so it
    ///   falls back to the default;
    /// - redirect delays are capped at [`Self::MAX_REDIRECT_DELAY`].
    pub fn validated(mut self) -> Self {
        if self.validation_timeout.is_zero() {
            tracing::warn!("validation_timeout is zero, using the default");
            self.validation_timeout = Self::default().validation_timeout;
        }
        if self.logout_redirect_delay > Self::MAX_REDIRECT_DELAY {
            tracing::warn!(
                delay_ms = self.logout_redirect_delay.as_millis() as u64,
                "logout_redirect_delay too long, clamping"
            );
            self.logout_redirect_delay = Self::MAX_REDIRECT_DELAY;
        }
        if self.registration_redirect_delay > Self::MAX_REDIRECT_DELAY {
            tracing::warn!(
                delay_ms = self.registration_redirect_delay.as_millis() as u64,
                "registration_redirect_delay too long, clamping"
            );
            self.registration_redirect_delay = Self::MAX_REDIRECT_DELAY;
        }
        self
    }
}
