//! Redirect hook.
//!
//! The session layer decides *when* the user should be sent somewhere
//! (after logout, after sign-in, after registration) but has no idea how
//! pages are shown. The [`Navigator`] trait is the seam: the front-end
//! implements it with whatever router it has, tests implement it with a
//! recorder.

use hotelgenie_protocol::Route;

/// Receives redirects issued by the session controller.
///
/// # Trait bounds
///
/// - `Send + Sync` → delayed redirects fire from a spawned task.
/// - `'static` → the navigator lives as long as the controller.
pub trait Navigator: Send + Sync + 'static {
    /// Send the user to `route`.
    fn navigate(&self, route: Route);
}

/// A [`Navigator`] that only records redirects in the log.
///
/// For headless front-ends (and the CLI) where "showing the login page"
/// means telling the user what to do next.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(%route, "redirect");
    }
}
