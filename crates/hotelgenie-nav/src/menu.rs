//! The top navigation bar.

use std::fmt;

use hotelgenie_protocol::Route;
use hotelgenie_session::SessionState;

/// What clicking a navigation entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Go to a page.
    Route(Route),
    /// Sign out. The front-end calls `SessionController::logout`.
    Logout,
}

/// One link in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub target: NavTarget,
}

impl NavEntry {
    const fn page(label: &'static str, route: Route) -> Self {
        Self {
            label,
            target: NavTarget::Route(route),
        }
    }
}

impl fmt::Display for NavEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            NavTarget::Route(route) => write!(f, "{} ({route})", self.label),
            NavTarget::Logout => f.write_str(self.label),
        }
    }
}

const PUBLIC: [NavEntry; 2] = [
    NavEntry::page("Home", Route::Home),
    NavEntry::page("Ask AI", Route::Recommendations),
];

const LOG_OUT: NavEntry = NavEntry {
    label: "Log Out",
    target: NavTarget::Logout,
};

/// The entries to show in `state`, in display order.
///
/// - signed out: public + Login, Register
/// - admin: public + Dashboard, Account, Log Out
/// - client: public + Bookings, Account, Log Out
/// - not settled yet: public only
pub fn nav_entries(state: &SessionState) -> Vec<NavEntry> {
    let mut entries = PUBLIC.to_vec();
    match *state {
        SessionState::Unknown | SessionState::Validating => {}
        SessionState::Unauthenticated => entries.extend([
            NavEntry::page("Login", Route::Login),
            NavEntry::page("Register", Route::Register),
        ]),
        SessionState::Authenticated(role) if role.is_admin() => entries.extend([
            NavEntry::page("Dashboard", Route::Admin),
            NavEntry::page("Account", Route::Account),
            LOG_OUT,
        ]),
        SessionState::Authenticated(_) => entries.extend([
            NavEntry::page("Bookings", Route::Bookings),
            NavEntry::page("Account", Route::Account),
            LOG_OUT,
        ]),
    }
    entries
}
