//! Route access classes and the guard.

use hotelgenie_protocol::{ProtocolError, Role, Route};
use hotelgenie_session::SessionState;

/// Who a page is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Only visitors who are *not* signed in (login, registration).
    Guest,
    /// Any signed-in user.
    SignedIn,
    /// Signed-in administrators.
    Admin,
}

/// The access class of `route`.
pub fn access_for(route: Route) -> Access {
    match route {
        Route::Home | Route::Recommendations | Route::Success | Route::Cancel => Access::Public,
        Route::Login | Route::Register => Access::Guest,
        Route::Bookings | Route::Account => Access::SignedIn,
        Route::Admin | Route::AdminRooms | Route::AdminBookings | Route::AdminClients => {
            Access::Admin
        }
    }
}

/// What to do with a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Show the page.
    Allow,
    /// The session isn't settled yet. Show a placeholder and ask again
    /// once it is.
    Pending,
    /// Send the user here instead.
    Redirect(Route),
}

/// Decides whether `route` may be shown in `state`.
///
/// | access   | signed out          | client              | admin          |
/// |----------|---------------------|---------------------|----------------|
/// | public   | allow               | allow               | allow          |
/// | guest    | allow               | redirect to landing | redirect to landing |
/// | signed-in| redirect to login   | allow               | allow          |
/// | admin    | redirect to login   | redirect to home    | allow          |
///
/// Public pages are always allowed. Everything else is
/// [`Decision::Pending`] until the state settles.
pub fn guard(route: Route, state: &SessionState) -> Decision {
    let access = access_for(route);
    if access == Access::Public {
        return Decision::Allow;
    }

    match *state {
        SessionState::Unknown | SessionState::Validating => Decision::Pending,
        SessionState::Unauthenticated => match access {
            Access::Guest | Access::Public => Decision::Allow,
            Access::SignedIn | Access::Admin => Decision::Redirect(Route::Login),
        },
        SessionState::Authenticated(role) => match access {
            Access::Guest => Decision::Redirect(Route::landing_for(role)),
            Access::Admin if role != Role::Admin => Decision::Redirect(Route::Home),
            _ => Decision::Allow,
        },
    }
}

/// [`guard`] for a raw path such as `/admin/rooms` or
/// `/success?session_id=cs_1`.
///
/// # Errors
/// [`ProtocolError::UnknownRoute`] if the path isn't a page of the app.
pub fn guard_path(path: &str, state: &SessionState) -> Result<Decision, ProtocolError> {
    let route: Route = path.parse()?;
    Ok(guard(route, state))
}
