//! Cross-checks between the menu and the guard.

use hotelgenie_nav::{Decision, NavTarget, guard, guard_path, nav_entries};
use hotelgenie_protocol::{Role, Route};
use hotelgenie_session::SessionState;

const SETTLED: [SessionState; 3] = [
    SessionState::Unauthenticated,
    SessionState::Authenticated(Role::Client),
    SessionState::Authenticated(Role::Admin),
];

#[test]
fn test_every_menu_link_is_reachable() {
    for state in SETTLED {
        for entry in nav_entries(&state) {
            if let NavTarget::Route(route) = entry.target {
                assert_eq!(
                    guard(route, &state),
                    Decision::Allow,
                    "{entry} shown in {state} but not allowed"
                );
            }
        }
    }
}

#[test]
fn test_log_out_offered_only_when_signed_in() {
    for state in SETTLED {
        let offers_logout = nav_entries(&state)
            .iter()
            .any(|e| e.target == NavTarget::Logout);
        assert_eq!(offers_logout, state.is_authenticated(), "{state}");
    }
}

#[test]
fn test_redirects_never_loop() {
    // Following a redirect must land on a page that is allowed.
    for state in SETTLED {
        for route in Route::ALL {
            if let Decision::Redirect(next) = guard(route, &state) {
                assert_eq!(guard(next, &state), Decision::Allow, "{route} -> {next} in {state}");
            }
        }
    }
}

#[test]
fn test_guard_path_checkout_return_with_query() {
    let state = SessionState::Unauthenticated;
    assert_eq!(guard_path("/success?session_id=cs_test_1", &state).unwrap(), Decision::Allow);
    assert_eq!(
        guard_path("/admin/rooms/", &state).unwrap(),
        Decision::Redirect(Route::Login)
    );
}
