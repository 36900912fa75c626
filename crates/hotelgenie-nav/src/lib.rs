//! Navigation for HotelGenie.
//!
//! Both halves are pure functions of the current [`SessionState`]:
//!
//! - [`guard`]: may the user see this page, or must they be sent
//!   elsewhere?
//! - [`nav_entries`]: which links does the top bar show?
//!
//! Neither ever says "no" while the session is still being determined.
//! An `Unknown` or `Validating` state yields [`Decision::Pending`] and the
//! public menu only, so a slow validation can't bounce a signed-in user
//! to the login page.
//!
//! [`SessionState`]: hotelgenie_session::SessionState

mod access;
mod menu;

pub use access::{Access, Decision, access_for, guard, guard_path};
pub use menu::{NavEntry, NavTarget, nav_entries};
