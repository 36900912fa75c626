//! The session state machine's states.

use std::fmt;

use hotelgenie_protocol::Role;

/// What the rest of the application knows about the current user.
///
/// ```text
///   Unknown ──(bootstrap)──→ Validating ──(ok)────→ Authenticated(role)
///                                │
///                                └──(any failure)──→ Unauthenticated
///
///   login()  ──→ Authenticated(role)      from any state
///   logout() ──→ Unauthenticated          from any state
/// ```
///
/// - **Unknown**: nothing checked yet (before the first bootstrap).
/// - **Validating**: a stored credential is being checked.
/// - **Authenticated**: the backend (or a fresh login) vouched for the
///   credential. The role is only meaningful in this state, which is why
///   it lives inside the variant.
/// - **Unauthenticated**: no usable credential.
///
/// `Unknown` and `Validating` are *not* "signed out": a consumer seeing
/// them must wait rather than deny.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unknown,
    Validating,
    Authenticated(Role),
    Unauthenticated,
}

impl SessionState {
    /// `true` only in [`SessionState::Authenticated`].
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The role, present only while authenticated.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Authenticated(role) => Some(*role),
            _ => None,
        }
    }

    /// `true` once the state is terminal, i.e. authorization decisions
    /// made from it are valid.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Authenticated(_) | Self::Unauthenticated)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Validating => write!(f, "Validating"),
            Self::Authenticated(role) => write!(f, "Authenticated({role})"),
            Self::Unauthenticated => write!(f, "Unauthenticated"),
        }
    }
}
