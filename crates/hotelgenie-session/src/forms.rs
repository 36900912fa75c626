//! Client-side checks for the login and registration forms.
//!
//! These run before anything is sent, and their messages are shown to
//! the user verbatim.

use std::sync::LazyLock;

use hotelgenie_protocol::{LoginRequest, RegisterRequest};
use regex::Regex;

/// Something non-blank, an `@`, something, a dot, something.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Passwords shorter than this are refused before hitting the backend.
/// Measured in UTF-16 code units, as the browser counts them.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Why a form was refused. `Display` is the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Name is required.")]
    NameRequired,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,
}

fn check_email(email: &str) -> Result<(), FormError> {
    if EMAIL.is_match(email) {
        Ok(())
    } else {
        Err(FormError::InvalidEmail)
    }
}

fn check_password(password: &str) -> Result<(), FormError> {
    if password.encode_utf16().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(FormError::PasswordTooShort)
    }
}

/// The sign-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks email, then password. The first failure wins.
    pub fn validate(&self) -> Result<(), FormError> {
        check_email(&self.email)?;
        check_password(&self.password)
    }

    pub(crate) fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// The self-registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks name, email, then password. The first failure wins.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }
        check_email(&self.email)?;
        check_password(&self.password)
    }

    pub(crate) fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}
