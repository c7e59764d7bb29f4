//! Sign-in and sign-up form state.
//!
//! # Design
//! - Keep form inputs as strings for lossless editing.
//! - Only check that required fields are filled; the API owns validation.

use filmcat_api_models::{SignInRequest, SignUpRequest};

/// Which auth form is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthTab {
    /// Email/password sign-in.
    #[default]
    SignIn,
    /// Account registration.
    SignUp,
}

/// Sign-in form inputs.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SignInForm {
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
}

impl SignInForm {
    /// Request body, or `None` while a required field is blank.
    #[must_use]
    pub fn request(&self) -> Option<SignInRequest> {
        let email = required(&self.email)?;
        if self.password.is_empty() {
            return None;
        }
        Some(SignInRequest {
            email,
            password: self.password.clone(),
        })
    }
}

/// Sign-up form inputs.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SignUpForm {
    /// Email input.
    pub email: String,
    /// Login input.
    pub login: String,
    /// Password input.
    pub password: String,
}

impl SignUpForm {
    /// Request body, or `None` while a required field is blank.
    #[must_use]
    pub fn request(&self) -> Option<SignUpRequest> {
        let email = required(&self.email)?;
        let login = required(&self.login)?;
        if self.password.is_empty() {
            return None;
        }
        Some(SignUpRequest {
            email,
            login,
            password: self.password.clone(),
        })
    }
}

fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
