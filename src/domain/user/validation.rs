//! User field validation
//!
//! Both validators accept an arbitrary JSON value so that wrongly typed input
//! (numbers, booleans, objects, arrays, null) is rejected with the same
//! user-facing message as a malformed string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Email has invalid format or is empty")]
    InvalidEmail,

    #[error(
        "Password must be at least 8 characters long, contain at least one uppercase letter, \
         one lowercase letter, one digit, and one special character"
    )]
    InvalidPassword,
}

pub const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z][A-Za-z0-9\-]+$")
        .expect("email pattern is a valid regex")
});

/// Validate an email candidate and return its normalized form
///
/// Rules:
/// - Must be a string (null, booleans, numbers and composites are rejected)
/// - Cannot be empty or whitespace
/// - Must look like `local@domain.tld` with an alphabetic TLD of 2+ letters
///
/// The domain part is lower-cased; the local part is kept as given.
pub fn validate_email(value: &Value) -> Result<String, UserValidationError> {
    let email = value.as_str().ok_or(UserValidationError::InvalidEmail)?;

    if email.trim().is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::InvalidEmail);
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(normalize_email(email))
}

/// Lower-case the domain part of an email address
pub fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Validate a password candidate against the complexity policy
///
/// Rules:
/// - Must be a string
/// - Minimum 8 characters
/// - At least one uppercase letter, one lowercase letter and one digit
/// - At least one character that is not alphanumeric
pub fn validate_password(value: &Value) -> Result<&str, UserValidationError> {
    let password = value.as_str().ok_or(UserValidationError::InvalidPassword)?;

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::InvalidPassword);
    }

    let has_uppercase = password.chars().any(char::is_uppercase);
    let has_lowercase = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if has_uppercase && has_lowercase && has_digit && has_special {
        Ok(password)
    } else {
        Err(UserValidationError::InvalidPassword)
    }
}
