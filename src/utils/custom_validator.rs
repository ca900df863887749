//! Field validators used for inline form feedback.
//!
//! Every validator checks its rules in a fixed order and reports only the
//! first one that is violated, so a form field shows one actionable message
//! at a time.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::consts::{MIN_CREDENTIAL_LENGTH, PASSWORD_SYMBOLS};

// Loose shape check: something, an @, something, a dot, something.
// "Something" stops at line terminators, including \r and U+2028/U+2029.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\n\r\x{2028}\x{2029}]+@[^\n\r\x{2028}\x{2029}]+\.[^\n\r\x{2028}\x{2029}]+")
        .expect("Failed to compile email regex")
});

/// Outcome of a single field validation
pub type FieldResult = Result<(), FieldError>;

/// A rule violation, displayed as the message shown under the form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FieldError {
    #[error("First Name cannot be empty!")]
    FirstNameEmpty,

    #[error("Username cannot be empty!")]
    UsernameEmpty,

    #[error("Username must be at least 6 characters!")]
    UsernameTooShort,

    #[error("Username cannot be an email format!")]
    UsernameIsEmail,

    #[error("Email cannot be empty!")]
    EmailEmpty,

    #[error("Invalid email address!")]
    InvalidEmail,

    #[error("Username or email is required!")]
    IdentifierEmpty,

    #[error("Password is required!")]
    PasswordEmpty,

    #[error("Password must be at least 6 characters!")]
    PasswordTooShort,

    #[error("Password must contain at least a Number, a Special Character, and an Upper-Case Letter!")]
    PasswordTooWeak,

    #[error("Password does not match!")]
    PasswordMismatch,

    #[error("Todo Name cannot be empty!")]
    TodoNameEmpty,
}

/// Validators for every form field of the application
pub struct CustomValidator;

impl CustomValidator {
    pub fn first_name(input: &str) -> FieldResult {
        if input.is_empty() {
            return Err(FieldError::FirstNameEmpty);
        }
        Ok(())
    }

    /// A username is at least 6 characters long and must not look like an email
    pub fn username(input: &str) -> FieldResult {
        if input.is_empty() {
            return Err(FieldError::UsernameEmpty);
        }
        if utf16_len(input) < MIN_CREDENTIAL_LENGTH {
            return Err(FieldError::UsernameTooShort);
        }
        if is_email_shaped(input) {
            return Err(FieldError::UsernameIsEmail);
        }
        Ok(())
    }

    pub fn email(input: &str) -> FieldResult {
        if input.is_empty() {
            return Err(FieldError::EmailEmpty);
        }
        if !is_email_shaped(input) {
            return Err(FieldError::InvalidEmail);
        }
        Ok(())
    }

    /// Validates a login field accepting either a username or an email.
    ///
    /// Input containing an `@` is checked as an email, anything else as a
    /// username.
    pub fn user_identifier(input: &str) -> FieldResult {
        if input.is_empty() {
            return Err(FieldError::IdentifierEmpty);
        }

        if input.contains('@') {
            if !is_email_shaped(input) {
                return Err(FieldError::InvalidEmail);
            }
        } else if utf16_len(input) < MIN_CREDENTIAL_LENGTH {
            return Err(FieldError::UsernameTooShort);
        }
        Ok(())
    }

    /// A password needs a digit, a lowercase and an uppercase letter and one of
    /// [`PASSWORD_SYMBOLS`], and may contain nothing else.
    pub fn password(input: &str) -> FieldResult {
        if input.is_empty() {
            return Err(FieldError::PasswordEmpty);
        }
        if utf16_len(input) < MIN_CREDENTIAL_LENGTH {
            return Err(FieldError::PasswordTooShort);
        }
        if !is_strong_password(input) {
            return Err(FieldError::PasswordTooWeak);
        }
        Ok(())
    }

    pub fn confirm_password(password: &str, confirm_target: &str) -> FieldResult {
        if password.is_empty() || confirm_target.is_empty() || password != confirm_target {
            return Err(FieldError::PasswordMismatch);
        }
        Ok(())
    }

    pub fn todo_name(input: &str) -> FieldResult {
        if input.is_empty() {
            return Err(FieldError::TodoNameEmpty);
        }
        Ok(())
    }
}

/// Length as seen by browser form fields, in UTF-16 code units
fn utf16_len(input: &str) -> usize {
    input.encode_utf16().count()
}

fn is_email_shaped(input: &str) -> bool {
    EMAIL_REGEX.is_match(input)
}

fn is_password_symbol(c: char) -> bool {
    PASSWORD_SYMBOLS.contains(c)
}

fn is_strong_password(input: &str) -> bool {
    let only_allowed = input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_password_symbol(c));

    only_allowed
        && input.chars().any(|c| c.is_ascii_digit())
        && input.chars().any(|c| c.is_ascii_lowercase())
        && input.chars().any(|c| c.is_ascii_uppercase())
        && input.chars().any(is_password_symbol)
}
