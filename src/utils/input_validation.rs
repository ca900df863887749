//! Wrapper types for inputs that went through the field validators.
//!
//! A value of one of these types can only be built through validation, so
//! code receiving one does not need to check it again.

use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::custom_validator::{CustomValidator, FieldError, FieldResult};

/// Implements the `TryFrom` conversions and `AsRef<str>` for a validated newtype
macro_rules! validated_string {
    ($name:ident, $validator:path) => {
        impl TryFrom<String> for $name {
            type Error = FieldError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                $validator(&value)?;
                Ok(Self(value))
            }
        }

        impl TryFrom<&str> for $name {
            type Error = FieldError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                $validator(value)?;
                Ok(Self(value.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Wrapper type for a username that has been validated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[serde(try_from = "String")]
pub struct Username(String);

validated_string!(Username, CustomValidator::username);

/// Wrapper type for an email address that has been validated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[serde(try_from = "String")]
pub struct EmailAddress(String);

validated_string!(EmailAddress, CustomValidator::email);

/// Wrapper type for the name of a todo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
#[serde(try_from = "String")]
pub struct TodoName(String);

validated_string!(TodoName, CustomValidator::todo_name);

/// A password meeting the composition rules. Never displayed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

validated_string!(Password, CustomValidator::password);

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// The content of a login field, which accepts a username or an email
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum UserIdentifier {
    Username(Username),
    Email(EmailAddress),
}

impl TryFrom<&str> for UserIdentifier {
    type Error = FieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        CustomValidator::user_identifier(value)?;

        if value.contains('@') {
            Ok(Self::Email(EmailAddress(value.to_owned())))
        } else {
            Ok(Self::Username(Username(value.to_owned())))
        }
    }
}

impl TryFrom<String> for UserIdentifier {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// A validated request to replace the account password
#[derive(Clone)]
pub struct PasswordChange {
    pub password: Password,
    pub current_password: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

impl PasswordChange {
    /// Checks the new password, its confirmation, then the presence of the
    /// current password, reporting the first problem found
    pub fn new(password: &str, confirm: &str, current_password: &str) -> Result<Self, FieldError> {
        let password = Password::try_from(password)?;
        CustomValidator::confirm_password(password.as_ref(), confirm)?;
        require_password(current_password)?;

        Ok(Self {
            password,
            current_password: current_password.to_owned(),
        })
    }
}

/// Only checks that a password was typed, used where the password is verified
/// by the server rather than against the composition rules
pub fn require_password(input: &str) -> FieldResult {
    if input.is_empty() {
        return Err(FieldError::PasswordEmpty);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod username_wrapper_tests {
        use super::*;

        #[test]
        fn test_valid_username() {
            let valid_cases = vec![
                "alice123",
                "Bob_user",
                "developer123",
                "john.doe"
            ];

            for username in valid_cases {
                assert!(Username::try_from(username).is_ok(),
                        "Valid username {} was rejected !", username);
            }
        }

        #[test]
        fn test_invalid_username() {
            let invalid_cases = vec![
                "",
                "a",
                "alice",
                "alice@example.com",
            ];

            for username in invalid_cases {
                assert!(Username::try_from(username).is_err(),
                        "Invalid username {} was approved !", username);
            }
        }

        #[test]
        fn test_username_display() {
            let username = Username::try_from("test_user").unwrap();
            assert_eq!(username.to_string(), "test_user");
        }

        #[test]
        fn test_username_as_ref() {
            let username = Username::try_from(String::from("test_user")).unwrap();
            assert_eq!(username.as_ref(), "test_user");
        }

        #[test]
        fn test_username_deserialization_is_validated() {
            let ok: Result<Username, _> = serde_json::from_str("\"test_user\"");
            assert!(ok.is_ok());

            let err: Result<Username, _> = serde_json::from_str("\"abc\"");
            assert!(err.is_err());
        }
    }

    mod identifier_tests {
        use super::*;

        #[test]
        fn test_identifier_kind() {
            assert!(matches!(UserIdentifier::try_from("johndoe"), Ok(UserIdentifier::Username(_))));
            assert!(matches!(UserIdentifier::try_from("john@doe.com"), Ok(UserIdentifier::Email(_))));
        }

        #[test]
        fn test_invalid_identifier() {
            assert_eq!(UserIdentifier::try_from("john"), Err(FieldError::UsernameTooShort));
            assert_eq!(UserIdentifier::try_from("john@"), Err(FieldError::InvalidEmail));
            assert_eq!(UserIdentifier::try_from(""), Err(FieldError::IdentifierEmpty));
        }

        #[test]
        fn test_identifier_display() {
            let identifier = UserIdentifier::try_from("john@doe.com").unwrap();
            assert_eq!(identifier.to_string(), "john@doe.com");
        }
    }

    mod password_tests {
        use super::*;

        #[test]
        fn test_password_is_not_printed() {
            let password = Password::try_from("Secr3t!pass").unwrap();
            assert_eq!(format!("{:?}", password), "Password(***)");
        }

        #[test]
        fn test_password_change() {
            let change = PasswordChange::new("Abcdef1!", "Abcdef1!", "old").unwrap();
            assert_eq!(change.password.as_ref(), "Abcdef1!");
            assert_eq!(change.current_password, "old");
        }

        #[test]
        fn test_password_change_errors_in_order() {
            assert_eq!(PasswordChange::new("abc", "abc", "").unwrap_err(),
                       FieldError::PasswordTooShort);
            assert_eq!(PasswordChange::new("Abcdef1!", "Abcdef1?", "").unwrap_err(),
                       FieldError::PasswordMismatch);
            assert_eq!(PasswordChange::new("Abcdef1!", "Abcdef1!", "").unwrap_err(),
                       FieldError::PasswordEmpty);
        }
    }

    #[test]
    fn test_todo_name() {
        assert!(TodoName::try_from("Water the plants").is_ok());
        assert_eq!(TodoName::try_from(""), Err(FieldError::TodoNameEmpty));
    }
}
