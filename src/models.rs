//! Data model

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The authenticated user, as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{name} <{email}>")]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// An account detail that can be edited on the settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum SettingsField {
    Name,
    Email,
    Password,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_without_password() {
        let user: User = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com"
        }))
        .unwrap();

        assert_eq!(user.password, None);
        assert_eq!(user.to_string(), "Ada <ada@example.com>");
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({ "name": "Ada", "email": "ada@example.com" })
        );
    }
}
