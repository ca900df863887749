//! Types shared between pages and components

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::custom_validator::FieldResult;

/// An incoming request with its cookies already parsed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRequest {
    pub cookies: BTreeMap<String, String>,
}

impl CookieRequest {
    /// Parses the value of a `Cookie` header (`name=value; other=value`).
    /// Pairs without a `=` are ignored, the last occurrence of a name wins.
    pub fn from_header(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .map(|(name, value)| (name.trim(), value.trim()))
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect();

        Self { cookies }
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

/// Context given to a page while it is prepared for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub pathname: String,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req: Option<CookieRequest>,
}

impl PageContext {
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.req.as_ref()?.cookie(name)
    }
}

/// Feedback shown under a form field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub error: bool,
    pub text: String,
}

impl Validation {
    pub fn valid() -> Self {
        Self::default()
    }
}

impl From<FieldResult> for Validation {
    fn from(result: FieldResult) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(error) => Self {
                error: true,
                text: error.to_string(),
            },
        }
    }
}

/// A label and the value it stands for, as used by select inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption<T = String, U = serde_json::Value> {
    pub label: T,
    pub value: U,
}

impl<T, U> SelectOption<T, U> {
    pub fn new(label: T, value: U) -> Self {
        Self { label, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::custom_validator::CustomValidator;
    use serde_json::json;

    #[test]
    fn test_cookie_header_parsing() {
        let request = CookieRequest::from_header("token=abc; theme=dark;broken; =nameless");

        assert_eq!(request.cookie("token"), Some("abc"));
        assert_eq!(request.cookie("theme"), Some("dark"));
        assert_eq!(request.cookie("broken"), None);
        assert_eq!(request.cookies.len(), 2);
    }

    #[test]
    fn test_cookie_value_may_contain_equals() {
        let request = CookieRequest::from_header("session=a=b=c");
        assert_eq!(request.cookie("session"), Some("a=b=c"));
    }

    #[test]
    fn test_page_context_cookie() {
        let mut context = PageContext {
            pathname: "/app/settings".to_string(),
            ..Default::default()
        };
        assert_eq!(context.cookie("token"), None);

        context.req = Some(CookieRequest::from_header("token=abc"));
        assert_eq!(context.cookie("token"), Some("abc"));
    }

    #[test]
    fn test_validation_from_result() {
        assert_eq!(Validation::from(CustomValidator::email("a@b.com")), Validation::valid());

        let validation = Validation::from(CustomValidator::email(""));
        assert!(validation.error);
        assert_eq!(validation.text, "Email cannot be empty!");
    }

    #[test]
    fn test_select_option_serialization() {
        let option: SelectOption = SelectOption::new("High".to_string(), json!(3));
        assert_eq!(serde_json::to_value(&option).unwrap(), json!({ "label": "High", "value": 3 }));
    }
}
