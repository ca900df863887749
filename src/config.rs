//! Runtime configuration, read from the environment and an optional `.env` file.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenv::dotenv;
use thiserror::Error;

use crate::consts::{DEFAULT_API_URL, DEFAULT_LOG_FILE, REQUEST_TIMEOUT_SECS};

pub const API_URL_VAR: &str = "TODO_API_URL";
pub const SESSION_COOKIE_VAR: &str = "TODO_SESSION_COOKIE";
pub const LOG_FILE_VAR: &str = "TODO_LOG_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    /// Value of the `Cookie` header sent with every request
    pub session_cookie: Option<String>,
    pub log_file: PathBuf,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_cookie: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from any variable source, missing or empty
    /// variables falling back to the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(api_url) = get(API_URL_VAR) {
            if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    var: API_URL_VAR,
                    value: api_url,
                });
            }
            config.api_url = api_url.trim_end_matches('/').to_string();
        }

        config.session_cookie = get(SESSION_COOKIE_VAR);

        if let Some(log_file) = get(LOG_FILE_VAR) {
            config.log_file = PathBuf::from(log_file);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (API_URL_VAR, "https://todo.example.com/api/"),
            (SESSION_COOKIE_VAR, "token=abc"),
            (LOG_FILE_VAR, "/tmp/todo.log"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://todo.example.com/api");
        assert_eq!(config.session_cookie.as_deref(), Some("token=abc"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/todo.log"));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let config = Config::from_lookup(lookup_from(&[(SESSION_COOKIE_VAR, "  ")])).unwrap();
        assert_eq!(config.session_cookie, None);
    }

    #[test]
    fn test_invalid_url() {
        let result = Config::from_lookup(lookup_from(&[(API_URL_VAR, "localhost:5000")]));
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }
}
