//! Client for the Todo API.
//!
//! Pages only see the [`ApiClient`] trait; [`HttpApi`] is the implementation
//! talking to the real server.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, Method, StatusCode};
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Server answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// The requests the settings page sends to the server
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn patch(&self, path: &str, body: serde_json::Value) -> Result<(), ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}

/// Client for the Todo HTTP API
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: &str, session_cookie: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.api_url,
            config.session_cookie.clone(),
            config.request_timeout,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), ApiError> {
        debug!("{} {}", method, path);

        let mut request = self.client.request(method, self.url(path));
        if let Some(cookie) = &self.session_cookie {
            request = request.header(header::COOKIE, cookie);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ApiClient for HttpApi {
    async fn patch(&self, path: &str, body: serde_json::Value) -> Result<(), ApiError> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await
    }
}
