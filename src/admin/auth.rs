//! Admin fetch with token-then-basic-auth fallback.
//!
//! The first attempt sends `admin_token=<sha256 hex of "user:pass">` as a
//! query parameter. A 401 triggers exactly one retry with a Basic
//! `Authorization` header built from the same credentials. Whatever the
//! second attempt returns is final.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::config::{AdminCredentialsConfig, AppConfig};
use crate::error::AdminError;

use super::record::AdminRecord;

/// Query parameter carrying the hashed credentials.
pub const ADMIN_TOKEN_PARAM: &str = "admin_token";

pub const MISSING_CREDENTIALS_DETAIL: &str = "Please enter both username and password";
pub const INVALID_CREDENTIALS_DETAIL: &str =
    "Invalid authentication credentials. Please check your username and password.";
pub const NOT_FOUND_DETAIL: &str = "Response not found for the given ID";

/// Username/password pair entered at the credential prompt.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn from_config(config: &AdminCredentialsConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Both fields must be non-empty.
    pub fn validate(&self) -> Result<(), AdminError> {
        if self.username.is_empty() || self.password.expose_secret().is_empty() {
            return Err(AdminError::MissingCredentials {
                detail: MISSING_CREDENTIALS_DETAIL.to_string(),
            });
        }
        Ok(())
    }

    /// Lowercase hex SHA-256 of `"<username>:<password>"`.
    pub fn token(&self) -> String {
        let joined = format!("{}:{}", self.username, self.password.expose_secret());
        hex::encode(Sha256::digest(joined.as_bytes()))
    }
}

/// HTTP client for the admin response viewer endpoint.
pub struct AdminClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl AdminClient {
    /// `base_url` is the endpoint prefix; the response id is appended as a
    /// path segment.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout: config.request_timeout,
            ..Self::new(config.admin_url())
        }
    }

    pub fn response_url(&self, response_id: &str) -> Result<String, AdminError> {
        if response_id.trim().is_empty() {
            return Err(AdminError::MissingResponseId);
        }
        Ok(format!("{}/{}", self.base_url, response_id))
    }

    /// Fetch and parse one stored response.
    pub async fn fetch_response(
        &self,
        response_id: &str,
        credentials: &AdminCredentials,
    ) -> Result<AdminRecord, AdminError> {
        let body = self.fetch_raw(response_id, credentials).await?;
        AdminRecord::from_value(&body)
    }

    /// Fetch one stored response as raw JSON.
    pub async fn fetch_raw(
        &self,
        response_id: &str,
        credentials: &AdminCredentials,
    ) -> Result<Value, AdminError> {
        credentials.validate()?;
        let url = self.response_url(response_id)?;

        let token = credentials.token();
        let mut resp = self
            .send(
                self.client
                    .get(&url)
                    .query(&[(ADMIN_TOKEN_PARAM, token.as_str())]),
            )
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            tracing::info!(response_id, "Token auth rejected; retrying with Basic auth");
            resp = self
                .send(
                    self.client
                        .get(&url)
                        .basic_auth(&credentials.username, Some(credentials.password.expose_secret())),
                )
                .await?;
        }

        if !resp.status().is_success() {
            let err = error_from_response(resp).await;
            tracing::warn!(response_id, status = ?err.status(), error = %err, "Admin fetch failed");
            return Err(err);
        }

        let status = resp.status().as_u16();
        let content_type = content_type(&resp);
        if !content_type.contains("application/json") {
            return Err(AdminError::NonJson {
                status,
                content_type,
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| AdminError::Transport(e.to_string()))?;
        let body: Value = serde_json::from_str(&text).map_err(|e| AdminError::Malformed {
            reason: format!("Invalid JSON in response body: {e}"),
        })?;

        tracing::info!(response_id, "Admin response fetched");
        Ok(body)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, AdminError> {
        let request = request
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };
        request
            .send()
            .await
            .map_err(|e| AdminError::Transport(e.to_string()))
    }
}

fn content_type(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Classify a non-success response, pulling `detail` out of JSON bodies.
async fn error_from_response(resp: reqwest::Response) -> AdminError {
    let status = resp.status().as_u16();
    let content_type = content_type(&resp);
    let text = resp.text().await.unwrap_or_default();

    let detail = if content_type.contains("application/json") {
        serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| body.get("detail").cloned())
            .map(|detail| match detail {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| format!("Request failed with status {status}"))
    } else {
        match status {
            401 => INVALID_CREDENTIALS_DETAIL.to_string(),
            404 => NOT_FOUND_DETAIL.to_string(),
            _ => {
                let shown = if content_type.is_empty() {
                    "unknown format"
                } else {
                    content_type.as_str()
                };
                format!("Request failed with status {status}. Server returned {shown}.")
            }
        }
    };

    match status {
        401 => AdminError::Unauthorized { detail },
        404 => AdminError::NotFound { detail },
        _ => AdminError::Http { status, detail },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_sha256_hex_of_joined_credentials() {
        let creds = AdminCredentials::new("admin", "secret");
        assert_eq!(
            creds.token(),
            "901b281c4e0c4007e8526ef27153b79330811e733976d5e65c8343a39e54ec81"
        );
    }

    #[test]
    fn empty_credentials_are_rejected() {
        for (user, pass) in [("", "secret"), ("admin", ""), ("", "")] {
            let err = AdminCredentials::new(user, pass).validate().unwrap_err();
            assert!(err.is_auth_error());
            assert_eq!(err.detail(), MISSING_CREDENTIALS_DETAIL);
        }
        assert!(AdminCredentials::new("admin", "secret").validate().is_ok());
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", AdminCredentials::new("admin", "hunter2"));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn response_url_requires_id() {
        let client = AdminClient::new("http://host/api/admin/view/response/");
        assert_eq!(
            client.response_url("abc123").unwrap(),
            "http://host/api/admin/view/response/abc123"
        );
        assert!(matches!(client.response_url(" "), Err(AdminError::MissingResponseId)));
    }
}
