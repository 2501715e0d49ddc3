use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

use super::errors::AuthError;
use crate::config::Config;
use crate::session::SignInForm;

/// Path of the sign-in endpoint, relative to the configured base URL.
pub const SIGN_IN_PATH: &str = "/auth/sign-in";

/// Raw outcome of a sign-in request, before interpretation.
#[derive(Debug, Clone)]
pub struct SignInResponse {
    /// HTTP status code returned by the endpoint.
    pub status: u16,
    /// Parsed response body. `Null` when a rejection body was not JSON.
    pub body: Value,
}

/// HTTP client for the authentication service.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Creates a client for the given base URL with an optional request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).with_context(|| format!("Invalid auth base URL: {base_url}"))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.effective_auth_base_url(), config.request_timeout())
    }

    /// Submits the sign-in form and returns the status plus parsed body.
    ///
    /// A 200 must carry a JSON body. Rejection bodies are parsed tolerantly
    /// so the caller can still produce a deterministic fallback when the
    /// endpoint returns garbage.
    pub async fn submit(&self, form: &SignInForm) -> Result<SignInResponse, AuthError> {
        let url = format!("{}{SIGN_IN_PATH}", self.base_url);
        tracing::debug!(%url, "submitting sign-in form");

        let response = self
            .http
            .post(&url)
            .json(form)
            .send()
            .await
            .map_err(AuthError::from_transport)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(AuthError::from_transport)?;

        let body = if status == 200 {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) => {
                    return Err(AuthError::parse(
                        format!("Success response is not JSON: {e}"),
                        text,
                    ));
                }
            }
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };

        Ok(SignInResponse { status, body })
    }
}
