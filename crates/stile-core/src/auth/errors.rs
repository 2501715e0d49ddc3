use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of auth client errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    /// Connection-level failure (DNS, refused, TLS, dropped mid-body)
    Transport,
    /// Connection timeout or request timeout
    Timeout,
    /// Failed to parse response (JSON parse error, missing token)
    Parse,
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthErrorKind::Transport => write!(f, "transport"),
            AuthErrorKind::Timeout => write!(f, "timeout"),
            AuthErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the auth client with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthError {
    /// Error category
    pub kind: AuthErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw response body)
    pub details: Option<String>,
}

impl AuthError {
    /// Creates a new auth error.
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a parse error carrying the offending payload.
    pub fn parse(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            kind: AuthErrorKind::Parse,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Classifies a reqwest failure into the timeout/transport split.
    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::new(AuthErrorKind::Timeout, format!("Request timed out: {e}"))
        } else if e.is_connect() {
            Self::new(AuthErrorKind::Transport, format!("Connection failed: {e}"))
        } else {
            Self::new(AuthErrorKind::Transport, format!("Network error: {e}"))
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

/// Form-wide key used when a rejection cannot be tied to one field.
pub const FORM_SCOPE: &str = "signInForm";

/// Message recorded when a rejection body carries nothing usable.
const GENERIC_REJECTION: &str = "Sign-in was rejected by the authentication service";

/// Field-identifier token convention used by the legacy endpoint: one or
/// more `#` characters, a field name, and an optional `(qualifier)` naming
/// the violated rule. The qualifier stays out of the field path.
static FIELD_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#+([A-Za-z0-9_]+)(?:\([A-Za-z0-9_]+\))?").expect("field token pattern compiles")
});

/// One field-scoped message extracted from a rejection body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, e.g. `signInForm.username`.
    pub path: String,
    /// Human-readable message for display next to the field.
    pub message: String,
}

impl FieldError {
    fn form_wide(message: impl Into<String>) -> Self {
        Self {
            path: FORM_SCOPE.to_string(),
            message: message.into(),
        }
    }
}

/// Interprets a non-200 response body as field errors.
///
/// Three sources are tried in order:
/// 1. a structured `errors` array of `{ field, message }` objects,
/// 2. a `message` string carrying a `#field` token (first token only),
/// 3. a form-wide fallback so a rejection never comes back empty.
pub fn interpret_rejection(body: &Value) -> Vec<FieldError> {
    if let Some(entries) = body.get("errors").and_then(Value::as_array) {
        let structured: Vec<FieldError> = entries
            .iter()
            .filter_map(|entry| {
                let field = entry.get("field").and_then(Value::as_str)?;
                let message = entry.get("message").and_then(Value::as_str)?;
                Some(FieldError {
                    path: format!("{FORM_SCOPE}.{field}"),
                    message: message.to_string(),
                })
            })
            .collect();
        if !structured.is_empty() {
            return structured;
        }
    }

    match body.get("message").and_then(Value::as_str) {
        Some(message) => vec![extract_field_error(message)],
        None => {
            tracing::warn!("rejection body has no usable message, recording form-wide");
            vec![FieldError::form_wide(GENERIC_REJECTION)]
        }
    }
}

/// Extracts one field error from a legacy `#field message` string.
///
/// The field path drops the leading `#`s and any `(qualifier)`; the display
/// message drops the whole token plus one trailing space. A message with no
/// token lands on the form-wide key unchanged.
fn extract_field_error(message: &str) -> FieldError {
    let Some(caps) = FIELD_TOKEN.captures(message) else {
        tracing::warn!("rejection message has no field token, recording form-wide");
        return FieldError::form_wide(message);
    };

    let token = caps.get(0).map_or("", |m| m.as_str());
    let field = caps.get(1).map_or("", |m| m.as_str());

    FieldError {
        path: format!("{FORM_SCOPE}.{field}"),
        message: message.replacen(&format!("{token} "), "", 1),
    }
}
