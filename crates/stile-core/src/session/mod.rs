//! Sign-in session state machine.
//!
//! [`SessionState`] owns the form, the in-flight flag, and the field error
//! map. The flow itself holds no globals: every collaborator (auth client,
//! session store, navigator) is handed in through [`SignInContext`], so the
//! whole state machine can run against a mock endpoint and a temp directory.

mod store;

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::auth::{AuthClient, AuthError, interpret_rejection};
use crate::routing::Navigator;

pub use store::{SessionStore, StoredSession, mask_token};

/// Credentials bound to the sign-in form. Also the wire body of the request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignInForm {
    pub username: String,
    pub password: String,
}

/// Mutable state of one sign-in session.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Current form contents.
    pub form: SignInForm,
    /// True from request dispatch until the response has been handled.
    pub in_flight: bool,
    /// Field path (`signInForm.<field>`) to display message.
    pub field_errors: BTreeMap<String, String>,
}

/// Collaborators the sign-in flow acts on.
pub struct SignInContext {
    pub client: AuthClient,
    pub store: SessionStore,
    pub navigator: Navigator,
}

/// How a completed sign-in attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Credentials accepted: the session is stored and navigation resolved.
    Success { destination: String },
    /// Credentials rejected: field errors are recorded on the state.
    Rejected,
}

impl SessionState {
    /// Creates a session state around a filled-in form.
    pub fn new(form: SignInForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    /// Runs one sign-in attempt against the given collaborators.
    ///
    /// On 200 the token is extracted, the session persisted with a 12-hour
    /// expiry, and navigation resolves to the recorded origin route or the
    /// navigator's default. On any other status the body is interpreted
    /// into `field_errors` and the attempt counts as [`SignInOutcome::Rejected`].
    /// Transport and parse failures are errors, not rejections.
    pub async fn sign_in(&mut self, cx: &mut SignInContext) -> Result<SignInOutcome> {
        self.field_errors.clear();
        self.in_flight = true;
        tracing::debug!(username = %self.form.username, "sign-in submitted");

        // The await result is bound, not propagated: in_flight must come
        // back down on every exit path, transport failures included.
        let result = cx.client.submit(&self.form).await;

        let outcome = match result {
            Ok(response) if response.status == 200 => self.accept(cx, &response.body),
            Ok(response) => Ok(self.reject(response.status, &response.body)),
            Err(err) => Err(err).context("Sign-in request failed"),
        };

        self.in_flight = false;
        outcome
    }

    /// Success path: extract the token, persist the session, navigate.
    fn accept(&self, cx: &mut SignInContext, body: &Value) -> Result<SignInOutcome> {
        let Some(token) = body.get("token").and_then(Value::as_str) else {
            let err = AuthError::parse("Success response carries no token", body.to_string());
            return Err(err.into());
        };

        let session = StoredSession::issue(token);
        cx.store.save(&session).context("Failed to persist session")?;
        tracing::info!(username = %self.form.username, "signed in");

        let destination = cx.navigator.post_sign_in_destination();
        cx.navigator.navigate(&destination);

        Ok(SignInOutcome::Success { destination })
    }

    /// Rejection path: record field-scoped messages for display.
    fn reject(&mut self, status: u16, body: &Value) -> SignInOutcome {
        let errors = interpret_rejection(body);
        tracing::debug!(status, fields = errors.len(), "sign-in rejected");

        for error in errors {
            self.field_errors.insert(error.path, error.message);
        }

        SignInOutcome::Rejected
    }
}
