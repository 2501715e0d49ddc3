//! Authentication service client.
//!
//! Talks to the `POST /auth/sign-in` endpoint and turns its responses into
//! typed values: a raw status/body pair on the wire level, a structured
//! [`AuthError`] for transport and parse failures, and field-scoped messages
//! for rejections via [`interpret_rejection`].

mod client;
mod errors;

pub use client::{AuthClient, SIGN_IN_PATH, SignInResponse};
pub use errors::{AuthError, AuthErrorKind, FORM_SCOPE, FieldError, interpret_rejection};
