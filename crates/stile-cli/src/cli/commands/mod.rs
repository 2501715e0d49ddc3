//! CLI command handlers.

pub mod config;
pub mod routes;
pub mod session;
pub mod sign_in;
