//! Core Stile library (auth client, session flow, routing, config).

pub mod auth;
pub mod config;
pub mod routing;
pub mod session;
