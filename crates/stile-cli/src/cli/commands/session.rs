//! Session inspection and teardown commands.

use anyhow::Result;
use stile_core::config::Config;
use stile_core::routing::{GuardVerdict, Navigator};
use stile_core::session::{SessionStore, mask_token};

/// Shows the stored session, if any.
pub fn status() -> Result<()> {
    let store = SessionStore::default();

    match store.load()? {
        Some(session) => {
            let state = if session.is_expired() { "expired" } else { "valid" };
            println!("Signed in (token: {})", mask_token(&session.token));
            println!("  Expires: {} ({state})", session.expires_at.to_rfc3339());
            println!("  Session: {}", store.path().display());
        }
        None => println!("Not signed in."),
    }

    Ok(())
}

/// Removes the stored session.
pub fn sign_out() -> Result<()> {
    let store = SessionStore::default();

    if store.clear()? {
        println!("✓ Signed out.");
    } else {
        println!("Not signed in.");
    }

    Ok(())
}

/// Opens a route through the session guard.
pub fn open(config: &Config, route: &str) -> Result<()> {
    let store = SessionStore::default();
    let session = store.load()?;

    let mut navigator = Navigator::from_config(config);
    match navigator.request(route, session.as_ref()) {
        GuardVerdict::Allowed => {
            println!("✓ Opened {}", navigator.current());
        }
        GuardVerdict::Bounced => {
            println!("Sign-in required for {route}");
            println!("  Run `stile sign-in --from {route}` to continue there afterwards.");
        }
    }

    Ok(())
}
