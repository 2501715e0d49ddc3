//! Sign-in command handler.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use stile_core::auth::AuthClient;
use stile_core::config::Config;
use stile_core::routing::Navigator;
use stile_core::session::{SessionState, SessionStore, SignInContext, SignInForm, SignInOutcome};

pub async fn run(
    config: &Config,
    username: Option<String>,
    password: Option<String>,
    from: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(value) => value,
        None => prompt("Username: ")?,
    };
    let password = match password {
        Some(value) => value,
        None => prompt("Password: ")?,
    };

    if username.is_empty() {
        anyhow::bail!("Username must not be empty");
    }
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let mut cx = SignInContext {
        client: AuthClient::from_config(config).context("configure auth client")?,
        store: SessionStore::default(),
        navigator: Navigator::from_config(config),
    };
    if let Some(route) = from {
        cx.navigator.record_redirect_from(route);
    }

    let mut state = SessionState::new(SignInForm { username, password });

    match state.sign_in(&mut cx).await? {
        SignInOutcome::Success { destination } => {
            println!("✓ Signed in as {}", state.form.username);
            println!("  Session: {}", cx.store.path().display());
            println!("  Continue at: {destination}");
            Ok(())
        }
        SignInOutcome::Rejected => {
            for (field, message) in &state.field_errors {
                eprintln!("{field}: {message}");
            }
            anyhow::bail!("Sign-in rejected");
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("read from stdin")?;

    Ok(input.trim().to_string())
}
