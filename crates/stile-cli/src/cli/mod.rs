//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use stile_core::config;

mod commands;

#[derive(Parser)]
#[command(name = "stile")]
#[command(version = "0.1")]
#[command(about = "Sign-in and session gate for the component dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and store the session token
    SignIn {
        /// Username for the sign-in form (prompted for when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password for the sign-in form (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Route originally requested before being sent to sign-in
        #[arg(long, value_name = "ROUTE")]
        from: Option<String>,
    },

    /// Sign out and remove the stored session
    SignOut,

    /// Open a route, enforcing the session guard
    Open {
        /// Route path to open
        #[arg(value_name = "ROUTE")]
        route: String,
    },

    /// Show the stored session
    Status,

    /// List known routes and their access level
    Routes,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Sends log output to stderr, keeping stdout for command output.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;
    tracing::debug!(auth_base_url = %config.effective_auth_base_url(), "config loaded");

    match cli.command {
        Commands::SignIn {
            username,
            password,
            from,
        } => commands::sign_in::run(&config, username, password, from).await,
        Commands::SignOut => commands::session::sign_out(),
        Commands::Open { route } => commands::session::open(&config, &route),
        Commands::Status => commands::session::status(),
        Commands::Routes => commands::routes::run(),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Show => commands::config::show(&config),
        },
    }
}
