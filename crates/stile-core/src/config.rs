//! Configuration management for Stile.
//!
//! Loads configuration from ${STILE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Stile configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the authentication service.
    pub auth_base_url: String,
    /// Route to land on after sign-in when no earlier route was recorded.
    pub default_route: String,
    /// Timeout for the sign-in request, in seconds. 0 disables it.
    pub request_timeout_secs: u64,
}

impl Config {
    const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:3000";
    const DEFAULT_ROUTE: &str = "/dashboard";
    /// Default is disabled
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 0;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Initializes a config file at the given path with the default template.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Resolves the auth service base URL.
    ///
    /// The STILE_AUTH_URL environment variable wins over the config file.
    pub fn effective_auth_base_url(&self) -> String {
        match std::env::var("STILE_AUTH_URL") {
            Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => self.auth_base_url.clone(),
        }
    }

    /// Returns the sign-in request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Atomically writes config content (tmp file + rename).
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_base_url: Self::DEFAULT_AUTH_BASE_URL.to_string(),
            default_route: Self::DEFAULT_ROUTE.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

pub mod paths {
    //! Path resolution for Stile configuration and data directories.
    //!
    //! STILE_HOME resolution order:
    //! 1. STILE_HOME environment variable (if set)
    //! 2. ~/.config/stile (default)

    use std::path::PathBuf;

    /// Returns the Stile home directory.
    ///
    /// Checks STILE_HOME env var first, falls back to ~/.config/stile
    pub fn stile_home() -> PathBuf {
        if let Ok(home) = std::env::var("STILE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("stile"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        stile_home().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.auth_base_url, "http://localhost:3000");
        assert_eq!(config.default_route, "/dashboard");
        assert_eq!(config.request_timeout_secs, 0);
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "auth_base_url = \"https://auth.example.test\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.auth_base_url, "https://auth.example.test");
        assert_eq!(config.default_route, "/dashboard");
    }

    /// Config loading: invalid TOML is an error, not a silent default.
    #[test]
    fn test_load_invalid_toml_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "default_route = [broken").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }

    /// Config init: creates file with defaults, creates parent dirs.
    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("auth_base_url ="));
        assert!(contents.contains("# request_timeout_secs ="));
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    /// The embedded template parses back to the built-in defaults.
    #[test]
    fn test_template_matches_defaults() {
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    /// Timeout of zero means no client-side timeout.
    #[test]
    fn test_request_timeout_disabled_at_zero() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), None);

        let config = Config {
            request_timeout_secs: 30,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }
}
