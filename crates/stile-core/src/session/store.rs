//! Durable session storage.
//!
//! The signed-in session lives in `session.json` under the Stile home
//! directory, written with restricted permissions. Tokens are masked
//! whenever they are displayed.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths;

const SESSION_FILE: &str = "session.json";

/// How long a session stays valid after sign-in.
const SESSION_TTL_HOURS: i64 = 12;

/// A stored sign-in session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    /// Opaque bearer token issued by the auth endpoint.
    pub token: String,
    /// Expiry timestamp (ISO-8601 on disk). The field keeps its historical
    /// storage key.
    #[serde(rename = "expiresIn")]
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    /// Issues a session expiring 12 hours from now.
    pub fn issue(token: impl Into<String>) -> Self {
        Self::issue_at(token, Utc::now())
    }

    /// Issues a session expiring 12 hours after the given instant.
    pub fn issue_at(token: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Returns true if the session has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry check against an explicit instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    // Counted in chars: the token is opaque and may not be ASCII.
    if token.chars().count() <= 16 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(12).collect();
    format!("{prefix}...")
}

/// File-backed store for the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Returns the default path of the session file.
    pub fn default_path() -> PathBuf {
        paths::stile_home().join(SESSION_FILE)
    }

    /// Creates a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session from disk.
    /// Returns `None` if no session file exists.
    pub fn load(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        Ok(Some(session))
    }

    /// Saves the session to disk.
    pub fn save(&self, session: &StoredSession) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        tracing::debug!(path = %self.path.display(), "session written");

        Ok(())
    }

    /// Removes the stored session.
    /// Returns true if a session file was deleted.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;

        Ok(true)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}
