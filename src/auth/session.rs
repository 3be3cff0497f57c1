use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session file name in the cache directory
const SESSION_FILE: &str = "session.json";

/// Token expiry time in minutes.
/// Active Tigger servers issue access tokens valid for 60 minutes.
const TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Buffer time before expiry to warn the user (5 minutes)
const TOKEN_REFRESH_BUFFER_MINUTES: i64 = 5;

/// An authenticated session: identity and bearer token, always together.
///
/// The token was used to fetch this identity, so the two are mutually
/// consistent by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn is_expired(&self) -> bool {
        let expiry = self.created_at + Duration::minutes(TOKEN_EXPIRY_MINUTES);
        Utc::now() > expiry
    }

    /// Check if the session will expire soon
    pub fn expires_soon(&self) -> bool {
        let warn_at = self.created_at
            + Duration::minutes(TOKEN_EXPIRY_MINUTES - TOKEN_REFRESH_BUFFER_MINUTES);
        Utc::now() > warn_at
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> i64 {
        let expiry = self.created_at + Duration::minutes(TOKEN_EXPIRY_MINUTES);
        (expiry - Utc::now()).num_minutes().max(0)
    }
}

/// Holder of the current session, if any.
///
/// This is the single source of truth for "is a user logged in": `data` is
/// either fully present or fully absent, never partially populated.
pub struct Session {
    state_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(state_dir: PathBuf) -> Self {
        Self {
            state_dir,
            data: None,
        }
    }

    /// Load a persisted session from disk. Expired sessions are ignored.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            let data: SessionData =
                serde_json::from_str(&contents).context("Failed to parse session file")?;

            if !data.is_expired() {
                self.data = Some(data);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Invalidate the session client-side.
    ///
    /// The on-disk copy is removed before the in-memory state is dropped, so
    /// a failed removal leaves the session untouched. Clearing an absent
    /// session is a no-op.
    pub fn clear(&mut self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session file")?;
        }
        self.data = None;
        Ok(())
    }

    /// Replace the session with freshly confirmed data
    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// Get the bearer token if a session is present
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    /// Get the authenticated username if a session is present
    pub fn username(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.username.as_str())
    }

    /// Check if a session is present and not expired
    pub fn is_valid(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_expired()).unwrap_or(false)
    }

    fn session_path(&self) -> PathBuf {
        self.state_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data(created_at: DateTime<Utc>) -> SessionData {
        SessionData {
            token: "tok123".to_string(),
            username: "alice".to_string(),
            status: Some("manager".to_string()),
            created_at,
        }
    }

    fn temp_session() -> Session {
        let dir = std::env::temp_dir().join(format!(
            "tigger-session-test-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        Session::new(dir)
    }

    #[test]
    fn test_fresh_session_is_valid() {
        let data = sample_data(Utc::now());
        assert!(!data.is_expired());
        assert!(!data.expires_soon());
        assert!(data.minutes_until_expiry() > 50);
    }

    #[test]
    fn test_old_session_is_expired() {
        let data = sample_data(Utc::now() - Duration::minutes(TOKEN_EXPIRY_MINUTES + 1));
        assert!(data.is_expired());
        assert_eq!(data.minutes_until_expiry(), 0);
    }

    #[test]
    fn test_session_near_expiry_warns_but_is_valid() {
        let data = sample_data(Utc::now() - Duration::minutes(TOKEN_EXPIRY_MINUTES - 2));
        assert!(!data.is_expired());
        assert!(data.expires_soon());
    }

    #[test]
    fn test_session_all_or_nothing() {
        let mut session = temp_session();
        assert!(session.data.is_none());
        assert!(session.token().is_none());
        assert!(session.username().is_none());
        assert!(!session.is_valid());

        session.update(sample_data(Utc::now()));
        assert_eq!(session.token(), Some("tok123"));
        assert_eq!(session.username(), Some("alice"));
        assert!(session.is_valid());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut session = temp_session();
        // Clearing with no session and no file is a no-op
        session.clear().expect("Clear of absent session should succeed");
        assert!(session.data.is_none());

        session.update(sample_data(Utc::now()));
        session.clear().expect("Clear should succeed");
        assert!(session.data.is_none());
        session.clear().expect("Second clear should still succeed");
    }

    #[test]
    fn test_clear_failure_leaves_session_in_memory() {
        let mut session = temp_session();
        session.update(sample_data(Utc::now()));

        // A non-empty directory where the session file should be makes
        // removal fail
        let path = session.state_dir.join(SESSION_FILE);
        std::fs::create_dir_all(path.join("blocker")).expect("Failed to set up blocker");

        assert!(session.clear().is_err());
        assert!(session.data.is_some());
        assert_eq!(session.token(), Some("tok123"));

        std::fs::remove_dir_all(&path).expect("Cleanup failed");
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut session = temp_session();
        session.update(sample_data(Utc::now()));
        session.save().expect("Save should succeed");

        let mut restored = Session::new(session.state_dir.clone());
        assert!(restored.load().expect("Load should succeed"));
        assert_eq!(restored.token(), Some("tok123"));
        assert_eq!(restored.username(), Some("alice"));

        session.clear().expect("Cleanup failed");
    }

    #[test]
    fn test_expired_session_not_loaded() {
        let mut session = temp_session();
        session.update(sample_data(
            Utc::now() - Duration::minutes(TOKEN_EXPIRY_MINUTES + 10),
        ));
        session.save().expect("Save should succeed");

        let mut restored = Session::new(session.state_dir.clone());
        assert!(!restored.load().expect("Load should succeed"));
        assert!(restored.data.is_none());

        session.clear().expect("Cleanup failed");
    }
}
