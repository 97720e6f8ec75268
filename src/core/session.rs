//! Session storage
//!
//! The authenticated session (token plus user identity) is persisted under a
//! fixed filename in the carteira home directory, read at startup to decide
//! authenticated state, and removed on logout. `CARTEIRA_HOME` overrides the
//! platform config directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

const SESSION_FILE: &str = "session.yaml";

/// An authenticated session as issued by the account gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no home directory available for session storage (set CARTEIRA_HOME)")]
    NoHome,

    #[error("failed to write session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode session: {0}")]
    Encode(String),
}

/// File-backed session store.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open the store at the default location: `$CARTEIRA_HOME`, or the
    /// platform config directory.
    pub fn open() -> Result<Self, SessionError> {
        let home = crate::core::config::carteira_home().ok_or(SessionError::NoHome)?;
        Ok(Self { path: home.join(SESSION_FILE) })
    }

    /// Load the current session, if one exists. A missing or unreadable
    /// file means "not authenticated"; corrupt files are treated the same.
    pub fn load(&self) -> Option<AuthSession> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        serde_yml::from_str(&contents).ok()
    }

    /// Persist a session, replacing any existing one.
    pub fn save(&self, session: &AuthSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yml::to_string(session).map_err(|e| SessionError::Encode(e.to_string()))?;
        std::fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// Remove the stored session. Clearing an already-absent session is not
    /// an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore { path: dir.path().join(SESSION_FILE) }
    }

    fn sample_session() -> AuthSession {
        AuthSession {
            token: "tok-123".to_string(),
            user_id: "user-1".to_string(),
            email: "jo@example.com".to_string(),
            name: "Jo Silva".to_string(),
            created: Utc::now(),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let session = sample_session();

        store.save(&session).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.token, session.token);
        assert_eq!(loaded.email, session.email);
    }

    #[test]
    fn test_load_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(store_in(&tmp).load().is_none());
    }

    #[test]
    fn test_load_corrupt_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(store.path(), ": not yaml [").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_clear_removes_session() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.save(&sample_session()).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        // Clearing again is fine
        store.clear().unwrap();
    }
}
