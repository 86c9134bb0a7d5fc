use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Well-known key the credential token is stored under
pub const TOKEN_KEY: &str = "authToken";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Session storage unavailable: {0}")]
    Unavailable(String),
}

/// What survives a restart: exactly one token plus its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(rename = "authToken")]
    pub token: String,
    #[serde(rename = "userLabel", default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
}

/// Durable home for the credential token.
///
/// Methods may block; [`SessionStore`](super::SessionStore) calls them on
/// tokio's blocking pool.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// `Ok(None)` when nothing is stored
    fn load(&self) -> Result<Option<PersistedSession>, SessionError>;

    fn save(&self, session: &PersistedSession) -> Result<(), SessionError>;

    /// Removing an absent token is not an error
    fn clear(&self) -> Result<(), SessionError>;
}

/// JSON file in the CLI config directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub const FILE_NAME: &'static str = "session.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<PersistedSession>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let session: PersistedSession = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    fn save(&self, session: &PersistedSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Process-local store; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<PersistedSession>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<PersistedSession>, SessionError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), SessionError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;
        *slot = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_under_well_known_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::in_dir(dir.path());
        assert_eq!(store.load().unwrap(), None);

        store
            .save(&PersistedSession {
                token: "tok-1".into(),
                user_label: Some("Admin".into()),
            })
            .unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw[TOKEN_KEY], "tok-1");

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::in_dir(dir.path());
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(SessionError::Encode(_))));
    }
}
