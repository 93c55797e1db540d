//! File-backed session persistence.
//!
//! The desktop/test counterpart of the browser's per-origin storage: one
//! JSON snapshot under a fixed file name inside a base directory. Writes
//! use a write-to-temp-then-rename pattern so a crash mid-write never
//! leaves a truncated snapshot behind.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;

use crate::domain::session::{PersistenceError, SessionPersistence};

/// Fixed storage key, as a file name.
const SESSION_FILE_NAME: &str = "campus_portal_session.json";

/// Session persistence stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionPersistence {
    base_path: PathBuf,
}

impl FileSessionPersistence {
    /// Creates a persistence rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn session_path(&self) -> PathBuf {
        self.base_path.join(SESSION_FILE_NAME)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join(format!("{SESSION_FILE_NAME}.tmp"))
    }
}

impl SessionPersistence for FileSessionPersistence {
    fn load(&self) -> Result<Option<Value>, PersistenceError> {
        let raw = match fs::read_to_string(self.session_path()) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(PersistenceError::io(err.to_string())),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| PersistenceError::Deserialization(err.to_string()))
    }

    fn save(&self, snapshot: &Value) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.base_path).map_err(|err| PersistenceError::io(err.to_string()))?;

        let raw = serde_json::to_string(snapshot)
            .map_err(|err| PersistenceError::Serialization(err.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, raw).map_err(|err| PersistenceError::io(err.to_string()))?;
        fs::rename(&temp, self.session_path())
            .map_err(|err| PersistenceError::io(err.to_string()))
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(PersistenceError::io(err.to_string())),
        }
    }
}
