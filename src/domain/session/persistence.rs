//! Session persistence trait - how the store survives reloads.
//!
//! The store persists a subset of its state (profile and tokens, never
//! the pending email) under a fixed key. Implementations live in the
//! adapters layer; the store only sees this trait. Operations are
//! synchronous because store mutations are synchronous.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while persisting or loading session state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize session state: {0}")]
    Serialization(String),

    #[error("Failed to deserialize session state: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl PersistenceError {
    /// Creates an IO error with a message.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }
}

/// Persists the session snapshot across process restarts.
///
/// # Contract
///
/// - `load` returns `Ok(None)` when nothing has been persisted yet.
/// - `save` replaces the stored snapshot wholesale.
/// - `clear` removes the snapshot; clearing an empty store is not an error.
///
/// Loaded snapshots are raw, untrusted JSON; the session store passes
/// them back through shape validation before accepting them.
pub trait SessionPersistence: Send + Sync {
    /// Loads the raw persisted snapshot, if any.
    fn load(&self) -> Result<Option<Value>, PersistenceError>;

    /// Replaces the persisted snapshot.
    fn save(&self, snapshot: &Value) -> Result<(), PersistenceError>;

    /// Removes the persisted snapshot.
    fn clear(&self) -> Result<(), PersistenceError>;
}
