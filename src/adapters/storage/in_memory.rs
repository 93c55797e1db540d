//! In-memory session persistence for testing.

use std::sync::Mutex;

use serde_json::Value;

use crate::domain::session::{PersistenceError, SessionPersistence};

/// Persistence double holding the snapshot in memory.
///
/// Can be pre-seeded for rehydration tests and inspected for assertions.
#[derive(Debug, Default)]
pub struct InMemorySessionPersistence {
    snapshot: Mutex<Option<Value>>,
    fail_writes: Mutex<bool>,
}

impl InMemorySessionPersistence {
    /// Creates an empty persistence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the stored snapshot.
    pub fn with_snapshot(self, snapshot: Value) -> Self {
        *self.snapshot.lock().unwrap() = Some(snapshot);
        self
    }

    /// Makes every `save` and `clear` fail, for error-path tests.
    pub fn with_failing_writes(self) -> Self {
        *self.fail_writes.lock().unwrap() = true;
        self
    }

    /// Returns the stored snapshot.
    pub fn stored(&self) -> Option<Value> {
        self.snapshot.lock().unwrap().clone()
    }
}

impl SessionPersistence for InMemorySessionPersistence {
    fn load(&self) -> Result<Option<Value>, PersistenceError> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    fn save(&self, snapshot: &Value) -> Result<(), PersistenceError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(PersistenceError::io("simulated write failure"));
        }
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(PersistenceError::io("simulated write failure"));
        }
        *self.snapshot.lock().unwrap() = None;
        Ok(())
    }
}
