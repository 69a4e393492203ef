//! Durable session storage — one slot, one record.
//!
//! DESIGN
//! ======
//! The browser build of the storefront kept the token and user under two
//! localStorage keys; here the record is a single JSON document so it can
//! only be read back whole. A partial record (token without user or the
//! reverse) fails deserialization and is reported as corrupt, which the
//! controller answers by clearing the slot.
//!
//! ERROR HANDLING
//! ==============
//! `load` never panics on bad data. Corruption is a distinct error so the
//! caller can clear-and-continue without surfacing anything to the user.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::net::types::UserIdentity;

/// The durable record that lets a session survive a restart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub user: UserIdentity,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),
}

/// Single-slot durable storage for the current session.
pub trait SessionStorage: Send + Sync {
    /// Replace the slot with `record`.
    fn save(&self, record: &PersistedSession) -> Result<(), StorageError>;

    /// Read the slot. `Ok(None)` when empty; `Corrupt` when a record is
    /// present but unreadable as a whole.
    fn load(&self) -> Result<Option<PersistedSession>, StorageError>;

    /// Empty the slot. Idempotent.
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON document at a caller-chosen path.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileSessionStorage {
    fn save(&self, record: &PersistedSession) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(record)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage for tests and sessions that should not outlive the
/// process. Holds the raw JSON so corrupt payloads can be injected.
#[derive(Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an arbitrary payload in the slot, bypassing serialization.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.slot.lock().unwrap() = Some(raw.into());
    }
}

impl SessionStorage for MemorySessionStorage {
    fn save(&self, record: &PersistedSession) -> Result<(), StorageError> {
        let json = serde_json::to_string(record)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        *self.slot.lock().unwrap() = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        let slot = self.slot.lock().unwrap();
        let Some(raw) = slot.as_deref() else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
