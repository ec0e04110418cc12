//! Persistence collaborators for the high-score table.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::scores::ScoreTable;
use crate::sync::Mutex;

/// Errors that can occur while loading or saving a score table.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage I/O failed.
    #[error("score storage i/o failed")]
    Io(#[from] io::Error),
    /// The stored table could not be encoded or decoded.
    #[error("score table encoding failed")]
    Encode(#[from] serde_json::Error),
}

/// A key-value collaborator that persists the high-score table.
///
/// The engine treats persistence as best-effort: a failed load degrades to
/// an empty table and a failed save is logged and dropped, so implementors
/// are free to return errors without affecting gameplay.
pub trait ScoreStore: Send + Sync {
    /// Loads the previously saved table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read or decoded.
    fn load(&self) -> Result<ScoreTable, StoreError>;

    /// Persists the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be encoded or written.
    fn save(&self, table: &ScoreTable) -> Result<(), StoreError>;
}

impl<S: ScoreStore> ScoreStore for std::sync::Arc<S> {
    fn load(&self) -> Result<ScoreTable, StoreError> {
        (**self).load()
    }

    fn save(&self, table: &ScoreTable) -> Result<(), StoreError> {
        (**self).save(table)
    }
}

/// File-backed store encoding the table as JSON.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Path of the backing file.
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<ScoreTable, StoreError> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, table: &ScoreTable) -> Result<(), StoreError> {
        let data = serde_json::to_string(table)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory store for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Last saved table, if any.
    saved: Mutex<Option<ScoreTable>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            saved: Mutex::new(None),
        }
    }

    /// Returns a copy of the last saved table, if any.
    #[must_use]
    pub fn saved(&self) -> Option<ScoreTable> {
        self.saved.lock().clone()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<ScoreTable, StoreError> {
        Ok(self.saved.lock().clone().unwrap_or_default())
    }

    fn save(&self, table: &ScoreTable) -> Result<(), StoreError> {
        *self.saved.lock() = Some(table.clone());
        Ok(())
    }
}
