//! Record storage collaborators
//!
//! The game owns the record schema (`Records`); a `RecordStore` only moves it
//! in and out of some medium. Failures are reported here and swallowed by the
//! caller: a record that can't be saved is simply not saved.

use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::highscores::Records;

/// Storage backend for best time and leaderboard
pub trait RecordStore {
    fn load_records(&mut self) -> Result<Records, StorageError>;
    fn save_records(&mut self, records: &Records) -> Result<(), StorageError>;
}

/// In-memory store (tests, headless runs without a records file)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub records: Option<Records>,
    /// Make every save fail, to exercise the swallow path
    pub fail_writes: bool,
}

impl RecordStore for MemoryStore {
    fn load_records(&mut self) -> Result<Records, StorageError> {
        Ok(self.records.clone().unwrap_or_default())
    }

    fn save_records(&mut self, records: &Records) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable);
        }
        self.records = Some(records.clone());
        Ok(())
    }
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load_records(&mut self) -> Result<Records, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            // Nothing saved yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Records::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save_records(&mut self, records: &Records) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        log::info!("Records saved to {}", self.path.display());
        Ok(())
    }
}
