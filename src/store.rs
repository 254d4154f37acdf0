use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::record::RawTaskRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no task with id {0}")]
    NotFound(String),
}

/// The task-source collaborator: a snapshot of raw records for the current
/// user, plus mutations keyed by task id. The view engine never calls this
/// directly; it only reads snapshots the caller fetched.
pub trait TaskStore {
    fn snapshot(&self) -> Result<Vec<RawTaskRecord>, StoreError>;

    /// Snapshot scoped to one owner. Ownership filtering happens here, before
    /// any record reaches the view engine.
    fn snapshot_for(&self, owner_id: &str) -> Result<Vec<RawTaskRecord>, StoreError> {
        let mut records = self.snapshot()?;
        records.retain(|r| r.user_id == owner_id);
        Ok(records)
    }

    /// Persist a new record, assigning an id if the record carries none.
    /// Returns the stored id.
    fn create(&mut self, record: RawTaskRecord) -> Result<String, StoreError>;

    /// Replace the record with the same id.
    fn update(&mut self, record: RawTaskRecord) -> Result<(), StoreError>;

    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

/// File-backed store: one JSON array of raw records. A missing or corrupt
/// file reads as an empty collection so a damaged snapshot never blocks the
/// app from starting.
pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, records: &[RawTaskRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl TaskStore for JsonTaskStore {
    fn snapshot(&self) -> Result<Vec<RawTaskRecord>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(records) => Ok(records),
            Err(e) => {
                log::error!("corrupt task snapshot at {}: {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    fn create(&mut self, mut record: RawTaskRecord) -> Result<String, StoreError> {
        if record.id.is_empty() {
            record.id = Uuid::new_v4().to_string();
        }
        let id = record.id.clone();
        let mut records = self.snapshot()?;
        records.push(record);
        self.save(&records)?;
        Ok(id)
    }

    fn update(&mut self, record: RawTaskRecord) -> Result<(), StoreError> {
        let mut records = self.snapshot()?;
        let Some(slot) = records.iter_mut().find(|r| r.id == record.id) else {
            return Err(StoreError::NotFound(record.id));
        };
        *slot = record;
        self.save(&records)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let mut records = self.snapshot()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.save(&records)
    }
}
