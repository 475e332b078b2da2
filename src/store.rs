use crate::domain::{self, parse_edit_input, ApplicationRecord};
use crate::persistence::{atomic_write, parse_records, read_file, serialize_records};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Non-fatal persistence failures. In-memory state is never rolled back.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not load previous data: {0:#}")]
    Load(anyhow::Error),
    /// The mutation was applied in memory but the file may be stale
    #[error("Could not save data: {0:#}")]
    Save(anyhow::Error),
}

/// Owns the application records and their backing JSON file
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<ApplicationRecord>,
    #[cfg(test)]
    saves: std::cell::Cell<usize>,
}

impl RecordStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: Vec::new(),
            #[cfg(test)]
            saves: std::cell::Cell::new(0),
        }
    }

    /// Number of completed saves since construction
    #[cfg(test)]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record with the greatest timestamp
    pub fn latest(&self) -> Option<&ApplicationRecord> {
        domain::latest(&self.records)
    }

    pub fn get(&self, id: Uuid) -> Option<&ApplicationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Replace the in-memory records with the file contents.
    /// Missing or blank files leave the records untouched.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let content = read_file(&self.path).map_err(StoreError::Load)?;
        if content.trim().is_empty() {
            debug!(path = %self.path.display(), "no stored records");
            return Ok(());
        }

        self.records = parse_records(&content).map_err(StoreError::Load)?;
        info!(count = self.records.len(), "loaded records");
        Ok(())
    }

    /// Overwrite the backing file with the whole record list
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serialize_records(&self.records).map_err(StoreError::Save)?;
        atomic_write(&self.path, &json).map_err(StoreError::Save)?;
        #[cfg(test)]
        self.saves.set(self.saves.get() + 1);
        debug!(count = self.records.len(), "saved records");
        Ok(())
    }

    /// Append a record and save. On `Err` the record is still kept in memory.
    pub fn add(&mut self, timestamp: DateTime<Local>) -> Result<Uuid, StoreError> {
        let record = ApplicationRecord::new(timestamp);
        let id = record.id;
        self.records.push(record);
        self.save()?;
        Ok(id)
    }

    /// Set a record's time from `MM/dd/yyyy HH:mm` input.
    ///
    /// Unparseable input and unknown ids are discarded silently with `Ok(None)`.
    /// Returns the new timestamp when the record was changed.
    pub fn update(&mut self, id: Uuid, input: &str) -> Result<Option<DateTime<Local>>, StoreError> {
        let Some(timestamp) = parse_edit_input(input) else {
            debug!(input, "discarding unparseable edit");
            return Ok(None);
        };

        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            debug!(%id, "discarding edit of unknown record");
            return Ok(None);
        };

        record.timestamp = timestamp;
        self.save()?;
        Ok(Some(timestamp))
    }

    /// Remove one record by identity. Returns false (and skips saving) if it isn't present.
    pub fn remove(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        self.records.remove(index);
        self.save()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        self.save()
    }
}
