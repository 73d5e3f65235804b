//! Single-document repository
//!
//! Used for data that is one value rather than a list: the cash balance with
//! today's spend log, and the application state.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::JournalError;

use super::file_io::{read_json, write_json_atomic};

pub struct DocumentRepository<T> {
    name: &'static str,
    path: PathBuf,
    data: RwLock<T>,
}

impl<T> DocumentRepository<T>
where
    T: Clone + Default + Serialize + DeserializeOwned,
{
    pub fn new(name: &'static str, path: PathBuf) -> Self {
        Self {
            name,
            path,
            data: RwLock::new(T::default()),
        }
    }

    /// Load the document, falling back to the default when the file is missing
    pub fn load(&self) -> Result<(), JournalError> {
        let loaded: T = read_json(&self.path, self.name)?;

        let mut data = self.data.write().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = loaded;
        Ok(())
    }

    pub fn save(&self) -> Result<(), JournalError> {
        let data = self.data.read().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        write_json_atomic(&self.path, &*data)
    }

    /// Snapshot of the current value
    pub fn get(&self) -> Result<T, JournalError> {
        let data = self.data.read().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    /// Mutate the value in place under the write lock
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, JournalError> {
        let mut data = self.data.write().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        Ok(f(&mut data))
    }

    pub fn replace(&self, value: T) -> Result<(), JournalError> {
        self.update(|data| *data = value)
    }
}
