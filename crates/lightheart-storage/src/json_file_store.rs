//! JSON-file implementation of the `KeyValueStore` trait.
//!
//! The whole store is one flat JSON object of string values. Every write
//! rewrites the file through a sibling temporary file and a rename, so a
//! crash mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use lightheart_core::error::DomainError;
use lightheart_core::storage::KeyValueStore;

/// File-backed key-value store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; the file
    /// and its parent directories are created on first write.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the file exists but cannot
    /// be read or is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                DomainError::Infrastructure(format!(
                    "corrupt store file {}: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(DomainError::Infrastructure(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        tracing::debug!(path = %path.display(), "opened story progress store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, DomainError> {
        self.entries
            .lock()
            .map_err(|_| DomainError::Infrastructure("store lock poisoned".into()))
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), DomainError> {
        let io_error = |e: std::io::Error| {
            DomainError::Infrastructure(format!("failed to write {}: {e}", self.path.display()))
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::Infrastructure(format!("failed to encode store: {e}")))?;
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, contents).map_err(io_error)?;
        fs::rename(&temp, &self.path).map_err(io_error)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.lock()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        let mut entries = self.lock()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty_and_creates_nothing() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("progress.json");

        // Act
        let store = JsonFileStore::open(&path).unwrap();

        // Assert
        assert_eq!(store.get("light-heart-tales-progress").unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("progress.json");
        let store = JsonFileStore::open(&path).unwrap();

        // Act
        store.set("light-heart-tales-progress", "forest-help").unwrap();
        store.set("light-heart-tales-history", "[]").unwrap();
        store.remove("light-heart-tales-history").unwrap();
        drop(store);
        let reopened = JsonFileStore::open(&path).unwrap();

        // Assert
        assert_eq!(
            reopened.get("light-heart-tales-progress").unwrap().as_deref(),
            Some("forest-help")
        );
        assert_eq!(reopened.get("light-heart-tales-history").unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "not json").unwrap();

        // Act
        let result = JsonFileStore::open(&path);

        // Assert
        match result.unwrap_err() {
            DomainError::Infrastructure(message) => assert!(message.contains("corrupt")),
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_of_absent_key_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.json");
        let store = JsonFileStore::open(&path).unwrap();

        store.remove("light-heart-tales-history").unwrap();

        assert!(!path.exists());
    }
}
