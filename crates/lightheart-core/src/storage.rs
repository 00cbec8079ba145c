//! Key-value storage abstraction.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::DomainError;

/// A durable string-to-string store, scoped to one reader.
///
/// Implementations report failures as `DomainError::Infrastructure`; callers
/// in the session engine log and absorb them.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}

/// Store that keeps values for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, DomainError> {
        self.entries
            .lock()
            .map_err(|_| DomainError::Infrastructure("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_returns_none_for_missing_key() {
        let store = MemoryStore::new();

        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_store_set_overwrites_and_remove_clears() {
        // Arrange
        let store = MemoryStore::with_entries([("progress", "forest-start")]);

        // Act
        store.set("progress", "forest-help").unwrap();
        let overwritten = store.get("progress").unwrap();
        store.remove("progress").unwrap();
        store.remove("progress").unwrap();

        // Assert
        assert_eq!(overwritten.as_deref(), Some("forest-help"));
        assert_eq!(store.get("progress").unwrap(), None);
    }
}
