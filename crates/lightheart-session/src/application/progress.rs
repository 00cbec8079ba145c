//! Persistence adapter for the reader's progress.
//!
//! Only the current scene is persisted. Failures are returned to the caller;
//! the session logs and absorbs them.

use std::sync::Arc;

use lightheart_core::error::DomainError;
use lightheart_core::storage::KeyValueStore;

/// Key holding the identifier of the last committed scene.
pub const PROGRESS_KEY: &str = "light-heart-tales-progress";

/// Key of the visitation history written by earlier releases.
pub const LEGACY_HISTORY_KEY: &str = "light-heart-tales-history";

/// Marker recording that legacy cleanup has run.
pub const CLEANUP_MARKER_KEY: &str = "light-heart-tales-storage-cleaned";

/// Reads and writes the current scene through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct ProgressStore {
    store: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    /// Creates an adapter over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the persisted scene id. Empty values count as absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be read.
    pub fn load(&self) -> Result<Option<String>, DomainError> {
        Ok(self
            .store
            .get(PROGRESS_KEY)?
            .filter(|value| !value.is_empty()))
    }

    /// Persists `scene_id` as the current scene.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be written.
    pub fn save(&self, scene_id: &str) -> Result<(), DomainError> {
        self.store.set(PROGRESS_KEY, scene_id)
    }

    /// Removes data left by earlier releases, once per store.
    ///
    /// When the cleanup marker is absent, deletes the legacy history and the
    /// stale progress value, then writes the marker. Returns whether cleanup
    /// ran.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on any store failure. The marker
    /// is written last, so a failed cleanup is retried on the next start.
    pub fn migrate_legacy(&self) -> Result<bool, DomainError> {
        let already_cleaned = self
            .store
            .get(CLEANUP_MARKER_KEY)?
            .is_some_and(|marker| !marker.is_empty());
        if already_cleaned {
            return Ok(false);
        }

        self.store.remove(LEGACY_HISTORY_KEY)?;
        self.store.remove(PROGRESS_KEY)?;
        self.store.set(CLEANUP_MARKER_KEY, "true")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightheart_core::storage::MemoryStore;
    use lightheart_test_support::FailingStore;

    #[test]
    fn test_load_returns_saved_scene() {
        // Arrange
        let progress = ProgressStore::new(Arc::new(MemoryStore::new()));

        // Act
        progress.save("forest-help").unwrap();

        // Assert
        assert_eq!(progress.load().unwrap().as_deref(), Some("forest-help"));
    }

    #[test]
    fn test_load_treats_empty_value_as_absent() {
        let store = MemoryStore::with_entries([(PROGRESS_KEY, "")]);
        let progress = ProgressStore::new(Arc::new(store));

        assert_eq!(progress.load().unwrap(), None);
    }

    #[test]
    fn test_migrate_legacy_clears_old_keys_and_writes_marker_once() {
        // Arrange
        let store = Arc::new(MemoryStore::with_entries([
            (LEGACY_HISTORY_KEY, "[\"forest-start\"]"),
            (PROGRESS_KEY, "forest-help"),
        ]));
        let progress = ProgressStore::new(store.clone());

        // Act
        let first = progress.migrate_legacy().unwrap();
        progress.save("forest-path").unwrap();
        let second = progress.migrate_legacy().unwrap();

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(store.get(LEGACY_HISTORY_KEY).unwrap(), None);
        assert_eq!(store.get(CLEANUP_MARKER_KEY).unwrap().as_deref(), Some("true"));
        // Progress written after the first cleanup survives the second call.
        assert_eq!(progress.load().unwrap().as_deref(), Some("forest-path"));
    }

    #[test]
    fn test_failures_are_reported_as_infrastructure_errors() {
        let progress = ProgressStore::new(Arc::new(FailingStore));

        assert!(matches!(progress.load(), Err(DomainError::Infrastructure(_))));
        assert!(matches!(progress.save("x"), Err(DomainError::Infrastructure(_))));
        assert!(matches!(
            progress.migrate_legacy(),
            Err(DomainError::Infrastructure(_))
        ));
    }
}
