//! `KeyValueStore` fakes for failure paths.

use lightheart_core::error::DomainError;
use lightheart_core::storage::KeyValueStore;

/// A store that fails every operation with an infrastructure error, as a
/// disabled or full browser storage would.
#[derive(Debug)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }
}
