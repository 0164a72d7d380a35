//! In-memory key/value store for testing.

use crate::error::StorageResult;
use crate::store::{validate_key, KeyValueStore};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory key/value store.
///
/// This store keeps all values in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral sessions that don't need persistence
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use clientvault_storage::{KeyValueStore, InMemoryStore};
///
/// let store = InMemoryStore::new();
/// store.write("orders", "payload").unwrap();
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory store with pre-existing entries.
    ///
    /// Useful for testing corrupted-bucket scenarios.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no key holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl KeyValueStore for InMemoryStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.entries.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;
    use proptest::prelude::*;

    #[test]
    fn memory_new_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn memory_read_missing_key_is_none() {
        let store = InMemoryStore::new();
        assert!(store.read("clients").unwrap().is_none());
        assert!(!store.contains("clients").unwrap());
    }

    #[test]
    fn memory_write_replaces_value() {
        let store = InMemoryStore::new();
        store.write("clients", "first").unwrap();
        store.write("clients", "second").unwrap();

        assert_eq!(store.read("clients").unwrap().as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_remove_missing_key_succeeds() {
        let store = InMemoryStore::new();
        assert!(store.remove("orders").is_ok());
    }

    #[test]
    fn memory_keys_are_sorted() {
        let store = InMemoryStore::with_entries([("orders", "o"), ("clients", "c"), ("user", "u")]);
        assert_eq!(store.keys().unwrap(), vec!["clients", "orders", "user"]);
    }

    #[test]
    fn memory_rejects_invalid_key() {
        let store = InMemoryStore::new();
        let result = store.write("../user", "x");
        assert!(matches!(result, Err(StorageError::InvalidKey { .. })));
    }

    #[test]
    fn memory_clear() {
        let store = InMemoryStore::with_entries([("user", "u")]);
        store.clear();
        assert!(store.is_empty());
    }

    proptest! {
        #[test]
        fn memory_read_returns_last_write(
            key in "[a-zA-Z][a-zA-Z0-9_]{0,15}",
            values in prop::collection::vec(".*", 1..5),
        ) {
            let store = InMemoryStore::new();
            for value in &values {
                store.write(&key, value).unwrap();
            }
            prop_assert_eq!(store.read(&key).unwrap(), values.last().cloned());
        }
    }
}
