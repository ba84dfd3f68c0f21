//! In-memory key-value backend.

use super::{KeyValueStore, StoreError, StoreResult};
use std::collections::BTreeMap;

/// Map-backed store for tests and ephemeral sessions.
///
/// `read_only` makes every write fail, which lets callers exercise the
/// write-failure path without a real backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            read_only: false,
        }
    }

    /// Toggles rejection of all writes.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Raw access for assertions.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.read_only {
            return Err(StoreError::Rejected {
                key: key.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::storage::{KeyValueStore, StoreError};

    #[test]
    fn set_replaces_previous_value() {
        let mut store = MemoryStore::new();
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_key_reads_none() {
        let store = MemoryStore::new();
        assert!(store.get("absent").unwrap().is_none());
    }

    #[test]
    fn read_only_store_rejects_writes() {
        let mut store = MemoryStore::with_entries([("k", "v")]);
        store.set_read_only(true);
        let err = store.set("k", "w").unwrap_err();
        assert!(matches!(err, StoreError::Rejected { ref key, .. } if key == "k"));
        assert_eq!(store.raw("k"), Some("v"));
    }
}
