use dashmap::DashMap;

use crate::dao::{models::StoredValue, storage::StorageResult};

use super::KeyValueStore;

/// Process-local store used when no file path is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, StoredValue>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<StoredValue>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: StoredValue) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("score").unwrap().is_none());

        store.set("score", StoredValue::Number(10)).unwrap();
        assert_eq!(store.get("score").unwrap(), Some(StoredValue::Number(10)));
        store.set("userName", StoredValue::from("Ada")).unwrap();
        assert_eq!(store.len(), 2);

        store.remove("score").unwrap();
        store.remove("score").unwrap();
        assert_eq!(store.len(), 1);
        store.remove("userName").unwrap();
        assert!(store.is_empty());
    }
}
