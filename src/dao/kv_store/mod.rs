mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::dao::{models::StoredValue, storage::StorageResult};

/// Abstraction over the key-value persistence the session engine mirrors into.
///
/// Operations are synchronous and local: the engine writes through on every
/// mutation and never waits on remote I/O.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<StoredValue>>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: StoredValue) -> StorageResult<()>;
    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
    /// Verify the backend is still usable.
    fn health_check(&self) -> StorageResult<()>;
}
