pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Persistent string-keyed storage for opaque encoded values.
///
/// Accessed from a single thread; implementations need no interior locking.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Deletes the value under `key`.
    /// Returns `true` if a value existed and was removed.
    fn remove(&mut self, key: &str) -> Result<bool, StoreError>;

    /// All keys currently present, in no particular order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}
