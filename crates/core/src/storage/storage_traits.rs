use crate::errors::StorageError;

/// Key-value persistence for small JSON documents.
///
/// Calls are synchronous: writes happen on the mutation path and are expected
/// to be quick. Implementations must be safe to share between threads.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
