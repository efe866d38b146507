//! Durable key-value storage.
//!
//! The tracker persists a single JSON blob under
//! [`PORTFOLIO_STORAGE_KEY`](crate::constants::PORTFOLIO_STORAGE_KEY). Backends
//! only need to move strings in and out; schema handling lives in the
//! holdings store.

mod json_file_store;
mod memory_store;
mod storage_traits;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use storage_traits::KeyValueStore;
