//! Persistent key-value slots backing the notes store.

pub mod file;
pub mod kv_store;

pub use file::FileKvStore;
pub use kv_store::{KvStore, MemoryKvStore};
