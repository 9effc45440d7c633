//! Generic key-value store trait and in-memory implementation.

use std::collections::HashMap;

use crate::error::CoreResult;

/// Raw string slots addressed by key. Values are opaque to the store.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> CoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> CoreResult<()>;
}

// --- Memory Implementation ---

#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    data: HashMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> CoreResult<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }
}
