//! Preference Store
//!
//! A small string key-value store. The dashboard only keeps one preference in
//! it (the theme), but the interface is generic:
//!
//! - **MemoryStore**: process-local, used by tests and ephemeral runs
//! - **FileStore**: JSON object persisted to `store.json` in the data directory

pub mod error;
pub mod file;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;

use std::collections::HashMap;

/// String key-value persistence
pub trait KeyValueStore: Send {
    /// Read a value, `None` if the key was never written
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: pre-populate a key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new().with("theme", "dark");
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }
}
