//! Small string key-value storage for UI preferences that outlive a single run:
//! notice hide-until timestamps, the profile draft and the auth token.

pub mod file;
pub mod notice;
pub mod profile;

use std::collections::BTreeMap;

pub use file::JsonFileStore;
pub use notice::NoticeGate;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()>;

    fn remove(&mut self, key: &str) -> anyhow::Result<()>;

    fn clear(&mut self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        Ok(())
    }
}
