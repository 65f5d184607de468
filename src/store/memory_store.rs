use crate::store::Store;
use serde_json::Value;
use std::collections::HashMap;

/// Store living only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl Store for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn set_raw(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
