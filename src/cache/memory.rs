//! In-process response cache

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{CacheKey, ResponseCache};

/// Response cache living for the duration of the process
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &CacheKey, value: &Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.clone(), value.clone());
        }
    }
}
