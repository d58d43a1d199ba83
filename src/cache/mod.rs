//! Time-bucketed response cache
//!
//! Responses are cached under `(scope, bucket, resource)` keys. The scope
//! names the service account and API base the response came from, and the
//! bucket is the current time divided into fixed-size windows. An entry is
//! reused for every request in its window and becomes unreachable once the
//! window advances.

pub mod key;
pub mod memory;
pub mod storage;

use chrono::{DateTime, Utc};
use serde_json::Value;

pub use key::CacheKey;
pub use memory::MemoryCache;
pub use storage::{CacheStorage, PersistentCache};

/// Shared store for raw API responses
pub trait ResponseCache: Send + Sync {
    /// Cached payload for `key`, if any
    fn get(&self, key: &CacheKey) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous entry
    fn put(&self, key: &CacheKey, value: &Value);
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[cfg(test)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
