//! Cache keys: a scope, a time bucket and the resource path

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Index of the `bucket_seconds`-wide window containing `now`.
///
/// Widths below one second are treated as one second.
pub fn time_bucket(now: DateTime<Utc>, bucket_seconds: i64) -> i64 {
    now.timestamp().div_euclid(bucket_seconds.max(1))
}

/// Key of one cached response.
///
/// `scope` names whose view of the API the response is: one service account
/// against one API base. Entries never match across scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub scope: String,
    pub bucket: i64,
    pub resource: String,
}

impl CacheKey {
    pub fn new(scope: &str, now: DateTime<Utc>, bucket_seconds: i64, resource: &str) -> Self {
        Self {
            scope: scope.to_string(),
            bucket: time_bucket(now, bucket_seconds),
            resource: resource.to_string(),
        }
    }

    /// Stable hex digest, used as the storage primary key
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.scope.as_bytes());
        hasher.update(b"|");
        hasher.update(self.bucket.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(self.resource.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
