//! SQLite-backed response cache
//!
//! Keeps bucketed responses across CLI invocations. Writing a bucket drops
//! the older buckets of the same scope and resource.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{CacheKey, ResponseCache};
use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 2;

type Result<T> = std::result::Result<T, CacheError>;

/// SQLite cache database
pub struct CacheStorage {
    conn: Connection,
}

impl CacheStorage {
    /// Open or create cache storage at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Get the cache directory path (~/.cache/gavocab on Linux)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("gavocab"))
    }

    /// Open cache storage in a specific directory
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join("cache.db");
        let conn = Connection::open(&db_path)?;

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
            return Self::open_at(cache_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS responses (
                cache_key TEXT PRIMARY KEY NOT NULL,
                scope TEXT NOT NULL,
                resource TEXT NOT NULL,
                bucket INTEGER NOT NULL,
                data TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                size_bytes INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_scope_resource ON responses(scope, resource);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn })
    }

    /// Raw payload stored under `key`
    pub fn get(&self, key: &CacheKey) -> Result<Option<String>> {
        let data = self
            .conn
            .query_row(
                "SELECT data FROM responses WHERE cache_key = ?1",
                params![key.digest()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(data)
    }

    /// Store a raw payload under `key`, pruning its earlier buckets
    pub fn put(&self, key: &CacheKey, data: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses
             (cache_key, scope, resource, bucket, data, created_at, size_bytes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                key.digest(),
                key.scope,
                key.resource,
                key.bucket,
                data,
                Utc::now().timestamp(),
                data.len()
            ],
        )?;

        let pruned = self.conn.execute(
            "DELETE FROM responses WHERE scope = ?1 AND resource = ?2 AND bucket < ?3",
            params![key.scope, key.resource, key.bucket],
        )?;
        if pruned > 0 {
            log::debug!("Pruned {} stale entries for {}", pruned, key.resource);
        }
        Ok(())
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> Result<ClearStats> {
        let removed = self.conn.execute("DELETE FROM responses", [])?;
        Ok(ClearStats {
            entries_removed: removed,
        })
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let (total_entries, resources, total_size, oldest, newest): (
            i64,
            i64,
            i64,
            Option<i64>,
            Option<i64>,
        ) = self.conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT resource), COALESCE(SUM(size_bytes), 0),
                    MIN(created_at), MAX(created_at)
             FROM responses",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )?;

        Ok(CacheStats {
            total_entries: total_entries as usize,
            resources: resources as usize,
            total_size_bytes: total_size as usize,
            oldest_entry: oldest,
            newest_entry: newest,
        })
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub resources: usize,
    pub total_size_bytes: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}

/// [`ResponseCache`] over [`CacheStorage`].
///
/// Storage failures are logged and behave like misses.
pub struct PersistentCache {
    storage: Mutex<CacheStorage>,
}

impl PersistentCache {
    pub fn new(storage: CacheStorage) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }

    /// Open the cache at the default location
    pub fn open() -> Result<Self> {
        CacheStorage::open().map(Self::new)
    }
}

impl ResponseCache for PersistentCache {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        let storage = self.storage.lock().ok()?;
        match storage.get(key) {
            Ok(data) => data.and_then(|d| serde_json::from_str(&d).ok()),
            Err(e) => {
                log::warn!("Cache read failed for {}: {}", key.resource, e);
                None
            }
        }
    }

    fn put(&self, key: &CacheKey, value: &Value) {
        let Ok(storage) = self.storage.lock() else {
            return;
        };
        if let Err(e) = storage.put(key, &value.to_string()) {
            log::warn!("Cache write failed for {}: {}", key.resource, e);
        }
    }
}
