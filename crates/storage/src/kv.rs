//! Key-value store for on-device persistence
//!
//! This module defines the string-keyed, string-valued store every typed
//! accessor writes through, plus two implementations: a sled-backed store for
//! real devices and an in-memory store for tests.

use async_trait::async_trait;
use sled::Db;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Stored bytes are not a UTF-8 string
    #[error("Value under `{key}` is not valid UTF-8")]
    InvalidUtf8 {
        /// Offending key
        key: String,
    },

    /// Any other backend failure (storage full, platform error, ...)
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Async, string-keyed, string-valued storage facility.
///
/// Values are opaque strings; encoding is the caller's business.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if the key is absent
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing whatever was there
    async fn set_item(&self, key: &str, value: String) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for immediate flush)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "bandnote_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Sled-backed key-value store
pub struct SledKvStore {
    db: Arc<Db>,
    flush_on_write: bool,
}

impl SledKvStore {
    /// Open (or create) a store with configuration
    pub fn open(config: KvConfig) -> Result<Self> {
        let mut db_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression);

        if let Some(ms) = config.flush_every_ms {
            db_config = db_config.flush_every_ms(Some(ms));
        }

        let db = db_config.open()?;
        tracing::debug!(path = %config.path, "Opened key-value store");

        Ok(Self { db: Arc::new(db), flush_on_write: config.flush_every_ms.is_none() })
    }

    /// Open a throwaway store that is deleted on drop
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db), flush_on_write: false })
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Get the number of keys in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for SledKvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| KvError::InvalidUtf8 { key: key.to_string() }),
            None => Ok(None),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.db.insert(key.as_bytes(), value.into_bytes())?;
        if self.flush_on_write {
            self.db.flush()?;
        }
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.db.remove(key.as_bytes())?;
        if self.flush_on_write {
            self.db.flush()?;
        }
        Ok(())
    }
}

/// In-memory key-value store (for testing)
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant a raw value, bypassing any encoding
    pub async fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().await.insert(key.into(), value.into());
    }

    /// Read the raw value stored under `key`
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Check if a key exists
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sled_set_and_get() {
        let kv = SledKvStore::temporary().unwrap();
        assert!(kv.is_empty());

        kv.set_item("songs", "[]".to_string()).await.unwrap();

        assert_eq!(kv.get_item("songs").await.unwrap(), Some("[]".to_string()));
        assert_eq!(kv.len(), 1);
    }

    #[tokio::test]
    async fn test_sled_get_nonexistent() {
        let kv = SledKvStore::temporary().unwrap();
        assert_eq!(kv.get_item("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sled_overwrite() {
        let kv = SledKvStore::temporary().unwrap();

        kv.set_item("theme_mode", "light".to_string()).await.unwrap();
        kv.set_item("theme_mode", "dark".to_string()).await.unwrap();

        assert_eq!(kv.get_item("theme_mode").await.unwrap(), Some("dark".to_string()));
    }

    #[tokio::test]
    async fn test_sled_remove() {
        let kv = SledKvStore::temporary().unwrap();

        kv.set_item("profile", "{}".to_string()).await.unwrap();
        kv.remove_item("profile").await.unwrap();
        assert_eq!(kv.get_item("profile").await.unwrap(), None);

        // Removing again is fine
        kv.remove_item("profile").await.unwrap();
    }

    #[tokio::test]
    async fn test_sled_reopen_keeps_data() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("kv").to_string_lossy().to_string();

        {
            let kv = SledKvStore::open(KvConfig::new(&path).flush_every_ms(None)).unwrap();
            kv.set_item("songs", "[1]".to_string()).await.unwrap();
        }

        let kv = SledKvStore::open(KvConfig::new(&path)).unwrap();
        assert_eq!(kv.get_item("songs").await.unwrap(), Some("[1]".to_string()));
    }

    #[test]
    fn test_config_builder() {
        let config = KvConfig::new("custom.db")
            .cache_capacity(1024)
            .use_compression(false)
            .flush_every_ms(None);

        assert_eq!(config.path, "custom.db");
        assert_eq!(config.cache_capacity, 1024);
        assert!(!config.use_compression);
        assert_eq!(config.flush_every_ms, None);
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let kv = MemoryKvStore::new();

        kv.set_item("practices", "[]".to_string()).await.unwrap();
        assert!(kv.contains("practices").await);
        assert_eq!(kv.raw("practices").await, Some("[]".to_string()));

        kv.remove_item("practices").await.unwrap();
        assert_eq!(kv.get_item("practices").await.unwrap(), None);
        assert_eq!(kv.len().await, 0);
    }

    #[tokio::test]
    async fn test_memory_store_insert_raw() {
        let kv = MemoryKvStore::new();
        kv.insert_raw("songs", "not json").await;

        assert_eq!(kv.get_item("songs").await.unwrap(), Some("not json".to_string()));
    }
}
