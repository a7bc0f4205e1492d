//! Typed storage accessors
//!
//! Each accessor binds one fixed key to a JSON encoding of either a whole
//! collection (`CollectionStorage`) or a single document (`DocumentStorage`).
//! Every save is a full serialize-and-overwrite; nothing is merged or diffed.

use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

use crate::kv::{KeyValueStore, KvError};

/// Fixed storage keys
pub mod keys {
    /// Song collection
    pub const SONGS: &str = "songs";
    /// Practice collection
    pub const PRACTICES: &str = "practices";
    /// Live event collection
    pub const LIVE_EVENTS: &str = "liveEvents";
    /// Practice log collection
    pub const PRACTICE_LOGS: &str = "practiceLogs";
    /// Checklist template collection
    pub const CHECKLIST_TEMPLATES: &str = "checklistTemplates";
    /// Profile singleton
    pub const PROFILE: &str = "profile";
    /// Theme mode, stored as the bare string `light` or `dark`
    pub const THEME_MODE: &str = "theme_mode";
}

/// Storage accessor error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying key-value store failed
    #[error(transparent)]
    Kv(#[from] KvError),

    /// Stored value exists but is not valid encoded data
    #[error("Failed to decode `{key}`: {source}")]
    Decode {
        /// Storage key
        key: &'static str,
        /// Decoder error
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded
    #[error("Failed to encode `{key}`: {source}")]
    Encode {
        /// Storage key
        key: &'static str,
        /// Encoder error
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for accessor operations
pub type Result<T> = std::result::Result<T, StorageError>;

fn decode<T: DeserializeOwned>(key: &'static str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|source| StorageError::Decode { key, source })
}

fn encode<T: Serialize + ?Sized>(key: &'static str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })
}

/// Accessor for a JSON array stored under one key
pub struct CollectionStorage<T> {
    kv: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for CollectionStorage<T> {
    fn clone(&self) -> Self {
        Self { kv: Arc::clone(&self.kv), key: self.key, _marker: PhantomData }
    }
}

impl<T> CollectionStorage<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind a collection to `key`
    pub fn new(kv: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self { kv, key, _marker: PhantomData }
    }

    /// The storage key this accessor writes
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load the whole collection; an absent key yields an empty list
    pub async fn get_all(&self) -> Result<Vec<T>> {
        match self.kv.get_item(self.key).await? {
            Some(raw) => decode(self.key, &raw),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the stored collection
    pub async fn save_all(&self, items: &[T]) -> Result<()> {
        let raw = encode(self.key, items)?;
        self.kv.set_item(self.key, raw).await?;
        Ok(())
    }

    /// Remove the key entirely
    pub async fn clear(&self) -> Result<()> {
        self.kv.remove_item(self.key).await?;
        Ok(())
    }
}

/// Accessor for a single JSON object stored under one key
pub struct DocumentStorage<T> {
    kv: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for DocumentStorage<T> {
    fn clone(&self) -> Self {
        Self { kv: Arc::clone(&self.kv), key: self.key, _marker: PhantomData }
    }
}

impl<T> DocumentStorage<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind a document to `key`
    pub fn new(kv: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self { kv, key, _marker: PhantomData }
    }

    /// The storage key this accessor writes
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load the document, `None` if nothing has been saved
    pub async fn get(&self) -> Result<Option<T>> {
        match self.kv.get_item(self.key).await? {
            Some(raw) => decode(self.key, &raw).map(Some),
            None => Ok(None),
        }
    }

    /// Overwrite the stored document
    pub async fn save(&self, value: &T) -> Result<()> {
        let raw = encode(self.key, value)?;
        self.kv.set_item(self.key, raw).await?;
        Ok(())
    }

    /// Remove the key entirely
    pub async fn clear(&self) -> Result<()> {
        self.kv.remove_item(self.key).await?;
        Ok(())
    }
}
