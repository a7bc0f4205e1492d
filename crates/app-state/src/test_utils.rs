//! Test utilities and fixtures for provider testing

#![allow(dead_code)]

use app_core::timestamp::utc;
use app_core::{Practice, Song};
use async_trait::async_trait;
use mockall::mock;
use storage::kv::{KeyValueStore, KvError, Result};

mock! {
    /// Key-value store with scripted behaviour
    pub Store {}

    #[async_trait]
    impl KeyValueStore for Store {
        async fn get_item(&self, key: &str) -> Result<Option<String>>;
        async fn set_item(&self, key: &str, value: String) -> Result<()>;
        async fn remove_item(&self, key: &str) -> Result<()>;
    }
}

/// A store that reads as empty and rejects every write
pub fn failing_store() -> MockStore {
    let mut store = MockStore::new();
    store.expect_get_item().returning(|_| Ok(None));
    store
        .expect_set_item()
        .returning(|_, _| Err(KvError::Backend("storage full".to_string())));
    store
        .expect_remove_item()
        .returning(|_| Err(KvError::Backend("storage full".to_string())));
    store
}

/// A store whose reads fail outright
pub fn unreadable_store() -> MockStore {
    let mut store = MockStore::new();
    store
        .expect_get_item()
        .returning(|_| Err(KvError::Backend("device locked".to_string())));
    store.expect_set_item().returning(|_, _| Ok(()));
    store.expect_remove_item().returning(|_| Ok(()));
    store
}

/// Minimal song fixture
pub fn song(id: &str, title: &str) -> Song {
    Song {
        id: id.to_string(),
        title: title.to_string(),
        key: "C".to_string(),
        bpm: 120,
        tags: Vec::new(),
        memo: String::new(),
        reference_url: None,
        created_at: utc(2024, 1, 15, 0, 0),
    }
}

/// Practice fixture referencing `song_ids` in order
pub fn practice(id: &str, song_ids: &[&str]) -> Practice {
    let mut practice = Practice::new(utc(2025, 1, 25, 14, 0), "Studio");
    practice.id = id.to_string();
    for song_id in song_ids {
        practice.add_song(*song_id, "");
    }
    practice
}
