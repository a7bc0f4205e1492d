//! Typed accessors bound to their storage keys

use app_core::{ChecklistTemplate, LiveEvent, Practice, PracticeLog, Profile, Song};
use std::sync::Arc;
use storage::{keys, CollectionStorage, DocumentStorage, KeyValueStore};

/// One accessor per persisted collection, all sharing a store
#[derive(Clone)]
pub struct StorageAccessors {
    /// `songs`
    pub songs: CollectionStorage<Song>,
    /// `practices`
    pub practices: CollectionStorage<Practice>,
    /// `liveEvents`
    pub live_events: CollectionStorage<LiveEvent>,
    /// `practiceLogs`
    pub practice_logs: CollectionStorage<PracticeLog>,
    /// `checklistTemplates`
    pub checklist_templates: CollectionStorage<ChecklistTemplate>,
    /// `profile`
    pub profile: DocumentStorage<Profile>,
}

impl StorageAccessors {
    /// Bind every accessor to `kv`
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            songs: CollectionStorage::new(Arc::clone(&kv), keys::SONGS),
            practices: CollectionStorage::new(Arc::clone(&kv), keys::PRACTICES),
            live_events: CollectionStorage::new(Arc::clone(&kv), keys::LIVE_EVENTS),
            practice_logs: CollectionStorage::new(Arc::clone(&kv), keys::PRACTICE_LOGS),
            checklist_templates: CollectionStorage::new(Arc::clone(&kv), keys::CHECKLIST_TEMPLATES),
            profile: DocumentStorage::new(kv, keys::PROFILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::seed;
    use storage::MemoryKvStore;

    #[tokio::test]
    async fn test_accessors_share_one_store() {
        let kv = Arc::new(MemoryKvStore::new());
        let accessors = StorageAccessors::new(kv.clone());

        accessors.songs.save_all(&seed::songs()).await.unwrap();
        accessors.live_events.save_all(&seed::live_events()).await.unwrap();

        assert!(kv.contains("songs").await);
        assert!(kv.contains("liveEvents").await);
        assert_eq!(accessors.songs.get_all().await.unwrap(), seed::songs());
        assert!(accessors.practices.get_all().await.unwrap().is_empty());
        assert!(accessors.profile.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_every_collection_round_trips() {
        let accessors = StorageAccessors::new(Arc::new(MemoryKvStore::new()));
        let seed = seed::SeedData::demo();

        accessors.practices.save_all(&seed.practices).await.unwrap();
        accessors.practice_logs.save_all(&seed.practice_logs).await.unwrap();
        accessors.checklist_templates.save_all(&seed.checklist_templates).await.unwrap();

        assert_eq!(accessors.practices.get_all().await.unwrap(), seed.practices);
        assert_eq!(accessors.practice_logs.get_all().await.unwrap(), seed.practice_logs);
        assert_eq!(accessors.checklist_templates.get_all().await.unwrap(), seed.checklist_templates);
    }
}
