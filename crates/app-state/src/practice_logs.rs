//! Practice logs

use app_core::{schedule, PracticeLog, ValidationError};

use crate::provider::EntityProvider;
use crate::write_behind::PersistHandle;

/// Provider for the `practiceLogs` collection
pub type PracticeLogProvider = EntityProvider<PracticeLog>;

impl EntityProvider<PracticeLog> {
    /// Add a whole log, rejecting one that breaks the tag or rating rules.
    ///
    /// The plain [`add`](EntityProvider::add) repairs such a record instead.
    pub fn add_log(&self, log: PracticeLog) -> Result<PersistHandle, ValidationError> {
        log.validate()?;
        Ok(self.add(log))
    }

    /// Replace a whole log, as the edit screen saves it; a record that
    /// breaks the tag or rating rules is rejected and nothing changes
    pub fn update_log(&self, log_id: &str, log: PracticeLog) -> Result<PersistHandle, ValidationError> {
        log.validate()?;
        Ok(self.update(log_id, log))
    }

    /// Tag a log. A fourth tag, a duplicate or a blank is rejected and
    /// nothing changes.
    pub fn add_log_tag(&self, log_id: &str, tag: &str) -> Result<PersistHandle, ValidationError> {
        self.try_modify(log_id, |log| log.add_tag(tag))
    }

    /// Remove a tag from a log
    pub fn remove_log_tag(&self, log_id: &str, tag: &str) -> PersistHandle {
        self.modify(log_id, |log| log.remove_tag(tag))
    }

    /// Rate a new song in a log at the default achievement
    pub fn add_log_song(&self, log_id: &str, song_id: &str) -> Result<PersistHandle, ValidationError> {
        self.try_modify(log_id, |log| log.add_song(song_id))
    }

    /// Drop a song's rating from a log
    pub fn remove_log_song(&self, log_id: &str, song_id: &str) -> PersistHandle {
        self.modify(log_id, |log| log.remove_song(song_id))
    }

    /// Set a song's achievement, clamped into 0..=100
    pub fn set_log_achievement(&self, log_id: &str, song_id: &str, achievement: u32) -> PersistHandle {
        self.modify(log_id, |log| log.set_achievement(song_id, achievement))
    }

    /// Logs that rate `song_id`, newest first
    pub fn logs_for_song(&self, song_id: &str) -> Vec<PracticeLog> {
        schedule::logs_for_song(&self.items(), song_id).into_iter().cloned().collect()
    }

    /// Logs dated in the given month, newest first
    pub fn logs_in_month(&self, year: i32, month: u32) -> Vec<PracticeLog> {
        schedule::logs_in_month(&self.items(), year, month).into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::practice_log::{DEFAULT_ACHIEVEMENT, MAX_TAGS};
    use app_core::LogSong;
    use app_core::timestamp::utc;
    use std::sync::Arc;
    use storage::{keys, CollectionStorage, MemoryKvStore};

    fn log(id: &str) -> PracticeLog {
        let mut log = PracticeLog::new(utc(2025, 1, 20, 14, 0));
        log.id = id.to_string();
        log
    }

    fn logs(kv: Arc<MemoryKvStore>, seed: Vec<PracticeLog>) -> PracticeLogProvider {
        PracticeLogProvider::new(CollectionStorage::new(kv, keys::PRACTICE_LOGS), seed)
    }

    #[tokio::test]
    async fn test_fourth_tag_is_rejected_and_nothing_is_written() {
        let kv = Arc::new(MemoryKvStore::new());
        let logs = logs(kv.clone(), vec![log("log1")]);
        logs.load().await;

        for tag in ["tempo", "chorus", "intro"] {
            logs.add_log_tag("log1", tag).unwrap().wait().await.unwrap();
        }
        let stored_before = kv.raw(keys::PRACTICE_LOGS).await;

        let result = logs.add_log_tag("log1", "solo");

        assert_eq!(result.err(), Some(ValidationError::TooManyTags { max: MAX_TAGS }));
        assert_eq!(logs.get("log1").unwrap().tags, vec!["tempo", "chorus", "intro"]);
        assert_eq!(kv.raw(keys::PRACTICE_LOGS).await, stored_before);
    }

    #[tokio::test]
    async fn test_duplicate_tag_is_rejected() {
        let logs = logs(Arc::new(MemoryKvStore::new()), vec![log("log1")]);
        logs.add_log_tag("log1", "tempo").unwrap();

        assert_eq!(
            logs.add_log_tag("log1", " tempo ").err(),
            Some(ValidationError::DuplicateTag("tempo".to_string()))
        );
        // Case-sensitive
        assert!(logs.add_log_tag("log1", "Tempo").is_ok());

        assert!(!logs.remove_log_tag("log1", "tempo").is_skipped());
        assert!(logs.remove_log_tag("log1", "tempo").is_skipped());
        assert_eq!(logs.get("log1").unwrap().tags, vec!["Tempo"]);
    }

    #[tokio::test]
    async fn test_song_ratings() {
        let logs = logs(Arc::new(MemoryKvStore::new()), vec![log("log1")]);

        logs.add_log_song("log1", "1").unwrap();
        assert!(matches!(logs.add_log_song("log1", "1"), Err(ValidationError::DuplicateSong(_))));
        assert_eq!(logs.get("log1").unwrap().songs[0].achievement, DEFAULT_ACHIEVEMENT);

        logs.set_log_achievement("log1", "1", 250);
        assert_eq!(logs.get("log1").unwrap().songs[0].achievement, 100);

        assert!(logs.set_log_achievement("log1", "9", 10).is_skipped());
        assert!(!logs.remove_log_song("log1", "1").is_skipped());
        assert!(logs.get("log1").unwrap().songs.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_log_is_not_an_error() {
        let logs = logs(Arc::new(MemoryKvStore::new()), vec![]);
        assert!(logs.add_log_tag("missing", "tempo").unwrap().is_skipped());
    }

    #[tokio::test]
    async fn test_update_log_rejects_broken_record() {
        let kv = Arc::new(MemoryKvStore::new());
        let logs = logs(kv.clone(), vec![log("log1")]);
        logs.load().await;
        let stored_before = kv.raw(keys::PRACTICE_LOGS).await;

        let mut edited = log("log1");
        edited.tags = vec!["a".into(), "a".into(), "b".into(), "c".into()];
        edited.songs = vec![LogSong { song_id: "1".into(), achievement: 200 }];

        assert_eq!(
            logs.update_log("log1", edited.clone()).err(),
            Some(ValidationError::TooManyTags { max: MAX_TAGS })
        );
        edited.tags.truncate(2);
        assert_eq!(logs.add_log(edited).err(), Some(ValidationError::DuplicateTag("a".to_string())));

        assert!(logs.get("log1").unwrap().tags.is_empty());
        assert_eq!(logs.len(), 1);
        assert_eq!(kv.raw(keys::PRACTICE_LOGS).await, stored_before);
    }

    #[tokio::test]
    async fn test_update_log_accepts_valid_record() {
        let logs = logs(Arc::new(MemoryKvStore::new()), vec![log("log1")]);
        logs.load().await;

        let mut edited = log("log1");
        edited.tags = vec!["tempo".into(), "groove".into()];
        edited.good_points = "Tight ending".to_string();
        logs.update_log("log1", edited.clone()).unwrap().wait().await.unwrap();

        assert_eq!(logs.get("log1").unwrap(), edited);
    }

    #[tokio::test]
    async fn test_plain_update_repairs_broken_record() {
        let kv = Arc::new(MemoryKvStore::new());
        let logs = logs(kv.clone(), vec![log("log1")]);
        logs.load().await;

        let mut edited = log("log1");
        edited.tags = vec!["a".into(), "a".into(), "b".into(), "c".into(), "d".into()];
        edited.songs = vec![LogSong { song_id: "1".into(), achievement: 200 }];
        logs.update("log1", edited).wait().await.unwrap();

        let stored = logs.get("log1").unwrap();
        assert_eq!(stored.tags, vec!["a", "b", "c"]);
        assert_eq!(stored.songs[0].achievement, 100);
        let on_disk = CollectionStorage::<PracticeLog>::new(kv, keys::PRACTICE_LOGS).get_all().await.unwrap();
        assert_eq!(on_disk[0], stored);
    }

    #[test]
    fn test_queries() {
        let mut rated = log("log1");
        rated.add_song("1").unwrap();
        let mut older = log("log0");
        older.date = utc(2024, 12, 20, 14, 0);
        older.add_song("1").unwrap();
        let logs = logs(Arc::new(MemoryKvStore::new()), vec![older, rated, log("log2")]);

        let ids: Vec<_> = logs.logs_for_song("1").into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["log1", "log0"]);
        assert_eq!(logs.logs_in_month(2025, 1).len(), 2);
        assert_eq!(logs.logs_in_month(2024, 12).len(), 1);
    }
}
