//! Song repertoire

use app_core::lookup;
use app_core::Song;

use crate::provider::EntityProvider;

/// Provider for the `songs` collection
pub type SongProvider = EntityProvider<Song>;

impl EntityProvider<Song> {
    /// Title of `song_id`, or the unknown-song placeholder
    pub fn title_of(&self, song_id: &str) -> String {
        lookup::song_title(&self.items(), song_id).to_string()
    }

    /// Songs whose title or tags contain `query`, case-insensitively
    pub fn search(&self, query: &str) -> Vec<Song> {
        lookup::search_songs(&self.items(), query).into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::song;
    use std::sync::Arc;
    use storage::{keys, CollectionStorage, MemoryKvStore};

    fn songs(seed: Vec<Song>) -> SongProvider {
        SongProvider::new(CollectionStorage::new(Arc::new(MemoryKvStore::new()), keys::SONGS), seed)
    }

    #[tokio::test]
    async fn test_deleted_song_title_falls_back() {
        let songs = songs(vec![song("1", "Song A")]);
        songs.load().await;
        assert_eq!(songs.title_of("1"), "Song A");

        songs.delete("1").wait().await.unwrap();
        assert_eq!(songs.title_of("1"), lookup::UNKNOWN_SONG_TITLE);
    }

    #[test]
    fn test_search() {
        let mut tagged = song("2", "Pretender");
        tagged.tags.push("ballad".to_string());
        let songs = songs(vec![song("1", "Marigold"), tagged]);

        assert_eq!(songs.search("BALLAD").len(), 1);
        assert_eq!(songs.search("").len(), 2);
        assert!(songs.search("lemon").is_empty());
    }
}
