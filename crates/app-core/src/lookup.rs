//! Reference resolution
//!
//! Cross-entity references are resolved by linear search at read time. A
//! reference whose target was deleted is not an error; it resolves to a
//! placeholder.

use crate::models::{Entity, Song};

/// Title shown for a song id that no longer resolves
pub const UNKNOWN_SONG_TITLE: &str = "Unknown song";

/// Find a record by id
pub fn find_by_id<'a, T: Entity>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Title of the referenced song, or [`UNKNOWN_SONG_TITLE`]
pub fn song_title<'a>(songs: &'a [Song], song_id: &str) -> &'a str {
    find_by_id(songs, song_id).map(|s| s.title.as_str()).unwrap_or(UNKNOWN_SONG_TITLE)
}

/// Songs whose title or any tag contains `query` (case-insensitive)
pub fn search_songs<'a>(songs: &'a [Song], query: &str) -> Vec<&'a Song> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return songs.iter().collect();
    }
    songs
        .iter()
        .filter(|song| {
            song.title.to_lowercase().contains(&needle)
                || song.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_find_by_id() {
        let songs = seed::songs();
        assert_eq!(find_by_id(&songs, "2").map(|s| s.title.as_str()), Some("Pretender"));
        assert!(find_by_id(&songs, "99").is_none());
    }

    #[test]
    fn test_dangling_reference_renders_placeholder() {
        let songs = seed::songs();
        assert_eq!(song_title(&songs, "4"), "Lemon");
        assert_eq!(song_title(&songs, "deleted"), UNKNOWN_SONG_TITLE);
    }

    #[test]
    fn test_search_songs_by_title_and_tag() {
        let songs = seed::songs();

        let hits: Vec<_> = search_songs(&songs, "ballad").into_iter().map(|s| s.id.as_str()).collect();
        assert_eq!(hits, vec!["2", "4"]);

        let hits: Vec<_> = search_songs(&songs, "LEMON").into_iter().map(|s| s.id.as_str()).collect();
        assert_eq!(hits, vec!["4"]);

        assert_eq!(search_songs(&songs, "  ").len(), songs.len());
    }
}
