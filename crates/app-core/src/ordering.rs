//! Ordered song lists
//!
//! A practice's `songs` and a live event's `setlist` carry an explicit
//! 1-based `order`. After every insert, removal or move, `order` equals
//! index + 1.

use crate::models::{LiveEvent, Practice, PracticeSong, SetlistSong};

/// An entry with a 1-based position
pub trait Ordered {
    /// Current position
    fn order(&self) -> u32;

    /// Overwrite the position
    fn set_order(&mut self, order: u32);
}

impl Ordered for PracticeSong {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl Ordered for SetlistSong {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

/// Rewrite every `order` to index + 1
pub fn renumber<T: Ordered>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as u32 + 1);
    }
}

/// Check that `order` runs 1, 2, 3, ... with no gaps
pub fn is_contiguous<T: Ordered>(items: &[T]) -> bool {
    items.iter().enumerate().all(|(index, item)| item.order() == index as u32 + 1)
}

/// Append an entry at the end
pub fn push<T: Ordered>(items: &mut Vec<T>, mut item: T) {
    item.set_order(items.len() as u32 + 1);
    items.push(item);
}

/// Remove the entry at `index`; `None` if out of range
pub fn remove_at<T: Ordered>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index >= items.len() {
        return None;
    }
    let removed = items.remove(index);
    renumber(items);
    Some(removed)
}

/// Move the entry at `from` to position `to`; false if either is out of range
pub fn move_item<T: Ordered>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    renumber(items);
    true
}

/// Swap the entry at `index` with its predecessor
pub fn move_up<T: Ordered>(items: &mut Vec<T>, index: usize) -> bool {
    index > 0 && move_item(items, index, index - 1)
}

/// Swap the entry at `index` with its successor
pub fn move_down<T: Ordered>(items: &mut Vec<T>, index: usize) -> bool {
    index + 1 < items.len() && move_item(items, index, index + 1)
}

impl Practice {
    /// Append a song to the practice plan
    pub fn add_song(&mut self, song_id: impl Into<String>, goal: impl Into<String>) {
        push(&mut self.songs, PracticeSong { song_id: song_id.into(), order: 0, goal: goal.into() });
    }

    /// Drop the song at `index`
    pub fn remove_song(&mut self, index: usize) -> Option<PracticeSong> {
        remove_at(&mut self.songs, index)
    }

    /// Reorder the practice plan
    pub fn move_song(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.songs, from, to)
    }
}

impl LiveEvent {
    /// Append a song to the setlist
    pub fn add_to_setlist(&mut self, song_id: impl Into<String>, memo: Option<String>) {
        push(&mut self.setlist, SetlistSong { song_id: song_id.into(), order: 0, memo });
    }

    /// Drop the setlist entry at `index`
    pub fn remove_from_setlist(&mut self, index: usize) -> Option<SetlistSong> {
        remove_at(&mut self.setlist, index)
    }

    /// Reorder the setlist
    pub fn move_setlist_entry(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.setlist, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::utc;

    fn practice_with(ids: &[&str]) -> Practice {
        let mut practice = Practice::new(utc(2025, 1, 25, 14, 0), "Studio");
        for id in ids {
            practice.add_song(*id, "");
        }
        practice
    }

    fn song_ids(practice: &Practice) -> Vec<&str> {
        practice.songs.iter().map(|s| s.song_id.as_str()).collect()
    }

    fn orders<T: Ordered>(items: &[T]) -> Vec<u32> {
        items.iter().map(Ordered::order).collect()
    }

    #[test]
    fn test_add_assigns_next_order() {
        let practice = practice_with(&["1", "2", "3"]);
        assert_eq!(orders(&practice.songs), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_second_of_four_repairs_order() {
        let mut practice = practice_with(&["a", "b", "c", "d"]);

        let removed = practice.remove_song(1).unwrap();

        assert_eq!(removed.song_id, "b");
        assert_eq!(song_ids(&practice), vec!["a", "c", "d"]);
        assert_eq!(orders(&practice.songs), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut practice = practice_with(&["a"]);
        assert!(practice.remove_song(5).is_none());
        assert_eq!(practice.songs.len(), 1);
    }

    #[test]
    fn test_move_song() {
        let mut practice = practice_with(&["a", "b", "c"]);

        assert!(practice.move_song(0, 2));
        assert_eq!(song_ids(&practice), vec!["b", "c", "a"]);
        assert!(is_contiguous(&practice.songs));

        assert!(!practice.move_song(0, 3));
    }

    #[test]
    fn test_move_up_and_down_at_edges() {
        let mut event = LiveEvent::new("Show", utc(2025, 2, 1, 18, 0), "LOFT");
        event.add_to_setlist("3", Some("regular tuning".to_string()));
        event.add_to_setlist("1", None);
        event.add_to_setlist("2", None);

        assert!(!move_up(&mut event.setlist, 0));
        assert!(!move_down(&mut event.setlist, 2));

        assert!(move_down(&mut event.setlist, 0));
        assert_eq!(event.setlist[1].song_id, "3");
        assert_eq!(event.setlist[1].memo.as_deref(), Some("regular tuning"));
        assert!(move_up(&mut event.setlist, 2));
        assert_eq!(event.setlist[1].song_id, "2");
        assert_eq!(orders(&event.setlist), vec![1, 2, 3]);
    }

    #[test]
    fn test_renumber_repairs_gaps() {
        let mut songs = vec![
            SetlistSong { song_id: "a".to_string(), order: 4, memo: None },
            SetlistSong { song_id: "b".to_string(), order: 9, memo: None },
        ];
        assert!(!is_contiguous(&songs));

        renumber(&mut songs);
        assert!(is_contiguous(&songs));
    }

    #[test]
    fn test_setlist_remove_keeps_relative_sequence() {
        let mut event = LiveEvent::new("Show", utc(2025, 2, 1, 18, 0), "LOFT");
        for id in ["3", "1", "2", "4"] {
            event.add_to_setlist(id, None);
        }

        event.remove_from_setlist(0);
        let ids: Vec<_> = event.setlist.iter().map(|s| s.song_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
        assert_eq!(orders(&event.setlist), vec![1, 2, 3]);
    }
}
