//! Practice sessions

use app_core::{checklist, schedule, Practice};
use chrono::{DateTime, Utc};

use crate::provider::EntityProvider;
use crate::write_behind::PersistHandle;

/// Provider for the `practices` collection
pub type PracticeProvider = EntityProvider<Practice>;

impl EntityProvider<Practice> {
    /// Append `song_id` to the practice plan
    pub fn add_song_to_practice(&self, practice_id: &str, song_id: &str, goal: &str) -> PersistHandle {
        self.modify(practice_id, |practice| {
            practice.add_song(song_id, goal);
            true
        })
    }

    /// Drop the plan entry at `index`; orders are repaired
    pub fn remove_song_from_practice(&self, practice_id: &str, index: usize) -> PersistHandle {
        self.modify(practice_id, |practice| practice.remove_song(index).is_some())
    }

    /// Move a plan entry from `from` to `to`
    pub fn move_practice_song(&self, practice_id: &str, from: usize, to: usize) -> PersistHandle {
        self.modify(practice_id, |practice| from != to && practice.move_song(from, to))
    }

    /// Tick or untick a checklist item
    pub fn toggle_practice_checklist_item(&self, practice_id: &str, item_id: &str) -> PersistHandle {
        self.modify(practice_id, |practice| checklist::toggle_item(&mut practice.checklist, item_id))
    }

    /// The next practice at or after `now`
    pub fn next_practice(&self, now: DateTime<Utc>) -> Option<Practice> {
        schedule::next_practice(&self.items(), now).cloned()
    }

    /// Practices at or after `now`, earliest first
    pub fn upcoming(&self, now: DateTime<Utc>) -> Vec<Practice> {
        schedule::upcoming_practices(&self.items(), now).into_iter().cloned().collect()
    }
}
