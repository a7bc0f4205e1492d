//! Live events and setlists

use app_core::schedule::{self, LiveFilter};
use app_core::{checklist, LiveEvent, LiveStatus};
use chrono::{DateTime, Utc};

use crate::provider::EntityProvider;
use crate::write_behind::PersistHandle;

/// Provider for the `liveEvents` collection
pub type LiveEventProvider = EntityProvider<LiveEvent>;

impl EntityProvider<LiveEvent> {
    /// Set the status; nothing is written if it is already `status`
    pub fn set_live_status(&self, event_id: &str, status: LiveStatus) -> PersistHandle {
        self.modify(event_id, |event| {
            let changed = event.status != status;
            event.status = status;
            changed
        })
    }

    /// Flip between scheduled and completed
    pub fn toggle_live_status(&self, event_id: &str) -> PersistHandle {
        self.modify(event_id, |event| {
            event.toggle_status();
            true
        })
    }

    /// Append `song_id` to the setlist
    pub fn add_to_setlist(&self, event_id: &str, song_id: &str, memo: Option<String>) -> PersistHandle {
        self.modify(event_id, |event| {
            event.add_to_setlist(song_id, memo);
            true
        })
    }

    /// Drop the setlist entry at `index`; orders are repaired
    pub fn remove_from_setlist(&self, event_id: &str, index: usize) -> PersistHandle {
        self.modify(event_id, |event| event.remove_from_setlist(index).is_some())
    }

    /// Move a setlist entry from `from` to `to`
    pub fn move_setlist_entry(&self, event_id: &str, from: usize, to: usize) -> PersistHandle {
        self.modify(event_id, |event| from != to && event.move_setlist_entry(from, to))
    }

    /// Tick or untick a checklist item
    pub fn toggle_live_checklist_item(&self, event_id: &str, item_id: &str) -> PersistHandle {
        self.modify(event_id, |event| checklist::toggle_item(&mut event.checklist, item_id))
    }

    /// The next scheduled event at or after `now`
    pub fn next_live(&self, now: DateTime<Utc>) -> Option<LiveEvent> {
        schedule::next_live(&self.items(), now).cloned()
    }

    /// Events matching `filter`, earliest first
    pub fn filtered(&self, filter: LiveFilter) -> Vec<LiveEvent> {
        schedule::live_events_by_status(&self.items(), filter).into_iter().cloned().collect()
    }
}
