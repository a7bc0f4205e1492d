//! Schedule queries used by the home, calendar, live and log screens

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::models::{LiveEvent, LiveStatus, Practice, PracticeLog};

/// Filter applied to the live event list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveFilter {
    /// Every event
    #[default]
    All,
    /// Only events with the given status
    Status(LiveStatus),
}

/// Practices at or after `now`, earliest first
pub fn upcoming_practices(practices: &[Practice], now: DateTime<Utc>) -> Vec<&Practice> {
    let mut upcoming: Vec<&Practice> = practices.iter().filter(|p| p.date >= now).collect();
    upcoming.sort_by_key(|p| p.date);
    upcoming
}

/// The next practice at or after `now`
pub fn next_practice(practices: &[Practice], now: DateTime<Utc>) -> Option<&Practice> {
    practices.iter().filter(|p| p.date >= now).min_by_key(|p| p.date)
}

/// The next still-scheduled live event at or after `now`
pub fn next_live(events: &[LiveEvent], now: DateTime<Utc>) -> Option<&LiveEvent> {
    events
        .iter()
        .filter(|e| e.is_scheduled() && e.date >= now)
        .min_by_key(|e| e.date)
}

/// Live events matching `filter`, earliest first
pub fn live_events_by_status(events: &[LiveEvent], filter: LiveFilter) -> Vec<&LiveEvent> {
    let mut matching: Vec<&LiveEvent> = events
        .iter()
        .filter(|e| match filter {
            LiveFilter::All => true,
            LiveFilter::Status(status) => e.status == status,
        })
        .collect();
    matching.sort_by_key(|e| e.date);
    matching
}

/// Logs that rate `song_id`, newest first
pub fn logs_for_song<'a>(logs: &'a [PracticeLog], song_id: &str) -> Vec<&'a PracticeLog> {
    let mut matching: Vec<&PracticeLog> =
        logs.iter().filter(|l| l.songs.iter().any(|s| s.song_id == song_id)).collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    matching
}

/// Logs dated within the given calendar month, newest first
pub fn logs_in_month(logs: &[PracticeLog], year: i32, month: u32) -> Vec<&PracticeLog> {
    let mut matching: Vec<&PracticeLog> = logs
        .iter()
        .filter(|l| l.date.year() == year && l.date.month() == month)
        .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    matching
}

/// Everything on one calendar day
#[derive(Debug, Default)]
pub struct DayAgenda<'a> {
    /// Practices that day
    pub practices: Vec<&'a Practice>,
    /// Live events that day
    pub live_events: Vec<&'a LiveEvent>,
}

impl DayAgenda<'_> {
    /// Check if nothing happens that day
    pub fn is_empty(&self) -> bool {
        self.practices.is_empty() && self.live_events.is_empty()
    }
}

/// Practices and live events on `day` (UTC calendar day)
pub fn events_on<'a>(
    practices: &'a [Practice],
    events: &'a [LiveEvent],
    day: NaiveDate,
) -> DayAgenda<'a> {
    DayAgenda {
        practices: practices.iter().filter(|p| p.date.date_naive() == day).collect(),
        live_events: events.iter().filter(|e| e.date.date_naive() == day).collect(),
    }
}
