//! Band data model
//!
//! Plain records identified by opaque string ids. References between
//! entities (a practice's songs, a setlist, a log) are ids only; nothing
//! enforces that the referenced record still exists.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::ids::new_id;
use crate::timestamp::{self, iso8601};

/// A record that lives in an id-keyed collection
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Human-readable collection label used in log lines
    const KIND: &'static str;

    /// The record's id
    fn id(&self) -> &str;

    /// Repair the record's invariants before it enters a collection
    fn normalize(&mut self) {}
}

/// A song in the band's repertoire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Immutable once created
    pub id: String,
    /// Song title
    pub title: String,
    /// Musical key, e.g. `G#m`
    pub key: String,
    /// Tempo in beats per minute
    pub bpm: u32,
    /// Free-form tags, in display order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Notes
    #[serde(default)]
    pub memo: String,
    /// Link to a reference recording
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    /// Creation time
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

impl Song {
    /// Create a song with a fresh id, created now
    pub fn new(title: impl Into<String>, key: impl Into<String>, bpm: u32) -> Self {
        Self {
            id: new_id("s"),
            title: title.into(),
            key: key.into(),
            bpm,
            tags: Vec::new(),
            memo: String::new(),
            reference_url: None,
            created_at: timestamp::now(),
        }
    }
}

impl Entity for Song {
    const KIND: &'static str = "songs";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A song scheduled in a practice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSong {
    /// Referenced song
    pub song_id: String,
    /// 1-based position
    pub order: u32,
    /// What to achieve with this song
    #[serde(default)]
    pub goal: String,
}

/// A rehearsal session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practice {
    /// Record id
    pub id: String,
    /// Start time
    #[serde(with = "iso8601")]
    pub date: DateTime<Utc>,
    /// Studio or room
    pub location: String,
    /// Meeting time, free text (e.g. `13:50`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_time: Option<String>,
    /// Purpose of the session
    #[serde(default)]
    pub purpose: String,
    /// Songs to run, ordered
    #[serde(default)]
    pub songs: Vec<PracticeSong>,
    /// Things to bring
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    /// Notes
    #[serde(default)]
    pub memo: String,
}

impl Practice {
    /// Create an empty practice with a fresh id
    pub fn new(date: DateTime<Utc>, location: impl Into<String>) -> Self {
        Self {
            id: new_id("p"),
            date,
            location: location.into(),
            meet_time: None,
            purpose: String::new(),
            songs: Vec::new(),
            checklist: Vec::new(),
            memo: String::new(),
        }
    }
}

impl Entity for Practice {
    const KIND: &'static str = "practices";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Whether a live event is still ahead; toggled by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveStatus {
    /// Not played yet
    #[default]
    Scheduled,
    /// Played
    Completed,
}

impl LiveStatus {
    /// The other status
    pub fn toggled(self) -> Self {
        match self {
            LiveStatus::Scheduled => LiveStatus::Completed,
            LiveStatus::Completed => LiveStatus::Scheduled,
        }
    }
}

/// One entry of a setlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetlistSong {
    /// Referenced song
    pub song_id: String,
    /// 1-based position
    pub order: u32,
    /// Per-entry note (tuning, MC, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// A gig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEvent {
    /// Record id
    pub id: String,
    /// Event title
    pub title: String,
    /// Show time
    #[serde(with = "iso8601")]
    pub date: DateTime<Utc>,
    /// Venue name
    pub venue: String,
    /// Meeting time, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_time: Option<String>,
    /// Songs to play, ordered
    #[serde(default)]
    pub setlist: Vec<SetlistSong>,
    /// Things to bring
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    /// Notes
    #[serde(default)]
    pub memo: String,
    /// User-toggled status
    #[serde(default)]
    pub status: LiveStatus,
}

impl LiveEvent {
    /// Create a scheduled event with a fresh id
    pub fn new(title: impl Into<String>, date: DateTime<Utc>, venue: impl Into<String>) -> Self {
        Self {
            id: new_id("l"),
            title: title.into(),
            date,
            venue: venue.into(),
            meet_time: None,
            setlist: Vec::new(),
            checklist: Vec::new(),
            memo: String::new(),
            status: LiveStatus::Scheduled,
        }
    }

    /// Check if the event is still scheduled
    pub fn is_scheduled(&self) -> bool {
        self.status == LiveStatus::Scheduled
    }

    /// Flip between scheduled and completed
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

impl Entity for LiveEvent {
    const KIND: &'static str = "liveEvents";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Self-rating for one song in a practice log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSong {
    /// Referenced song
    pub song_id: String,
    /// 0-100
    pub achievement: u8,
}

/// Post-practice notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeLog {
    /// Record id
    pub id: String,
    /// When the practice happened
    #[serde(with = "iso8601")]
    pub date: DateTime<Utc>,
    /// Practice this log belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_practice_id: Option<String>,
    /// Live event this log belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_live_id: Option<String>,
    /// Per-song ratings
    #[serde(default)]
    pub songs: Vec<LogSong>,
    /// Up to three unique tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// What went well
    #[serde(default)]
    pub good_points: String,
    /// What went wrong
    #[serde(default)]
    pub issues: String,
    /// What to do next time
    #[serde(default)]
    pub next_actions: String,
}

impl PracticeLog {
    /// Create an empty log with a fresh id
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            id: new_id("log"),
            date,
            related_practice_id: None,
            related_live_id: None,
            songs: Vec::new(),
            tags: Vec::new(),
            good_points: String::new(),
            issues: String::new(),
            next_actions: String::new(),
        }
    }
}

impl Entity for PracticeLog {
    const KIND: &'static str = "practiceLogs";

    fn id(&self) -> &str {
        &self.id
    }

    fn normalize(&mut self) {
        self.repair();
    }
}

/// Where a checklist template is meant to be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Studio rehearsal
    Studio,
    /// Live show
    Live,
}

/// A checkbox line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Item id
    pub id: String,
    /// Label
    pub text: String,
    /// Whether it is ticked
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItem {
    /// Create an unchecked item with a fresh id
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: new_id("ci"), text: text.into(), checked: false }
    }
}

/// A named, reusable checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistTemplate {
    /// Template id
    pub id: String,
    /// Display name
    pub name: String,
    /// Studio or live
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    /// Items copied into each instance
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Entity for ChecklistTemplate {
    const KIND: &'static str = "checklistTemplates";

    fn id(&self) -> &str {
        &self.id
    }
}

/// The user's own profile. Singleton, overwritten wholesale on save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Instrument or role
    #[serde(default)]
    pub part: String,
    /// Band name
    #[serde(default)]
    pub band_name: String,
    /// Local image URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_uri: Option<String>,
}

impl Profile {
    /// Check if nothing has been filled in yet
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.part.trim().is_empty() && self.band_name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::utc;

    #[test]
    fn test_song_serializes_camel_case_and_iso_date() {
        let mut song = Song::new("Song A", "C", 120);
        song.id = "1".to_string();
        song.created_at = utc(2024, 1, 15, 0, 0);
        song.reference_url = Some("https://example.com".to_string());

        let json = serde_json::to_value(&song).unwrap();
        assert_eq!(json["createdAt"], "2024-01-15T00:00:00.000Z");
        assert_eq!(json["referenceUrl"], "https://example.com");
        assert_eq!(json["bpm"], 120);
    }

    #[test]
    fn test_song_decodes_legacy_shape() {
        let raw = r#"{"id":"3","title":"Marigold","key":"C","bpm":102,
            "tags":["pop"],"memo":"","createdAt":"2024-02-10T00:00:00.000Z"}"#;
        let song: Song = serde_json::from_str(raw).unwrap();

        assert_eq!(song.created_at, utc(2024, 2, 10, 0, 0));
        assert_eq!(song.reference_url, None);
    }

    #[test]
    fn test_live_status_wire_format() {
        let mut event = LiveEvent::new("Release party", utc(2025, 2, 1, 18, 0), "LOFT");
        assert!(event.is_scheduled());
        assert_eq!(serde_json::to_value(&event).unwrap()["status"], "scheduled");

        event.toggle_status();
        assert_eq!(event.status, LiveStatus::Completed);
        assert_eq!(serde_json::to_value(&event).unwrap()["status"], "completed");

        event.toggle_status();
        assert!(event.is_scheduled());
    }

    #[test]
    fn test_template_kind_uses_type_key() {
        let template = ChecklistTemplate {
            id: "template-live".to_string(),
            name: "Show day".to_string(),
            kind: TemplateKind::Live,
            items: vec![],
        };

        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["type"], "live");
    }

    #[test]
    fn test_practice_log_tags_optional_on_wire() {
        let log = PracticeLog::new(utc(2025, 1, 20, 14, 0));
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.get("tags").is_none());

        let raw = r#"{"id":"log1","date":"2025-01-20T14:00:00.000Z","songs":[],
            "goodPoints":"","issues":"","nextActions":""}"#;
        let decoded: PracticeLog = serde_json::from_str(raw).unwrap();
        assert!(decoded.tags.is_empty());
    }

    #[test]
    fn test_profile_blank() {
        assert!(Profile::default().is_blank());

        let profile = Profile { band_name: "My Band".to_string(), ..Default::default() };
        assert!(!profile.is_blank());
        assert_eq!(serde_json::to_value(&profile).unwrap()["bandName"], "My Band");
    }

    #[test]
    fn test_entity_ids() {
        let practice = Practice::new(utc(2025, 1, 25, 14, 0), "Studio");
        assert_eq!(Entity::id(&practice), practice.id);
        assert!(practice.id.starts_with('p'));
        assert_eq!(Practice::KIND, "practices");
    }
}
