//! Demo data shown before anything has been saved
//!
//! On first run every collection provider persists its slice of this data.

use crate::models::{
    ChecklistItem, ChecklistTemplate, LiveEvent, LiveStatus, LogSong, Practice, PracticeLog,
    PracticeSong, SetlistSong, Song, TemplateKind,
};
use crate::timestamp::utc;

/// Initial contents for every collection
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    /// Songs
    pub songs: Vec<Song>,
    /// Practices
    pub practices: Vec<Practice>,
    /// Live events
    pub live_events: Vec<LiveEvent>,
    /// Practice logs
    pub practice_logs: Vec<PracticeLog>,
    /// Checklist templates
    pub checklist_templates: Vec<ChecklistTemplate>,
}

impl SeedData {
    /// No seed data at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled demo band
    pub fn demo() -> Self {
        Self {
            songs: songs(),
            practices: practices(),
            live_events: live_events(),
            practice_logs: practice_logs(),
            checklist_templates: checklist_templates(),
        }
    }
}

fn song(id: &str, title: &str, key: &str, bpm: u32, tags: &[&str], memo: &str) -> Song {
    Song {
        id: id.to_string(),
        title: title.to_string(),
        key: key.to_string(),
        bpm,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        memo: memo.to_string(),
        reference_url: None,
        created_at: Default::default(),
    }
}

fn items(prefix: &str, labels: &[&str]) -> Vec<ChecklistItem> {
    labels
        .iter()
        .enumerate()
        .map(|(i, text)| ChecklistItem {
            id: format!("{}{}", prefix, i + 1),
            text: text.to_string(),
            checked: false,
        })
        .collect()
}

fn studio_items() -> Vec<ChecklistItem> {
    items("sc", &["Cables", "9V batteries", "Picks", "Tuner", "Sheet music", "Click device", "Drinks"])
}

fn live_items() -> Vec<ChecklistItem> {
    items(
        "lc",
        &[
            "Cables (with spares)",
            "9V batteries x3",
            "Picks (with spares)",
            "Tuner",
            "Printed setlist",
            "Gaffer tape",
            "Change of clothes",
            "Towel",
        ],
    )
}

/// Demo songs
pub fn songs() -> Vec<Song> {
    let mut list = vec![
        song("1", "Yoru ni Kakeru", "G#m", 130, &["rock", "up-tempo"], "Watch the intro riff. Busy fills in the chorus."),
        song("2", "Pretender", "F", 92, &["ballad", "mid-tempo"], "Hold back in the verse, lift the chorus. Remember the key change."),
        song("3", "Marigold", "C", 102, &["pop", "catchy"], "Simple form. Accent with drum fills."),
        song("4", "Lemon", "Am", 87, &["ballad", "emotional"], "Keep the tempo steady through the climax."),
    ];
    list[0].reference_url = Some("https://www.youtube.com/example".to_string());
    list[1].reference_url = Some("https://www.youtube.com/example2".to_string());
    list[3].reference_url = Some("https://www.youtube.com/example3".to_string());
    list[0].created_at = utc(2024, 1, 15, 0, 0);
    list[1].created_at = utc(2024, 2, 1, 0, 0);
    list[2].created_at = utc(2024, 2, 10, 0, 0);
    list[3].created_at = utc(2024, 2, 20, 0, 0);
    list
}

fn practice_song(song_id: &str, order: u32, goal: &str) -> PracticeSong {
    PracticeSong { song_id: song_id.to_string(), order, goal: goal.to_string() }
}

/// Demo practices
pub fn practices() -> Vec<Practice> {
    vec![
        Practice {
            id: "p1".to_string(),
            date: utc(2025, 1, 25, 14, 0),
            location: "Studio Noah Shibuya".to_string(),
            meet_time: Some("13:50".to_string()),
            purpose: "Run both new songs end to end".to_string(),
            songs: vec![
                practice_song("1", 1, "Steady at 130 BPM"),
                practice_song("2", 2, "Check the arrangement after the key change"),
            ],
            checklist: studio_items(),
            memo: String::new(),
        },
        Practice {
            id: "p2".to_string(),
            date: utc(2025, 1, 28, 19, 0),
            location: "Studio Penta Shinjuku".to_string(),
            meet_time: Some("18:50".to_string()),
            purpose: "Final tune-up before the show".to_string(),
            songs: vec![
                practice_song("1", 1, "Lock in the intro timing"),
                practice_song("3", 2, "Tighten the chorus unison"),
                practice_song("4", 3, "Full run-through"),
            ],
            checklist: studio_items(),
            memo: "Last rehearsal before the show. Check the overall balance.".to_string(),
        },
    ]
}

fn setlist_song(song_id: &str, order: u32, memo: Option<&str>) -> SetlistSong {
    SetlistSong { song_id: song_id.to_string(), order, memo: memo.map(str::to_string) }
}

/// Demo live events
pub fn live_events() -> Vec<LiveEvent> {
    vec![
        LiveEvent {
            id: "l1".to_string(),
            title: "Shinjuku LOFT showcase".to_string(),
            date: utc(2025, 2, 1, 18, 0),
            venue: "Shinjuku LOFT".to_string(),
            meet_time: Some("16:30".to_string()),
            setlist: vec![
                setlist_song("3", 1, Some("Standard tuning")),
                setlist_song("1", 2, Some("Mind the tempo")),
                setlist_song("2", 3, Some("After MC")),
                setlist_song("4", 4, Some("Closer, full emotion")),
            ],
            checklist: live_items(),
            memo: "30 minute slot, 5 minute changeover.".to_string(),
            status: LiveStatus::Scheduled,
        },
        LiveEvent {
            id: "l2".to_string(),
            title: "Shimokitazawa SHELTER".to_string(),
            date: utc(2024, 12, 15, 19, 0),
            venue: "Shimokitazawa SHELTER".to_string(),
            meet_time: None,
            setlist: vec![setlist_song("3", 1, None), setlist_song("4", 2, None)],
            checklist: Vec::new(),
            memo: String::new(),
            status: LiveStatus::Completed,
        },
    ]
}

fn log_song(song_id: &str, achievement: u8) -> LogSong {
    LogSong { song_id: song_id.to_string(), achievement }
}

/// Demo practice logs
pub fn practice_logs() -> Vec<PracticeLog> {
    vec![
        PracticeLog {
            id: "log1".to_string(),
            date: utc(2025, 1, 20, 14, 0),
            related_practice_id: None,
            related_live_id: None,
            songs: vec![log_song("1", 75), log_song("2", 60)],
            tags: Vec::new(),
            good_points: "Tempo is steadier than before.".to_string(),
            issues: "Mistakes in the guitar solo after the key change.".to_string(),
            next_actions: "Drill the phrases after the key change.".to_string(),
        },
        PracticeLog {
            id: "log2".to_string(),
            date: utc(2025, 1, 18, 19, 0),
            related_practice_id: None,
            related_live_id: None,
            songs: vec![log_song("3", 85), log_song("4", 70)],
            tags: Vec::new(),
            good_points: "The chorus unison landed cleanly.".to_string(),
            issues: "Intro entry tends to drag.".to_string(),
            next_actions: "Use the click to lock in the timing.".to_string(),
        },
    ]
}

/// Demo checklist templates
pub fn checklist_templates() -> Vec<ChecklistTemplate> {
    vec![
        ChecklistTemplate {
            id: "template-studio".to_string(),
            name: "Studio practice".to_string(),
            kind: TemplateKind::Studio,
            items: studio_items(),
        },
        ChecklistTemplate {
            id: "template-live".to_string(),
            name: "Show day".to_string(),
            kind: TemplateKind::Live,
            items: live_items(),
        },
    ]
}
