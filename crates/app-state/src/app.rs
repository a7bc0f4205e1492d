//! The application state container
//!
//! `AppState` owns one provider per collection, all bound to the same
//! key-value store. It is created once per session and shared by reference
//! with every screen.

use app_core::{lookup, LiveEvent, Practice, SeedData, TemplateKind};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use storage::KeyValueStore;
use tracing::info;

use crate::accessors::StorageAccessors;
use crate::live_events::LiveEventProvider;
use crate::practice_logs::PracticeLogProvider;
use crate::practices::PracticeProvider;
use crate::profile::ProfileProvider;
use crate::songs::SongProvider;
use crate::templates::TemplateCatalog;

/// Every provider of the app
pub struct AppState {
    accessors: StorageAccessors,
    songs: SongProvider,
    practices: PracticeProvider,
    live_events: LiveEventProvider,
    practice_logs: PracticeLogProvider,
    profile: ProfileProvider,
    templates: TemplateCatalog,
}

impl AppState {
    /// Create the state with the bundled demo data as seed
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_seed(kv, SeedData::demo())
    }

    /// Create the state with an explicit seed
    pub fn with_seed(kv: Arc<dyn KeyValueStore>, seed: SeedData) -> Self {
        let accessors = StorageAccessors::new(kv);
        Self {
            songs: SongProvider::new(accessors.songs.clone(), seed.songs),
            practices: PracticeProvider::new(accessors.practices.clone(), seed.practices),
            live_events: LiveEventProvider::new(accessors.live_events.clone(), seed.live_events),
            practice_logs: PracticeLogProvider::new(accessors.practice_logs.clone(), seed.practice_logs),
            profile: ProfileProvider::new(accessors.profile.clone()),
            templates: TemplateCatalog::new(accessors.checklist_templates.clone(), seed.checklist_templates),
            accessors,
        }
    }

    /// Load every provider concurrently
    pub async fn load(&self) {
        tokio::join!(
            self.songs.load(),
            self.practices.load(),
            self.live_events.load(),
            self.practice_logs.load(),
            self.profile.load(),
            self.templates.load(),
        );
        info!(
            songs = self.songs.len(),
            practices = self.practices.len(),
            live_events = self.live_events.len(),
            practice_logs = self.practice_logs.len(),
            "App state ready"
        );
    }

    /// Check if any provider is still loading
    pub fn is_loading(&self) -> bool {
        self.songs.is_loading()
            || self.practices.is_loading()
            || self.live_events.is_loading()
            || self.practice_logs.is_loading()
            || self.profile.is_loading()
            || self.templates.is_loading()
    }

    /// Raw storage accessors
    pub fn accessors(&self) -> &StorageAccessors {
        &self.accessors
    }

    /// Songs
    pub fn songs(&self) -> &SongProvider {
        &self.songs
    }

    /// Practices
    pub fn practices(&self) -> &PracticeProvider {
        &self.practices
    }

    /// Live events
    pub fn live_events(&self) -> &LiveEventProvider {
        &self.live_events
    }

    /// Practice logs
    pub fn practice_logs(&self) -> &PracticeLogProvider {
        &self.practice_logs
    }

    /// Profile
    pub fn profile(&self) -> &ProfileProvider {
        &self.profile
    }

    /// Checklist templates
    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    /// Title for a referenced song; deleted songs resolve to a placeholder
    pub fn song_title(&self, song_id: &str) -> String {
        lookup::song_title(&self.songs.items(), song_id).to_string()
    }

    /// A new, unsaved practice with the studio checklist filled in
    pub fn draft_practice(&self, date: DateTime<Utc>, location: &str) -> Practice {
        let mut practice = Practice::new(date, location);
        practice.checklist = self.templates.instantiate(TemplateKind::Studio);
        practice
    }

    /// A new, unsaved live event with the show-day checklist filled in
    pub fn draft_live_event(&self, title: &str, date: DateTime<Utc>, venue: &str) -> LiveEvent {
        let mut event = LiveEvent::new(title, date, venue);
        event.checklist = self.templates.instantiate(TemplateKind::Live);
        event
    }
}
