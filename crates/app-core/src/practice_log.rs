//! Practice log rules: tag limits and achievement ratings

use thiserror::Error;

use crate::models::{LogSong, PracticeLog};

/// Maximum number of tags on one log
pub const MAX_TAGS: usize = 3;

/// Rating given to a song when it is first added to a log
pub const DEFAULT_ACHIEVEMENT: u8 = 50;

/// Upper bound of an achievement rating
pub const MAX_ACHIEVEMENT: u8 = 100;

/// Rejected edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Log already carries the maximum number of tags
    #[error("A log can have at most {max} tags")]
    TooManyTags {
        /// Limit
        max: usize,
    },

    /// Tag value already present (case-sensitive)
    #[error("Tag already present: {0}")]
    DuplicateTag(String),

    /// Tag is empty after trimming
    #[error("Tag must not be empty")]
    EmptyTag,

    /// Song already rated in this log
    #[error("Song already in log: {0}")]
    DuplicateSong(String),

    /// Rating above the maximum
    #[error("Achievement for song {song_id} must be at most {max}, got {achievement}")]
    AchievementOutOfRange {
        /// Rated song
        song_id: String,
        /// Rejected rating
        achievement: u8,
        /// Limit
        max: u8,
    },
}

impl PracticeLog {
    /// Add a tag; rejects a fourth tag, duplicates and blanks
    pub fn add_tag(&mut self, tag: &str) -> Result<(), ValidationError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        if self.tags.iter().any(|t| t == tag) {
            return Err(ValidationError::DuplicateTag(tag.to_string()));
        }
        if self.tags.len() >= MAX_TAGS {
            return Err(ValidationError::TooManyTags { max: MAX_TAGS });
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    /// Remove a tag; false if it was not there
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Rate a new song at the default achievement
    pub fn add_song(&mut self, song_id: impl Into<String>) -> Result<(), ValidationError> {
        let song_id = song_id.into();
        if self.songs.iter().any(|s| s.song_id == song_id) {
            return Err(ValidationError::DuplicateSong(song_id));
        }
        self.songs.push(LogSong { song_id, achievement: DEFAULT_ACHIEVEMENT });
        Ok(())
    }

    /// Drop a song's rating; false if it was not rated
    pub fn remove_song(&mut self, song_id: &str) -> bool {
        let before = self.songs.len();
        self.songs.retain(|s| s.song_id != song_id);
        self.songs.len() != before
    }

    /// Set a song's rating, clamped into 0..=100; false if the song is not rated
    pub fn set_achievement(&mut self, song_id: &str, achievement: u32) -> bool {
        let clamped = achievement.min(u32::from(MAX_ACHIEVEMENT)) as u8;
        if u32::from(clamped) != achievement {
            tracing::warn!(song_id, achievement, "Achievement out of range, clamping to 100");
        }
        match self.songs.iter_mut().find(|s| s.song_id == song_id) {
            Some(song) => {
                song.achievement = clamped;
                true
            }
            None => false,
        }
    }

    /// Check a whole record: at most three unique non-blank tags, each song
    /// rated once, every rating within 0..=100
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tags.len() > MAX_TAGS {
            return Err(ValidationError::TooManyTags { max: MAX_TAGS });
        }
        for (index, tag) in self.tags.iter().enumerate() {
            if tag.trim().is_empty() {
                return Err(ValidationError::EmptyTag);
            }
            if self.tags[..index].contains(tag) {
                return Err(ValidationError::DuplicateTag(tag.clone()));
            }
        }
        for (index, song) in self.songs.iter().enumerate() {
            if self.songs[..index].iter().any(|s| s.song_id == song.song_id) {
                return Err(ValidationError::DuplicateSong(song.song_id.clone()));
            }
            if song.achievement > MAX_ACHIEVEMENT {
                return Err(ValidationError::AchievementOutOfRange {
                    song_id: song.song_id.clone(),
                    achievement: song.achievement,
                    max: MAX_ACHIEVEMENT,
                });
            }
        }
        Ok(())
    }

    /// Force the record into shape: blank and repeated tags are dropped and
    /// the rest cut to three, repeated songs keep their first rating, ratings
    /// are clamped to 100. Returns true if anything changed.
    pub fn repair(&mut self) -> bool {
        let before = (self.tags.len(), self.songs.len());
        let mut changed = false;

        let mut tags: Vec<String> = Vec::with_capacity(MAX_TAGS);
        for tag in self.tags.drain(..) {
            let trimmed = tag.trim();
            if trimmed.is_empty() || tags.iter().any(|t| t == trimmed) || tags.len() == MAX_TAGS {
                continue;
            }
            changed |= trimmed.len() != tag.len();
            tags.push(trimmed.to_string());
        }
        self.tags = tags;

        let mut seen: Vec<String> = Vec::with_capacity(self.songs.len());
        self.songs.retain(|s| {
            if seen.contains(&s.song_id) {
                return false;
            }
            seen.push(s.song_id.clone());
            true
        });
        for song in &mut self.songs {
            if song.achievement > MAX_ACHIEVEMENT {
                song.achievement = MAX_ACHIEVEMENT;
                changed = true;
            }
        }

        changed |= before != (self.tags.len(), self.songs.len());
        if changed {
            tracing::warn!(log_id = %self.id, "Practice log repaired");
        }
        changed
    }

    /// Mean rating across songs, `None` when nothing is rated
    pub fn average_achievement(&self) -> Option<f32> {
        if self.songs.is_empty() {
            return None;
        }
        let total: u32 = self.songs.iter().map(|s| u32::from(s.achievement)).sum();
        Some(total as f32 / self.songs.len() as f32)
    }
}
