//! Core domain for Bandnote
//!
//! This crate contains the band's data model (songs, practices, live events,
//! practice logs, checklists, profile) together with the pure rules that keep
//! it consistent: ordering repair, checklist cloning, tag limits, and the
//! read-side queries the screens are built on.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checklist;
pub mod ids;
pub mod lookup;
pub mod models;
pub mod ordering;
pub mod practice_log;
pub mod schedule;
pub mod seed;
pub mod timestamp;

pub use models::{
    ChecklistItem, ChecklistTemplate, Entity, LiveEvent, LiveStatus, LogSong, Practice,
    PracticeLog, PracticeSong, Profile, SetlistSong, Song, TemplateKind,
};
pub use practice_log::ValidationError;
pub use seed::SeedData;
