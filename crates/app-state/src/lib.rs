//! Application state management for Bandnote
//!
//! This crate owns the in-memory collections the screens read from. Each
//! provider loads its collection once, falls back to seed data, applies
//! mutations synchronously and persists the full collection in the
//! background.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accessors;
pub mod app;
pub mod live_events;
pub mod practice_logs;
pub mod practices;
pub mod profile;
pub mod provider;
pub mod songs;
pub mod templates;
pub mod write_behind;

#[cfg(test)]
pub(crate) mod test_utils;

pub use accessors::StorageAccessors;
pub use app::AppState;
pub use live_events::LiveEventProvider;
pub use practice_logs::PracticeLogProvider;
pub use practices::PracticeProvider;
pub use profile::ProfileProvider;
pub use provider::{EntityProvider, LoadPhase};
pub use songs::SongProvider;
pub use templates::TemplateCatalog;
pub use write_behind::{PersistError, PersistHandle, SnapshotSink, WriteBehind, WriteOutcome};
