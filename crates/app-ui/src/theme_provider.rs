//! Process-wide theme mode
//!
//! The mode is stored as the bare string `light` or `dark` under
//! `theme_mode`, not as JSON. Toggling updates memory at once and writes the
//! new mode in the background through the same write-behind used by the
//! entity providers.

use app_state::{LoadPhase, PersistHandle, SnapshotSink, WriteBehind};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use storage::{keys, KeyValueStore, StorageError};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::theme::{palette, ThemeColors, ThemeMode};

/// Writes the mode as a raw string
struct ThemeModeSink {
    kv: Arc<dyn KeyValueStore>,
}

#[async_trait]
impl SnapshotSink<ThemeMode> for ThemeModeSink {
    async fn write(&self, mode: &ThemeMode) -> Result<(), StorageError> {
        self.kv.set_item(keys::THEME_MODE, mode.as_str().to_string()).await?;
        Ok(())
    }
}

/// Light/dark preference with its derived palette
pub struct ThemeProvider {
    kv: Arc<dyn KeyValueStore>,
    phase: RwLock<LoadPhase>,
    mode: watch::Sender<ThemeMode>,
    writer: Arc<WriteBehind<ThemeMode>>,
}

impl ThemeProvider {
    /// Create a provider in light mode
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        let (mode, _) = watch::channel(ThemeMode::Light);
        let writer = Arc::new(WriteBehind::new("theme_mode", ThemeModeSink { kv: Arc::clone(&kv) }));
        Self { kv, phase: RwLock::new(LoadPhase::Uninitialized), mode, writer }
    }

    /// Read the stored mode once; absent, unreadable or unknown values
    /// leave light mode in place
    pub async fn load(&self) {
        {
            let mut phase = self.phase.write();
            if *phase != LoadPhase::Uninitialized {
                return;
            }
            *phase = LoadPhase::Loading;
        }

        match self.kv.get_item(keys::THEME_MODE).await {
            Ok(Some(raw)) => match raw.parse::<ThemeMode>() {
                Ok(mode) => {
                    info!(mode = mode.as_str(), "Loaded theme mode");
                    // A toggle made while loading wins
                    self.mode.send_if_modified(|current| {
                        if self.writer.has_issued() || *current == mode {
                            return false;
                        }
                        *current = mode;
                        true
                    });
                }
                Err(e) => warn!(error = %e, "Ignoring stored theme mode"),
            },
            Ok(None) => debug!("No stored theme mode"),
            Err(e) => error!(error = %e, "Failed to load theme mode"),
        }

        *self.phase.write() = LoadPhase::Ready;
    }

    /// Check if the stored mode has not been read yet
    pub fn is_loading(&self) -> bool {
        *self.phase.read() != LoadPhase::Ready
    }

    /// Current mode
    pub fn mode(&self) -> ThemeMode {
        *self.mode.borrow()
    }

    /// Check if dark mode is active
    pub fn is_dark(&self) -> bool {
        self.mode().is_dark()
    }

    /// Palette for the current mode
    pub fn colors(&self) -> &'static ThemeColors {
        palette(self.mode())
    }

    /// Flip the mode and persist it
    pub fn toggle(&self) -> PersistHandle {
        let mut pending = (0, ThemeMode::Light);
        self.mode.send_modify(|mode| {
            *mode = mode.toggled();
            pending = (self.writer.issue(), *mode);
        });
        let (generation, mode) = pending;
        debug!(mode = mode.as_str(), "Theme toggled");
        self.writer.spawn(generation, Arc::new(mode))
    }

    /// Receive every mode change
    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.mode.subscribe()
    }
}
