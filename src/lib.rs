//! Bandnote: a band's practice and gig planner, persistence and state layer
//!
//! [`App::open`] wires the on-device store, every entity provider and the
//! theme provider together. Screens read from the providers and call their
//! mutators; writes reach storage in the background.
//!
//! # Example
//!
//! ```no_run
//! use bandnote::{App, AppConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let app = App::open(AppConfig::new("bandnote_data"))?;
//! app.load().await;
//! println!("{} songs", app.state().songs().len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;

pub use app_core::SeedData;
pub use app_state::AppState;
pub use app_ui::ThemeProvider;
pub use config::AppConfig;

use anyhow::{Context, Result};
use std::sync::Arc;
use storage::{KeyValueStore, SledKvStore};
use tracing::info;

/// A running application session
pub struct App {
    config: AppConfig,
    store: Arc<SledKvStore>,
    state: AppState,
    theme: ThemeProvider,
}

impl App {
    /// Open the database under `config.data_dir` and build every provider.
    ///
    /// Providers hold seed data until [`load`](Self::load) is awaited.
    pub fn open(config: AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("Failed to create data directory {}", config.data_dir.display()))?;

        let kv_config = config.resolved_kv_config();
        let store = Arc::new(
            SledKvStore::open(kv_config.clone())
                .with_context(|| format!("Failed to open database at {}", kv_config.path))?,
        );
        let kv: Arc<dyn KeyValueStore> = store.clone();

        let seed = if config.seed_demo_data { SeedData::demo() } else { SeedData::empty() };
        let state = AppState::with_seed(Arc::clone(&kv), seed);
        let theme = ThemeProvider::new(kv);

        info!(path = %kv_config.path, demo = config.seed_demo_data, "Opened app");
        Ok(Self { config, store, state, theme })
    }

    /// Load every provider and the theme concurrently
    pub async fn load(&self) {
        tokio::join!(self.state.load(), self.theme.load());
    }

    /// Check if anything is still loading
    pub fn is_loading(&self) -> bool {
        self.state.is_loading() || self.theme.is_loading()
    }

    /// Entity providers
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Theme provider
    pub fn theme(&self) -> &ThemeProvider {
        &self.theme
    }

    /// Configuration the app was opened with
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Flush pending database writes to disk
    pub fn flush(&self) -> Result<()> {
        self.store.flush().context("Failed to flush database")
    }
}
