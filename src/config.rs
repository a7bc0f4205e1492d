//! Application configuration

use std::path::{Path, PathBuf};
use storage::KvConfig;

/// File name of the key-value database inside the data directory
pub const DB_FILE_NAME: &str = "bandnote_kv.db";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the on-device database
    pub data_dir: PathBuf,
    /// Key-value store tuning; its path is derived from `data_dir`
    pub kv: KvConfig,
    /// Default `tracing` filter, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Seed empty collections with the demo band
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("bandnote_data"),
            kv: KvConfig::default(),
            log_filter: "info".to_string(),
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    /// Create a configuration rooted at `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self { data_dir: data_dir.as_ref().to_path_buf(), ..Default::default() }
    }

    /// Set key-value store tuning
    pub fn kv_config(mut self, kv: KvConfig) -> Self {
        self.kv = kv;
        self
    }

    /// Set the default log filter
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Enable or disable demo seed data
    pub fn seed_demo_data(mut self, enabled: bool) -> Self {
        self.seed_demo_data = enabled;
        self
    }

    /// Full path of the database
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Store configuration pointing at [`db_path`](Self::db_path)
    pub fn resolved_kv_config(&self) -> KvConfig {
        KvConfig { path: self.db_path().to_string_lossy().into_owned(), ..self.kv.clone() }
    }
}
