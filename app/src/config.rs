//! FILENAME: app/src/config.rs
// PURPOSE: Application configuration loaded from a JSON file.
// CONTEXT: Every field has a default, so a missing file or a partial file both
//          work. The `numeric` section is handed to the engine and the script
//          emitter unchanged.

use crate::error::{AppError, AppResult};
use engine::NumericConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log file; console only when unset.
    pub log_path: Option<PathBuf>,
    /// History file; history stays in memory when unset.
    pub history_path: Option<PathBuf>,
    /// One of off, error, warn, info, debug, trace.
    pub log_level: String,
    /// Point-count window enforced on function requests.
    pub min_points: usize,
    pub max_points: usize,
    pub numeric: NumericConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_path: None,
            history_path: None,
            log_level: "info".to_string(),
            min_points: 80,
            max_points: 3000,
            numeric: NumericConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| AppError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
