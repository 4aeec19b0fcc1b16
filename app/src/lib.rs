//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point (command bridge).
// CONTEXT: Owns the application state every command works against: the
//          configuration, the history store, the last function analysis and
//          the usage counters. Engine crates stay pure; this crate is the only
//          layer that holds state between calls.

use engine::{CompiledFunction, FunctionAnalysis};
use persistence::HistoryStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

pub mod api_types;
pub mod commands;
pub mod config;
pub mod error;
pub mod invoke;
pub mod logging;
pub mod validation;

pub use api_types::{
    EquivalenceRequest, EquivalenceResponse, FunctionRequest, FunctionResponse, HistoryItem,
    HistoryListResponse, HistoryQuery, OverlayRequest, RegionDisplay, SetOperationRequest,
    SetOperationResponse, TruthTableRequest, TruthTableResponse, UniverseRequest,
    UniverseResponse, UsageStats,
};
pub use commands::*;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::{get_log_path, init_log_file, init_logging, next_seq, write_log};

/// The most recent successful function analysis, kept for overlay
/// redraws and export.
#[derive(Debug, Clone)]
pub struct LastFunction {
    pub function: CompiledFunction,
    pub analysis: FunctionAnalysis,
}

pub struct AppState {
    pub config: AppConfig,
    pub history: Mutex<HistoryStore>,
    pub last_function: Mutex<Option<LastFunction>>,
    /// Successful computations in this process
    pub runs: AtomicU64,
    /// History entries saved in this process
    pub saved: AtomicU64,
}

impl AppState {
    fn with_history(config: AppConfig, history: HistoryStore) -> Self {
        AppState {
            config,
            history: Mutex::new(history),
            last_function: Mutex::new(None),
            runs: AtomicU64::new(0),
            saved: AtomicU64::new(0),
        }
    }

    /// Builds state from a configuration, loading the history file when one is set.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let history = match &config.history_path {
            Some(path) => HistoryStore::load(path)?,
            None => HistoryStore::in_memory(),
        };
        log_info!(
            "SYS",
            "Creating AppState (history: {} entries, persisted: {})",
            history.len(),
            config.history_path.is_some()
        );
        Ok(AppState::with_history(config, history))
    }

    pub fn record_run(&self) -> u64 {
        self.runs.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn record_saved(&self) -> u64 {
        self.saved.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn usage(&self) -> UsageStats {
        UsageStats {
            runs: self.runs.load(Ordering::SeqCst),
            saved: self.saved.load(Ordering::SeqCst),
        }
    }

    pub(crate) fn lock_history(&self) -> AppResult<MutexGuard<'_, HistoryStore>> {
        self.history
            .lock()
            .map_err(|e| AppError::StateLock(format!("history: {}", e)))
    }

    pub(crate) fn lock_last_function(&self) -> AppResult<MutexGuard<'_, Option<LastFunction>>> {
        self.last_function
            .lock()
            .map_err(|e| AppError::StateLock(format!("last function: {}", e)))
    }
}

/// State with default configuration and an in-memory history.
pub fn create_app_state() -> AppState {
    log_info!("SYS", "Creating AppState (in-memory)");
    AppState::with_history(AppConfig::default(), HistoryStore::in_memory())
}

/// Loads the configuration, starts logging and builds the state.
pub fn run(config_path: &std::path::Path) -> AppResult<AppState> {
    let config = AppConfig::load(config_path)?;
    init_logging(config.level_filter(), config.log_path.as_deref()).map_err(AppError::Config)?;
    log_info!("SYS", "Configuration loaded from {}", config_path.display());
    AppState::from_config(config)
}
