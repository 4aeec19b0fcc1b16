//! FILENAME: core/persistence/src/history.rs
//! PURPOSE: Saved-results history backed by a pretty-printed JSON file.
//! CONTEXT: Each entry stores the inputs needed to re-run a computation and the
//! script emitted for it. Entries are kept newest first. A history file that
//! cannot be parsed is treated as empty so a damaged file never blocks the
//! application; the next save overwrites it.

use crate::{PersistenceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

// ============================================================================
// ENTRY TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryKind {
    #[serde(rename = "logic_tt")]
    TruthTable,
    #[serde(rename = "logic_eq")]
    Equivalence,
    #[serde(rename = "sets_core")]
    SetOperation,
    #[serde(rename = "sets_uni")]
    Universe,
    #[serde(rename = "fx")]
    Function,
}

impl HistoryKind {
    pub const ALL: [HistoryKind; 5] = [
        HistoryKind::TruthTable,
        HistoryKind::Equivalence,
        HistoryKind::SetOperation,
        HistoryKind::Universe,
        HistoryKind::Function,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HistoryKind::TruthTable => "logic_tt",
            HistoryKind::Equivalence => "logic_eq",
            HistoryKind::SetOperation => "sets_core",
            HistoryKind::Universe => "sets_uni",
            HistoryKind::Function => "fx",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        HistoryKind::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            HistoryKind::TruthTable => "Logic · Truth table",
            HistoryKind::Equivalence => "Logic · Equivalence",
            HistoryKind::SetOperation => "Sets · Operations",
            HistoryKind::Universe => "Sets · Universe",
            HistoryKind::Function => "Functions · Analysis",
        }
    }
}

/// The inputs of a saved computation, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HistoryData {
    #[serde(rename = "logic_tt", rename_all = "camelCase")]
    TruthTable {
        expression: String,
        variable_count: u8,
    },
    #[serde(rename = "logic_eq", rename_all = "camelCase")]
    Equivalence {
        left: String,
        right: String,
        variable_count: u8,
    },
    #[serde(rename = "sets_core", rename_all = "camelCase")]
    SetOperation {
        a: String,
        b: String,
        operation: String,
    },
    #[serde(rename = "sets_uni", rename_all = "camelCase")]
    Universe {
        universe: String,
        a: String,
        b: String,
    },
    #[serde(rename = "fx", rename_all = "camelCase")]
    Function {
        expression: String,
        x_min: f64,
        x_max: f64,
        points: usize,
        x0: f64,
        a: f64,
        b: f64,
        show_tangent: bool,
        show_area: bool,
    },
}

impl HistoryData {
    pub fn kind(&self) -> HistoryKind {
        match self {
            HistoryData::TruthTable { .. } => HistoryKind::TruthTable,
            HistoryData::Equivalence { .. } => HistoryKind::Equivalence,
            HistoryData::SetOperation { .. } => HistoryKind::SetOperation,
            HistoryData::Universe { .. } => HistoryKind::Universe,
            HistoryData::Function { .. } => HistoryKind::Function,
        }
    }

    /// One-line description shown in history lists.
    pub fn summary(&self) -> String {
        match self {
            HistoryData::TruthTable { expression, .. } => expression.clone(),
            HistoryData::Equivalence { left, right, .. } => format!("{}  ||  {}", left, right),
            HistoryData::SetOperation { a, b, operation } => format!("{}  |  {}  |  {}", a, operation, b),
            HistoryData::Universe { universe, a, b } => format!("U={}  A={}  B={}", universe, a, b),
            HistoryData::Function {
                expression,
                x_min,
                x_max,
                ..
            } => format!("f(x)={}  [{},{}]", expression, x_min, x_max),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub data: HistoryData,
    pub script: String,
}

impl HistoryEntry {
    /// Creates an entry with a fresh id stamped with the current time.
    pub fn new(data: HistoryData, script: String) -> Self {
        HistoryEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            data,
            script,
        }
    }

    pub fn kind(&self) -> HistoryKind {
        self.data.kind()
    }

    /// Case-insensitive match against label, summary and script.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let haystack = format!("{} {} {}", self.kind().label(), self.data.summary(), self.script).to_lowercase();
        haystack.contains(&query)
    }
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct HistoryStore {
    path: Option<PathBuf>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        HistoryStore::default()
    }

    /// Loads the history at `path`. A missing file gives an empty store, and so
    /// does a file whose contents are not a valid history.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                Vec::new()
            } else {
                match serde_json::from_str::<Vec<HistoryEntry>>(&text) {
                    Ok(entries) => entries,
                    Err(e) => {
                        log::warn!("ignoring unreadable history file {}: {}", path.display(), e);
                        Vec::new()
                    }
                }
            }
        } else {
            Vec::new()
        };

        log::debug!("loaded {} history entries from {}", entries.len(), path.display());
        Ok(HistoryStore {
            path: Some(path),
            entries,
        })
    }

    /// Writes the whole history back to its file, if it has one.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.export_json()?)?;
        Ok(())
    }

    /// Inserts `entry` as the newest one and persists. On a failed write the
    /// entry is taken back out, so memory and file never disagree.
    pub fn add(&mut self, entry: HistoryEntry) -> Result<&HistoryEntry> {
        self.entries.insert(0, entry);
        if let Err(e) = self.save() {
            self.entries.remove(0);
            return Err(e);
        }
        Ok(&self.entries[0])
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Removes the entry with `id`. A failed write puts it back in place.
    pub fn remove(&mut self, id: &str) -> Result<HistoryEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| PersistenceError::EntryNotFound(id.to_string()))?;
        let removed = self.entries.remove(index);
        if let Err(e) = self.save() {
            self.entries.insert(index, removed);
            return Err(e);
        }
        Ok(removed)
    }

    /// Drops every entry. A failed write restores them.
    pub fn clear(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.entries);
        if let Err(e) = self.save() {
            self.entries = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Entries newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching `query`, optionally restricted to one kind.
    pub fn search(&self, query: &str, kind: Option<HistoryKind>) -> Vec<&HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| kind.map_or(true, |k| e.kind() == k))
            .filter(|e| e.matches(query))
            .collect()
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Writes a copy of the history to `path`, independent of the store's own file.
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.export_json()?)?;
        Ok(())
    }
}
