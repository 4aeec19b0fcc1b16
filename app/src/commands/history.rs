//! FILENAME: app/src/commands/history.rs
// PURPOSE: History commands: save, list, search, replay, delete, export.
// CONTEXT: An entry stores the inputs of a computation, never its result.
//          Saving re-runs the computation to regenerate the script, so an
//          entry that cannot be recomputed is never stored.

use crate::api_types::{
    EquivalenceRequest, HistoryItem, HistoryListResponse, HistoryQuery, SetOperationRequest,
    TruthTableRequest, UniverseRequest, UsageStats,
};
use crate::api_types::{EquivalenceResponse, FunctionResponse, SetOperationResponse, TruthTableResponse, UniverseResponse};
use crate::commands::functions::analyze_with_params;
use crate::commands::logic::{check_equivalence, generate_truth_table};
use crate::commands::sets::{compute_set_operation, compute_universe};
use crate::error::{AppError, AppResult};
use crate::{log_enter_info, log_error, log_exit_info, log_info, AppState};
use engine::AnalysisParams;
use persistence::{HistoryData, HistoryEntry, HistoryKind, PersistenceError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The response of a replayed entry, tagged with its kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "response", rename_all = "camelCase")]
pub enum ReplayResponse {
    TruthTable(TruthTableResponse),
    Equivalence(EquivalenceResponse),
    SetOperation(SetOperationResponse),
    Universe(UniverseResponse),
    Function(FunctionResponse),
}

impl ReplayResponse {
    pub fn script_text(&self) -> &str {
        match self {
            ReplayResponse::TruthTable(r) => &r.script.text,
            ReplayResponse::Equivalence(r) => &r.script.text,
            ReplayResponse::SetOperation(r) => &r.script.text,
            ReplayResponse::Universe(r) => &r.script.text,
            ReplayResponse::Function(r) => &r.script.text,
        }
    }
}

/// Re-runs the computation described by `data` through the regular commands.
fn replay(state: &AppState, data: &HistoryData) -> AppResult<ReplayResponse> {
    let response = match data.clone() {
        HistoryData::TruthTable {
            expression,
            variable_count,
        } => ReplayResponse::TruthTable(generate_truth_table(
            state,
            TruthTableRequest {
                expression,
                variable_count,
            },
        )?),
        HistoryData::Equivalence {
            left,
            right,
            variable_count,
        } => ReplayResponse::Equivalence(check_equivalence(
            state,
            EquivalenceRequest {
                left,
                right,
                variable_count,
            },
        )?),
        HistoryData::SetOperation { a, b, operation } => {
            ReplayResponse::SetOperation(compute_set_operation(state, SetOperationRequest { a, b, operation })?)
        }
        HistoryData::Universe { universe, a, b } => {
            ReplayResponse::Universe(compute_universe(state, UniverseRequest { universe, a, b })?)
        }
        HistoryData::Function {
            expression,
            x_min,
            x_max,
            points,
            x0,
            a,
            b,
            show_tangent,
            show_area,
        } => {
            let params = AnalysisParams {
                x_min,
                x_max,
                points,
                x0,
                a,
                b,
                show_tangent,
                show_area,
            };
            ReplayResponse::Function(analyze_with_params(state, &expression, &params)?)
        }
    };
    Ok(response)
}

/// Recomputes `data`, stores it with its script and returns the new entry.
pub fn save_to_history(state: &AppState, data: HistoryData) -> AppResult<HistoryItem> {
    log_enter_info!("HISTORY", "save_to_history", "kind={}", data.kind().as_str());

    let response = replay(state, &data)?;
    let entry = HistoryEntry::new(data, response.script_text().to_string());

    let item = {
        let mut history = state.lock_history()?;
        let stored = history.add(entry).map_err(|e| {
            log_error!("HISTORY", "history write failed, entry not saved: {}", e);
            e
        })?;
        HistoryItem::from(stored)
    };
    let saved = state.record_saved();

    log_exit_info!("HISTORY", "save_to_history", "id={} saved={}", item.id, saved);
    Ok(item)
}

fn parse_kind_filter(kind: &str) -> AppResult<Option<HistoryKind>> {
    let kind = kind.trim();
    if kind.is_empty() || kind.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    HistoryKind::parse(kind)
        .map(Some)
        .ok_or_else(|| AppError::validation(format!("unknown history kind '{}'", kind)))
}

/// Entries matching the query and kind filter, newest first.
pub fn list_history(state: &AppState, query: HistoryQuery) -> AppResult<HistoryListResponse> {
    log_enter_info!("HISTORY", "list_history", "q={:?} kind={:?}", query.query, query.kind);

    let kind = parse_kind_filter(&query.kind)?;
    let history = state.lock_history()?;
    let items: Vec<HistoryItem> = history
        .search(&query.query, kind)
        .into_iter()
        .map(HistoryItem::from)
        .collect();

    log_exit_info!("HISTORY", "list_history", "{} of {}", items.len(), history.len());
    Ok(HistoryListResponse {
        total: history.len(),
        items,
    })
}

pub fn get_history_entry(state: &AppState, id: &str) -> AppResult<HistoryEntry> {
    let history = state.lock_history()?;
    history
        .get(id)
        .cloned()
        .ok_or_else(|| PersistenceError::EntryNotFound(id.to_string()).into())
}

/// Loads a stored entry back and recomputes it.
pub fn replay_history_entry(state: &AppState, id: &str) -> AppResult<ReplayResponse> {
    log_enter_info!("HISTORY", "replay_history_entry", "id={}", id);
    let entry = get_history_entry(state, id)?;
    let response = replay(state, &entry.data)?;
    log_exit_info!("HISTORY", "replay_history_entry", "kind={}", entry.kind().as_str());
    Ok(response)
}

pub fn delete_history_entry(state: &AppState, id: &str) -> AppResult<()> {
    log_enter_info!("HISTORY", "delete_history_entry", "id={}", id);
    state.lock_history()?.remove(id).map_err(|e| {
        log_error!("HISTORY", "delete of {} failed: {}", id, e);
        e
    })?;
    log_exit_info!("HISTORY", "delete_history_entry");
    Ok(())
}

pub fn clear_history(state: &AppState) -> AppResult<()> {
    let mut history = state.lock_history()?;
    let removed = history.len();
    history.clear().map_err(|e| {
        log_error!("HISTORY", "clear failed: {}", e);
        e
    })?;
    log_info!("HISTORY", "cleared {} entries", removed);
    Ok(())
}

/// Pretty JSON of the whole history.
pub fn export_history(state: &AppState) -> AppResult<String> {
    Ok(state.lock_history()?.export_json()?)
}

/// Writes the history export to `path`.
pub fn export_history_to(state: &AppState, path: &Path) -> AppResult<()> {
    log_enter_info!("HISTORY", "export_history_to", "path={}", path.display());
    state.lock_history()?.export_to(path)?;
    log_exit_info!("HISTORY", "export_history_to");
    Ok(())
}

pub fn get_usage_stats(state: &AppState) -> UsageStats {
    state.usage()
}
