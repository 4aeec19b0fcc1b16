//! FILENAME: app/src/api_types.rs
// PURPOSE: Request and response types of the command layer.
// CONTEXT: All structs use camelCase serialization for JavaScript interoperability.
//          Responses carry the engine result, its display strings and the
//          emitted script, so a front end renders without further calls.

use engine::{Equivalence, FunctionAnalysis, SetOperationResult, TruthTable, UniverseComplements};
use persistence::HistoryEntry;
use script_engine::Script;
use serde::{Deserialize, Serialize};

// ============================================================================
// LOGIC
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruthTableRequest {
    pub expression: String,
    pub variable_count: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruthTableResponse {
    pub table: TruthTable,
    pub script: Script,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalenceRequest {
    pub left: String,
    pub right: String,
    pub variable_count: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalenceResponse {
    pub result: Equivalence,
    /// "Equivalent" or "Not equivalent".
    pub verdict: String,
    /// e.g. "A=1, B=0 (R1≠R2)"
    pub counterexample_text: Option<String>,
    pub script: Script,
}

// ============================================================================
// SETS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOperationRequest {
    pub a: String,
    pub b: String,
    /// One of union, intersect, setdiffAB, setdiffBA, setxor.
    pub operation: String,
}

/// Display strings of the three Venn regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDisplay {
    pub a_only: String,
    pub intersection: String,
    pub b_only: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOperationResponse {
    pub result: SetOperationResult,
    pub a_display: String,
    pub b_display: String,
    pub result_display: String,
    /// "|A|, |B|", e.g. "2, 3"
    pub cardinality: String,
    pub regions: RegionDisplay,
    pub script: Script,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseRequest {
    pub universe: String,
    pub a: String,
    pub b: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseResponse {
    pub result: UniverseComplements,
    pub universe_display: String,
    pub a_display: String,
    pub b_display: String,
    pub a_complement_display: String,
    pub b_complement_display: String,
    /// Set when A or B holds elements outside U.
    pub warning: Option<String>,
    pub script: Script,
}

// ============================================================================
// FUNCTIONS
// ============================================================================

/// Numeric fields arrive as the raw text of their inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequest {
    pub expression: String,
    pub x_min: String,
    pub x_max: String,
    pub points: String,
    pub x0: String,
    pub a: String,
    pub b: String,
    #[serde(default)]
    pub show_tangent: bool,
    #[serde(default)]
    pub show_area: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub analysis: FunctionAnalysis,
    pub value_text: String,
    pub derivative_text: String,
    pub integral_text: String,
    pub script: Script,
}

/// Six decimals, or "NaN" for an undefined value.
pub fn numeric_text(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "NaN".to_string(),
    }
}

/// Overlay toggles for the last analysis. Absent fields keep their state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRequest {
    pub show_tangent: Option<bool>,
    pub show_area: Option<bool>,
}

// ============================================================================
// HISTORY
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default)]
    pub query: String,
    /// "all" or one of the entry kinds (logic_tt, logic_eq, sets_core, sets_uni, fx).
    #[serde(default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub kind: String,
    pub label: String,
    pub summary: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub script: String,
}

impl From<&HistoryEntry> for HistoryItem {
    fn from(entry: &HistoryEntry) -> Self {
        let kind = entry.kind();
        HistoryItem {
            id: entry.id.clone(),
            kind: kind.as_str().to_string(),
            label: kind.label().to_string(),
            summary: entry.data.summary(),
            timestamp: entry.timestamp.to_rfc3339(),
            script: entry.script.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryListResponse {
    /// Entries stored, before filtering.
    pub total: usize,
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub runs: u64,
    pub saved: u64,
}
