//! FILENAME: core/script-engine/src/lib.rs
//! PURPOSE: Renders every computed result as an equivalent MATLAB script.
//! CONTEXT: Emission is a pure function of the inputs the engine used, so a
//! script replays the same computation outside the application. Nothing here
//! evaluates expressions; it only formats. Output is byte-for-byte stable for
//! identical inputs.
//!
//! DIALECT NOTES:
//! - Strings are single-quoted, embedded quotes are doubled
//! - Local helper functions are appended at the end of the script
//! - Sets use `'stable'` so the external order matches the in-process order

pub mod function;
pub mod logic;
pub mod sets;

pub use function::{function_script, render_vectorized};
pub use logic::{equivalence_script, truth_table_script, LOGIC_HELPER};
pub use sets::{set_operation_script, universe_script};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptKind {
    TruthTable,
    Equivalence,
    SetOperation,
    Universe,
    Function,
}

impl ScriptKind {
    /// Default download name of a script of this kind.
    pub fn file_name(self) -> &'static str {
        match self {
            ScriptKind::TruthTable => "truth_table.m",
            ScriptKind::Equivalence => "logic_equivalence.m",
            ScriptKind::SetOperation => "set_operations.m",
            ScriptKind::Universe => "universe_complements.m",
            ScriptKind::Function => "function_analysis.m",
        }
    }
}

/// An emitted script and where it should be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub kind: ScriptKind,
    pub file_name: String,
    pub text: String,
}

impl Script {
    pub(crate) fn new(kind: ScriptKind, lines: Vec<String>) -> Self {
        let mut text = lines.join("\n");
        text.push('\n');
        Script {
            kind,
            file_name: kind.file_name().to_string(),
            text,
        }
    }
}

/// Doubles every single quote so `text` can sit inside a MATLAB string literal.
pub fn escape_quotes(text: &str) -> String {
    text.replace('\'', "''")
}

/// `text` as a quoted MATLAB string literal.
pub fn quoted(text: &str) -> String {
    format!("'{}'", escape_quotes(text))
}

/// A MATLAB numeric literal for `value`.
pub fn matlab_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Inf" } else { "-Inf" }.to_string()
    } else {
        engine::format_number(value)
    }
}
