//! FILENAME: app/src/commands/logic.rs
// PURPOSE: Truth table and equivalence commands.

use crate::api_types::{EquivalenceRequest, EquivalenceResponse, TruthTableRequest, TruthTableResponse};
use crate::error::AppResult;
use crate::validation::{require_text, variable_count};
use crate::{log_enter_info, log_exit_info, log_warn, AppState};
use script_engine::{equivalence_script, truth_table_script};

/// Builds the truth table of one expression over the declared variables.
/// The expression is kept verbatim for the result header and the script.
pub fn generate_truth_table(state: &AppState, request: TruthTableRequest) -> AppResult<TruthTableResponse> {
    log_enter_info!(
        "LOGIC",
        "generate_truth_table",
        "expr={:?} vars={}",
        request.expression,
        request.variable_count
    );

    require_text("expression", &request.expression)?;
    let count = variable_count(request.variable_count)?;

    let table = engine::build_truth_table(&request.expression, count).map_err(|e| {
        log_warn!("LOGIC", "truth table failed: {}", e);
        e
    })?;
    let script = truth_table_script(&table);
    state.record_run();

    log_exit_info!("LOGIC", "generate_truth_table", "rows={}", table.rows.len());
    Ok(TruthTableResponse { table, script })
}

/// Compares two expressions row by row and reports the first mismatch.
pub fn check_equivalence(state: &AppState, request: EquivalenceRequest) -> AppResult<EquivalenceResponse> {
    log_enter_info!(
        "LOGIC",
        "check_equivalence",
        "left={:?} right={:?} vars={}",
        request.left,
        request.right,
        request.variable_count
    );

    require_text("expression 1", &request.left)?;
    require_text("expression 2", &request.right)?;
    let count = variable_count(request.variable_count)?;

    let result = engine::check_equivalence(&request.left, &request.right, count).map_err(|e| {
        log_warn!("LOGIC", "equivalence check failed: {}", e);
        e
    })?;
    let script = equivalence_script(&result);
    state.record_run();

    let verdict = if result.equivalent {
        "Equivalent"
    } else {
        "Not equivalent"
    };
    let counterexample_text = result.counterexample.as_ref().map(|c| c.describe());

    log_exit_info!("LOGIC", "check_equivalence", "{}", verdict);
    Ok(EquivalenceResponse {
        verdict: verdict.to_string(),
        counterexample_text,
        result,
        script,
    })
}
