//! FILENAME: app/src/commands/sets.rs
// PURPOSE: Binary set operation and universe complement commands.

use crate::api_types::{RegionDisplay, SetOperationRequest, SetOperationResponse, UniverseRequest, UniverseResponse};
use crate::error::AppResult;
use crate::validation::{require_set_operands, require_universe};
use crate::{log_enter_info, log_exit_info, log_warn, AppState};
use engine::SetOperation;
use script_engine::{set_operation_script, universe_script};

pub fn compute_set_operation(state: &AppState, request: SetOperationRequest) -> AppResult<SetOperationResponse> {
    log_enter_info!(
        "SETS",
        "compute_set_operation",
        "a={:?} b={:?} op={}",
        request.a,
        request.b,
        request.operation
    );

    require_set_operands(&request.a, &request.b)?;
    let operation = SetOperation::from_selector(&request.operation);

    let result = engine::compute_set_operation(&request.a, &request.b, operation);
    let script = set_operation_script(&result);
    state.record_run();

    let (card_a, card_b) = result.cardinalities();
    let response = SetOperationResponse {
        a_display: result.a.to_string(),
        b_display: result.b.to_string(),
        result_display: result.result.to_string(),
        cardinality: format!("{}, {}", card_a, card_b),
        regions: RegionDisplay {
            a_only: result.regions.a_only.to_string(),
            intersection: result.regions.intersection.to_string(),
            b_only: result.regions.b_only.to_string(),
        },
        result,
        script,
    };

    log_exit_info!(
        "SETS",
        "compute_set_operation",
        "{} = {}",
        response.result.label,
        response.result_display
    );
    Ok(response)
}

/// Complements of A and B relative to U. Elements of A or B outside U do not
/// fail the command; they raise a warning instead.
pub fn compute_universe(state: &AppState, request: UniverseRequest) -> AppResult<UniverseResponse> {
    log_enter_info!(
        "SETS",
        "compute_universe",
        "u={:?} a={:?} b={:?}",
        request.universe,
        request.a,
        request.b
    );

    require_universe(&request.universe)?;

    let result = engine::compute_universe(&request.universe, &request.a, &request.b);
    let script = universe_script(&result);
    state.record_run();

    let warning = if result.out_of_universe {
        let mut outside: Vec<String> = Vec::new();
        outside.extend(result.a_outside.iter().map(|e| e.canonical()));
        outside.extend(result.b_outside.iter().map(|e| e.canonical()));
        log_warn!("SETS", "elements outside U: {}", outside.join(", "));
        Some(format!("Warning: elements outside U ({})", outside.join(", ")))
    } else {
        None
    };

    let response = UniverseResponse {
        universe_display: result.universe.to_string(),
        a_display: result.a.to_string(),
        b_display: result.b.to_string(),
        a_complement_display: result.a_complement.to_string(),
        b_complement_display: result.b_complement.to_string(),
        warning,
        result,
        script,
    };

    log_exit_info!(
        "SETS",
        "compute_universe",
        "Ac={} Bc={}",
        response.a_complement_display,
        response.b_complement_display
    );
    Ok(response)
}
