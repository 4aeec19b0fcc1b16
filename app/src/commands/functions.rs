//! FILENAME: app/src/commands/functions.rs
// PURPOSE: Function analysis, overlay toggles and export of the last result.
// CONTEXT: The last successful analysis is kept in AppState. Overlay toggles
//          recompute from it without re-sampling, and a failed analysis clears
//          it so an export never returns a stale result.

use crate::api_types::{numeric_text, FunctionRequest, FunctionResponse, OverlayRequest};
use crate::error::{AppError, AppResult};
use crate::validation::{check_function_params, function_params, require_text};
use crate::{log_debug, log_enter_info, log_exit_info, log_warn, AppState, LastFunction};
use engine::{AnalysisParams, CompiledFunction, FunctionAnalysis};
use script_engine::function_script;

fn response_for(last: &LastFunction, state: &AppState) -> FunctionResponse {
    let analysis = last.analysis.clone();
    let script = function_script(last.function.program(), &analysis.params, &state.config.numeric);
    FunctionResponse {
        value_text: numeric_text(analysis.value),
        derivative_text: numeric_text(analysis.derivative),
        integral_text: numeric_text(analysis.integral),
        analysis,
        script,
    }
}

fn run_analysis(state: &AppState, expression: &str, params: &AnalysisParams) -> AppResult<LastFunction> {
    let expression = require_text("f(x)", expression)?;
    check_function_params(params, &state.config)?;
    let function = CompiledFunction::compile(expression)?;
    let analysis = function.analyze(params, &state.config.numeric)?;
    Ok(LastFunction { function, analysis })
}

/// Samples, differentiates and integrates `f(x)` and emits its script.
pub fn analyze_function(state: &AppState, request: FunctionRequest) -> AppResult<FunctionResponse> {
    log_enter_info!(
        "FUNCTIONS",
        "analyze_function",
        "f(x)={:?} x=[{},{}] n={}",
        request.expression,
        request.x_min,
        request.x_max,
        request.points
    );

    let params = match function_params(&request, &state.config) {
        Ok(params) => params,
        Err(e) => {
            state.lock_last_function()?.take();
            log_warn!("FUNCTIONS", "rejected input: {}", e);
            return Err(e);
        }
    };
    analyze_with_params(state, &request.expression, &params)
}

/// Runs an analysis from typed parameters and stores it as the last result.
/// A failure clears the last result.
pub fn analyze_with_params(
    state: &AppState,
    expression: &str,
    params: &AnalysisParams,
) -> AppResult<FunctionResponse> {
    let outcome = run_analysis(state, expression, params);
    let mut slot = state.lock_last_function()?;

    match outcome {
        Ok(last) => {
            let response = response_for(&last, state);
            *slot = Some(last);
            state.record_run();

            let undefined = response.analysis.ys.iter().filter(|y| y.is_none()).count();
            if undefined > 0 {
                log_debug!("FUNCTIONS", "{} undefined samples", undefined);
            }
            log_exit_info!(
                "FUNCTIONS",
                "analyze_function",
                "f(x0)={} f'(x0)={} area={}",
                response.value_text,
                response.derivative_text,
                response.integral_text
            );
            Ok(response)
        }
        Err(e) => {
            *slot = None;
            log_warn!("FUNCTIONS", "analysis failed: {}", e);
            Err(e)
        }
    }
}

/// Applies overlay toggles to the last analysis.
pub fn update_function_overlays(state: &AppState, request: OverlayRequest) -> AppResult<FunctionResponse> {
    log_enter_info!(
        "FUNCTIONS",
        "update_function_overlays",
        "tangent={:?} area={:?}",
        request.show_tangent,
        request.show_area
    );

    let mut slot = state.lock_last_function()?;
    let last = slot
        .as_mut()
        .ok_or_else(|| AppError::validation("run an analysis first"))?;

    if let Some(visible) = request.show_tangent {
        last.analysis.set_tangent_visible(visible);
    }
    if let Some(visible) = request.show_area {
        last.analysis.set_area_visible(visible);
    }

    let response = response_for(last, state);
    log_exit_info!(
        "FUNCTIONS",
        "update_function_overlays",
        "tangent={} area={}",
        response.analysis.params.show_tangent,
        response.analysis.params.show_area
    );
    Ok(response)
}

/// The last analysis, if any.
pub fn get_last_function(state: &AppState) -> AppResult<Option<FunctionAnalysis>> {
    let slot = state.lock_last_function()?;
    Ok(slot.as_ref().map(|last| last.analysis.clone()))
}

/// Pretty JSON of the last analysis.
pub fn export_last_function(state: &AppState) -> AppResult<String> {
    log_enter_info!("FUNCTIONS", "export_last_function");
    let slot = state.lock_last_function()?;
    let last = slot
        .as_ref()
        .ok_or_else(|| AppError::validation("nothing to export: run an analysis first"))?;
    let json = serde_json::to_string_pretty(&last.analysis)?;
    log_exit_info!("FUNCTIONS", "export_last_function", "{} bytes", json.len());
    Ok(json)
}
