//! FILENAME: app/src/validation.rs
// PURPOSE: Caller-side input checks that run before any engine call.
// CONTEXT: The engines guard their own invariants, but the messages here are
//          the ones a user sees: they name the field that needs fixing.

use crate::api_types::FunctionRequest;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use engine::{AnalysisParams, FiniteSet, VariableCount};

/// Returns the trimmed value, or an error naming `field` when it is blank.
pub fn require_text<'a>(field: &str, value: &'a str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AppError::validation(format!("{} must not be empty", field)))
    } else {
        Ok(trimmed)
    }
}

/// Parses a finite number from raw text.
pub fn parse_number(field: &str, raw: &str) -> AppResult<f64> {
    let text = raw.trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AppError::validation(format!(
            "{} must be a finite number (got '{}')",
            field, text
        ))),
    }
}

/// Parses a point count and checks it against `[min, max]`.
pub fn parse_point_count(raw: &str, min: usize, max: usize) -> AppResult<usize> {
    let text = raw.trim();
    let points = text.parse::<usize>().map_err(|_| {
        AppError::validation(format!("points must be a whole number (got '{}')", text))
    })?;
    check_point_count(points, min, max)
}

fn check_point_count(points: usize, min: usize, max: usize) -> AppResult<usize> {
    if points < min || points > max {
        return Err(AppError::validation(format!(
            "points must be between {} and {} (got {})",
            min, max, points
        )));
    }
    Ok(points)
}

pub fn variable_count(count: u8) -> AppResult<VariableCount> {
    VariableCount::try_from(count)
        .map_err(|_| AppError::validation(format!("variable count must be 2 or 3 (got {})", count)))
}

/// Builds analysis parameters from the raw request fields.
pub fn function_params(request: &FunctionRequest, config: &AppConfig) -> AppResult<AnalysisParams> {
    let params = AnalysisParams {
        x_min: parse_number("xMin", &request.x_min)?,
        x_max: parse_number("xMax", &request.x_max)?,
        points: parse_point_count(&request.points, config.min_points, config.max_points)?,
        x0: parse_number("x0", &request.x0)?,
        a: parse_number("a", &request.a)?,
        b: parse_number("b", &request.b)?,
        show_tangent: request.show_tangent,
        show_area: request.show_area,
    };
    check_function_params(&params, config)?;
    Ok(params)
}

/// Checks already-typed parameters, e.g. when a history entry is replayed.
pub fn check_function_params(params: &AnalysisParams, config: &AppConfig) -> AppResult<()> {
    for (field, value) in [
        ("xMin", params.x_min),
        ("xMax", params.x_max),
        ("x0", params.x0),
        ("a", params.a),
        ("b", params.b),
    ] {
        if !value.is_finite() {
            return Err(AppError::validation(format!("{} must be a finite number", field)));
        }
    }
    if params.x_min >= params.x_max {
        return Err(AppError::validation(format!(
            "xMin must be less than xMax (got {} and {})",
            params.x_min, params.x_max
        )));
    }
    check_point_count(params.points, config.min_points, config.max_points)?;
    Ok(())
}

/// At least one of the two operands must hold an element.
pub fn require_set_operands(a_raw: &str, b_raw: &str) -> AppResult<()> {
    if FiniteSet::parse(a_raw).is_empty() && FiniteSet::parse(b_raw).is_empty() {
        return Err(AppError::validation("enter elements for A or B"));
    }
    Ok(())
}

pub fn require_universe(universe_raw: &str) -> AppResult<()> {
    if FiniteSet::parse(universe_raw).is_empty() {
        return Err(AppError::validation("universe U must not be empty"));
    }
    Ok(())
}
