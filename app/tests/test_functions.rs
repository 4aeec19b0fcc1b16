//! FILENAME: tests/test_functions.rs
//! Integration tests for function analysis, overlays and export.

mod common;

use app_lib::{
    analyze_function, export_last_function, get_last_function, update_function_overlays,
    AppError, OverlayRequest,
};
use common::{function_request, TestHarness};
use engine::EngineError;
use parser::ParseError;

// ============================================================================
// ANALYSIS
// ============================================================================

#[test]
fn test_square_analysis() {
    let harness = TestHarness::new();
    let response = analyze_function(&harness.state, function_request("x^2")).unwrap();
    let analysis = &response.analysis;

    assert_eq!(analysis.xs.len(), 401);
    assert_eq!(analysis.xs[0], -2.0);
    assert_eq!(analysis.xs[400], 2.0);
    assert_eq!(response.value_text, "1.000000");
    assert_eq!(response.derivative_text, "2.000000");
    assert!((analysis.integral.unwrap() - 1.0 / 3.0).abs() < 1e-6);
    assert!(analysis.range.min.abs() < 1e-12);
    assert_eq!(analysis.range.max, 4.0);
    assert_eq!(analysis.tangent.as_ref().unwrap().len(), 401);
}

#[test]
fn test_script_uses_elementwise_operators() {
    let harness = TestHarness::new();
    let response = analyze_function(&harness.state, function_request("x^2 + sin(x)")).unwrap();

    assert_eq!(response.script.file_name, "function_analysis.m");
    assert!(response.script.text.contains(".^"));
    assert!(response.script.text.contains("x = linspace(-2, 2, 401);"));
    assert!(response.script.text.contains("xi = linspace(a, b, 1600);"));
}

#[test]
fn test_undefined_samples_become_gaps() {
    let harness = TestHarness::new();
    let response = analyze_function(&harness.state, function_request("sqrt(x)")).unwrap();
    let analysis = &response.analysis;

    assert!(analysis.ys[0].is_none());
    assert!(analysis.ys[400].is_some());
    assert_eq!(response.value_text, "1.000000");

    let json = serde_json::to_value(analysis).unwrap();
    assert!(json["ys"][0].is_null());
}

#[test]
fn test_undefined_point_reports_nan() {
    let harness = TestHarness::new();
    let mut request = function_request("log(x)");
    request.x0 = "-1".to_string();
    let response = analyze_function(&harness.state, request).unwrap();

    assert_eq!(response.value_text, "NaN");
    assert_eq!(response.derivative_text, "NaN");
    assert!(response.analysis.tangent.is_none());
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn test_reversed_bounds_rejected() {
    let harness = TestHarness::new();
    let mut request = function_request("x");
    request.x_min = "3".to_string();
    let err = analyze_function(&harness.state, request).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_point_count_outside_window() {
    let harness = TestHarness::new();
    let mut request = function_request("x");
    request.points = "10".to_string();
    let err = analyze_function(&harness.state, request).unwrap_err();
    assert!(err.to_string().contains("between 80 and 3000"));
}

#[test]
fn test_malformed_number_names_field() {
    let harness = TestHarness::new();
    let mut request = function_request("x");
    request.b = "one".to_string();
    let err = analyze_function(&harness.state, request).unwrap_err();
    assert!(err.to_string().starts_with("b "));
}

#[test]
fn test_unknown_identifier() {
    let harness = TestHarness::new();
    let err = analyze_function(&harness.state, function_request("y + 1")).unwrap_err();
    assert!(matches!(
        err,
        AppError::Engine(EngineError::Parse(ParseError::UnknownIdentifier { .. }))
    ));
}

#[test]
fn test_failure_clears_last_result() {
    let harness = TestHarness::new();
    analyze_function(&harness.state, function_request("x")).unwrap();
    assert!(get_last_function(&harness.state).unwrap().is_some());

    analyze_function(&harness.state, function_request("x +")).unwrap_err();
    assert!(get_last_function(&harness.state).unwrap().is_none());
    assert!(export_last_function(&harness.state).is_err());
}

// ============================================================================
// OVERLAYS AND EXPORT
// ============================================================================

#[test]
fn test_toggle_tangent_overlay() {
    let harness = TestHarness::new();
    analyze_function(&harness.state, function_request("x^2")).unwrap();

    let hidden = update_function_overlays(
        &harness.state,
        OverlayRequest {
            show_tangent: Some(false),
            show_area: None,
        },
    )
    .unwrap();
    assert!(hidden.analysis.tangent.is_none());
    assert!(!hidden.script.text.contains("yt = "));
    assert!(hidden.script.text.contains("area(xa, ya"));

    let shown = update_function_overlays(
        &harness.state,
        OverlayRequest {
            show_tangent: Some(true),
            show_area: Some(false),
        },
    )
    .unwrap();
    let tangent = shown.analysis.tangent.unwrap();
    // y = 1 + 2(x - 1) at x = -2
    assert!((tangent[0] + 5.0).abs() < 1e-6);
    assert!(!shown.script.text.contains("area(xa, ya"));
}

#[test]
fn test_overlays_need_an_analysis() {
    let harness = TestHarness::new();
    let err = update_function_overlays(&harness.state, OverlayRequest::default()).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_export_last_function_json() {
    let harness = TestHarness::new();
    analyze_function(&harness.state, function_request("2*x")).unwrap();

    let json = export_last_function(&harness.state).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["expression"], "2*x");
    assert_eq!(value["params"]["points"], 401);
    assert!(json.contains('\n'));
}
