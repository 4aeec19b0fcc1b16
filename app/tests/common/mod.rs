//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for Trivium backend integration tests.

#![allow(dead_code)]

use app_lib::{
    create_app_state, AppConfig, AppState, EquivalenceRequest, FunctionRequest,
    SetOperationRequest, TruthTableRequest, UniverseRequest,
};
use std::path::Path;

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Create a new test harness with default config and in-memory history.
    pub fn new() -> Self {
        TestHarness {
            state: create_app_state(),
        }
    }

    /// Create a harness whose history is persisted under `dir`.
    pub fn with_history_file(dir: &Path) -> Self {
        let config = AppConfig {
            history_path: Some(dir.join("history.json")),
            ..AppConfig::default()
        };
        TestHarness {
            state: AppState::from_config(config).unwrap(),
        }
    }

    pub fn history_path(&self) -> &Path {
        self.state.config.history_path.as_deref().unwrap()
    }
}

// ============================================================================
// REQUEST FIXTURES
// ============================================================================

pub fn truth_table_request(expression: &str, variable_count: u8) -> TruthTableRequest {
    TruthTableRequest {
        expression: expression.to_string(),
        variable_count,
    }
}

pub fn equivalence_request(left: &str, right: &str, variable_count: u8) -> EquivalenceRequest {
    EquivalenceRequest {
        left: left.to_string(),
        right: right.to_string(),
        variable_count,
    }
}

pub fn set_request(a: &str, b: &str, operation: &str) -> SetOperationRequest {
    SetOperationRequest {
        a: a.to_string(),
        b: b.to_string(),
        operation: operation.to_string(),
    }
}

pub fn universe_request(universe: &str, a: &str, b: &str) -> UniverseRequest {
    UniverseRequest {
        universe: universe.to_string(),
        a: a.to_string(),
        b: b.to_string(),
    }
}

/// f(x) over [-2, 2] with 401 points, x0 = 1, area over [0, 1].
pub fn function_request(expression: &str) -> FunctionRequest {
    FunctionRequest {
        expression: expression.to_string(),
        x_min: "-2".to_string(),
        x_max: "2".to_string(),
        points: "401".to_string(),
        x0: "1".to_string(),
        a: "0".to_string(),
        b: "1".to_string(),
        show_tangent: true,
        show_area: true,
    }
}
