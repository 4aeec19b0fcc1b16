//! FILENAME: tests/test_history.rs
//! Integration tests for history commands and usage counters.

mod common;

use app_lib::{
    clear_history, delete_history_entry, export_history, export_history_to, get_history_entry,
    get_usage_stats, list_history, replay_history_entry, save_to_history, AppError, HistoryQuery,
    ReplayResponse,
};
use common::TestHarness;
use persistence::{HistoryData, HistoryStore, PersistenceError};
use tempfile::tempdir;

fn truth_table(expression: &str) -> HistoryData {
    HistoryData::TruthTable {
        expression: expression.to_string(),
        variable_count: 2,
    }
}

fn set_operation(a: &str, b: &str) -> HistoryData {
    HistoryData::SetOperation {
        a: a.to_string(),
        b: b.to_string(),
        operation: "intersect".to_string(),
    }
}

fn function(expression: &str) -> HistoryData {
    HistoryData::Function {
        expression: expression.to_string(),
        x_min: -1.0,
        x_max: 1.0,
        points: 200,
        x0: 0.5,
        a: 0.0,
        b: 1.0,
        show_tangent: false,
        show_area: true,
    }
}

fn query(text: &str, kind: &str) -> HistoryQuery {
    HistoryQuery {
        query: text.to_string(),
        kind: kind.to_string(),
    }
}

// ============================================================================
// SAVE AND LIST
// ============================================================================

#[test]
fn test_save_generates_script() {
    let harness = TestHarness::new();
    let item = save_to_history(&harness.state, truth_table("A | B")).unwrap();

    assert_eq!(item.kind, "logic_tt");
    assert_eq!(item.label, "Logic · Truth table");
    assert_eq!(item.summary, "A | B");
    assert!(item.script.contains("expr = 'A | B';"));
    assert_eq!(get_usage_stats(&harness.state).saved, 1);
}

#[test]
fn test_save_rejects_invalid_input() {
    let harness = TestHarness::new();
    let err = save_to_history(&harness.state, truth_table("A &")).unwrap_err();
    assert!(matches!(err, AppError::Engine(_)));

    let list = list_history(&harness.state, HistoryQuery::default()).unwrap();
    assert_eq!(list.total, 0);
    assert_eq!(get_usage_stats(&harness.state).saved, 0);
}

#[test]
fn test_list_newest_first() {
    let harness = TestHarness::new();
    save_to_history(&harness.state, truth_table("A")).unwrap();
    save_to_history(&harness.state, set_operation("1, 2", "2")).unwrap();
    save_to_history(&harness.state, function("x^3")).unwrap();

    let list = list_history(&harness.state, query("", "all")).unwrap();
    assert_eq!(list.total, 3);
    let kinds: Vec<&str> = list.items.iter().map(|i| i.kind.as_str()).collect();
    assert_eq!(kinds, vec!["fx", "sets_core", "logic_tt"]);
}

#[test]
fn test_search_and_kind_filter() {
    let harness = TestHarness::new();
    save_to_history(&harness.state, truth_table("A -> B")).unwrap();
    save_to_history(&harness.state, set_operation("apple, pear", "pear")).unwrap();
    save_to_history(&harness.state, function("sin(x)")).unwrap();

    let by_text = list_history(&harness.state, query("APPLE", "")).unwrap();
    assert_eq!(by_text.items.len(), 1);
    assert_eq!(by_text.items[0].kind, "sets_core");
    assert_eq!(by_text.total, 3);

    let by_kind = list_history(&harness.state, query("", "fx")).unwrap();
    assert_eq!(by_kind.items.len(), 1);
    assert!(by_kind.items[0].summary.starts_with("f(x)=sin(x)"));

    // Search also covers the script text
    let by_script = list_history(&harness.state, query("safe_eval", "all")).unwrap();
    assert_eq!(by_script.items.len(), 1);
}

#[test]
fn test_unknown_kind_filter_rejected() {
    let harness = TestHarness::new();
    let err = list_history(&harness.state, query("", "plots")).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

// ============================================================================
// GET, REPLAY, DELETE, CLEAR
// ============================================================================

#[test]
fn test_replay_function_entry() {
    let harness = TestHarness::new();
    let item = save_to_history(&harness.state, function("x^2")).unwrap();

    match replay_history_entry(&harness.state, &item.id).unwrap() {
        ReplayResponse::Function(response) => {
            assert_eq!(response.analysis.xs.len(), 200);
            assert_eq!(response.value_text, "0.250000");
            assert_eq!(response.script.text, item.script);
        }
        other => panic!("expected a function replay, got {:?}", other),
    }
}

#[test]
fn test_delete_entry() {
    let harness = TestHarness::new();
    let item = save_to_history(&harness.state, truth_table("A")).unwrap();
    assert!(get_history_entry(&harness.state, &item.id).is_ok());

    delete_history_entry(&harness.state, &item.id).unwrap();
    let err = get_history_entry(&harness.state, &item.id).unwrap_err();
    assert!(matches!(
        err,
        AppError::Persistence(PersistenceError::EntryNotFound(_))
    ));
    assert!(delete_history_entry(&harness.state, &item.id).is_err());
}

#[test]
fn test_clear_history() {
    let harness = TestHarness::new();
    save_to_history(&harness.state, truth_table("A")).unwrap();
    save_to_history(&harness.state, truth_table("B")).unwrap();

    clear_history(&harness.state).unwrap();
    assert_eq!(list_history(&harness.state, HistoryQuery::default()).unwrap().total, 0);
    // Counters are not reset by clearing
    assert_eq!(get_usage_stats(&harness.state).saved, 2);
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[test]
fn test_history_file_round_trip() {
    let dir = tempdir().unwrap();
    let id = {
        let harness = TestHarness::with_history_file(dir.path());
        save_to_history(&harness.state, set_operation("a, b", "b")).unwrap().id
    };

    let reopened = TestHarness::with_history_file(dir.path());
    let entry = get_history_entry(&reopened.state, &id).unwrap();
    assert_eq!(entry.data, set_operation("a, b", "b"));

    let store = HistoryStore::load(reopened.history_path()).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_failed_write_does_not_record_entry() {
    let dir = tempdir().unwrap();
    let harness = TestHarness::with_history_file(dir.path());
    // A directory where the history file belongs makes every write fail
    std::fs::create_dir(harness.history_path()).unwrap();

    let err = save_to_history(&harness.state, truth_table("A & B")).unwrap_err();
    assert!(matches!(err, AppError::Persistence(PersistenceError::Io(_))));

    let list = list_history(&harness.state, HistoryQuery::default()).unwrap();
    assert_eq!(list.total, 0);
    assert!(list.items.is_empty());
    assert_eq!(get_usage_stats(&harness.state).saved, 0);
}

#[test]
fn test_export_history() {
    let dir = tempdir().unwrap();
    let harness = TestHarness::new();
    save_to_history(&harness.state, truth_table("~A")).unwrap();

    let json = export_history(&harness.state).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["data"]["type"], "logic_tt");
    assert_eq!(value[0]["data"]["variableCount"], 2);

    let path = dir.path().join("export.json");
    export_history_to(&harness.state, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), json);
}
