//! FILENAME: app/src/invoke.rs
// PURPOSE: Name-based command dispatch for front ends.
// CONTEXT: A front end sends `{ "cmd": "<name>", "args": { ... } }` with
//          camelCase argument objects, the same shape the request types
//          deserialize from. Every reply is `{ "ok": <value> }` or
//          `{ "error": "<message>" }`.

use crate::commands;
use crate::error::{AppError, AppResult};
use crate::{log_debug, AppState};
use persistence::HistoryData;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Invocation {
    pub cmd: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InvokeReply {
    Ok(Value),
    Error(String),
}

#[derive(Deserialize)]
struct IdArgs {
    id: String,
}

#[derive(Deserialize)]
struct PathArgs {
    path: PathBuf,
}

fn args<T: DeserializeOwned>(cmd: &str, value: Value) -> AppResult<T> {
    serde_json::from_value(value)
        .map_err(|e| AppError::validation(format!("invalid arguments for {}: {}", cmd, e)))
}

fn reply<T: Serialize>(value: T) -> AppResult<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Runs one named command.
pub fn dispatch(state: &AppState, invocation: Invocation) -> AppResult<Value> {
    let Invocation { cmd, args: raw } = invocation;
    log_debug!("INVOKE", "{}", cmd);

    match cmd.as_str() {
        // Logic
        "generate_truth_table" => reply(commands::generate_truth_table(state, args(&cmd, raw)?)?),
        "check_equivalence" => reply(commands::check_equivalence(state, args(&cmd, raw)?)?),
        // Sets
        "compute_set_operation" => reply(commands::compute_set_operation(state, args(&cmd, raw)?)?),
        "compute_universe" => reply(commands::compute_universe(state, args(&cmd, raw)?)?),
        // Functions
        "analyze_function" => reply(commands::analyze_function(state, args(&cmd, raw)?)?),
        "update_function_overlays" => reply(commands::update_function_overlays(state, args(&cmd, raw)?)?),
        "get_last_function" => reply(commands::get_last_function(state)?),
        "export_last_function" => reply(commands::export_last_function(state)?),
        // History
        "save_to_history" => {
            let data: HistoryData = args(&cmd, raw)?;
            reply(commands::save_to_history(state, data)?)
        }
        "list_history" => reply(commands::list_history(state, args(&cmd, raw)?)?),
        "get_history_entry" => {
            let IdArgs { id } = args(&cmd, raw)?;
            reply(commands::get_history_entry(state, &id)?)
        }
        "replay_history_entry" => {
            let IdArgs { id } = args(&cmd, raw)?;
            reply(commands::replay_history_entry(state, &id)?)
        }
        "delete_history_entry" => {
            let IdArgs { id } = args(&cmd, raw)?;
            reply(commands::delete_history_entry(state, &id)?)
        }
        "clear_history" => reply(commands::clear_history(state)?),
        "export_history" => reply(commands::export_history(state)?),
        "export_history_to" => {
            let PathArgs { path } = args(&cmd, raw)?;
            reply(commands::export_history_to(state, &path)?)
        }
        "get_usage_stats" => reply(commands::get_usage_stats(state)),
        other => Err(AppError::validation(format!("unknown command '{}'", other))),
    }
}

/// Parses one JSON line, dispatches it and wraps the outcome.
pub fn handle_line(state: &AppState, line: &str) -> InvokeReply {
    let outcome = serde_json::from_str::<Invocation>(line)
        .map_err(AppError::from)
        .and_then(|invocation| dispatch(state, invocation));
    match outcome {
        Ok(value) => InvokeReply::Ok(value),
        Err(e) => InvokeReply::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_app_state;
    use serde_json::json;

    #[test]
    fn test_dispatch_truth_table() {
        let state = create_app_state();
        let line = r#"{"cmd":"generate_truth_table","args":{"expression":"A | B","variableCount":2}}"#;
        match handle_line(&state, line) {
            InvokeReply::Ok(value) => {
                assert_eq!(value["table"]["resultHeader"], "R = A | B");
                assert_eq!(value["script"]["fileName"], "truth_table.m");
            }
            InvokeReply::Error(e) => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn test_reply_shape() {
        let state = create_app_state();
        let reply = handle_line(&state, r#"{"cmd":"get_usage_stats"}"#);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, json!({ "ok": { "runs": 0, "saved": 0 } }));
    }

    #[test]
    fn test_unknown_command_and_bad_args() {
        let state = create_app_state();
        let unknown = serde_json::to_value(handle_line(&state, r#"{"cmd":"plot"}"#)).unwrap();
        assert_eq!(unknown["error"], "unknown command 'plot'");

        match handle_line(&state, r#"{"cmd":"compute_universe","args":{"universe":"1"}}"#) {
            InvokeReply::Error(e) => assert!(e.starts_with("invalid arguments for compute_universe")),
            InvokeReply::Ok(_) => panic!("missing fields must be rejected"),
        }
    }

    #[test]
    fn test_save_through_dispatch() {
        let state = create_app_state();
        let line = r#"{"cmd":"save_to_history","args":{"type":"sets_uni","universe":"1,2,3","a":"1","b":"4"}}"#;
        match handle_line(&state, line) {
            InvokeReply::Ok(value) => assert_eq!(value["kind"], "sets_uni"),
            InvokeReply::Error(e) => panic!("unexpected error: {}", e),
        }
        assert_eq!(crate::commands::get_usage_stats(&state).saved, 1);
    }
}
