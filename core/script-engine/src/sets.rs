//! FILENAME: core/script-engine/src/sets.rs
//! PURPOSE: Scripts for binary set operations and universe complements.
//! CONTEXT: Operands become numeric row vectors when every element of every
//! operand is numeric. Otherwise all of them become cell arrays of canonical
//! strings, so `2` and `'2'` still compare equal outside the application.

use crate::{matlab_number, quoted, Script, ScriptKind};
use engine::{Element, FiniteSet, SetOperation, SetOperationResult, UniverseComplements};

/// True when the operands can be written as plain numeric vectors.
fn numeric_mode(sets: &[&FiniteSet]) -> bool {
    sets.iter().any(|s| !s.is_empty()) && sets.iter().all(|s| s.is_all_numeric())
}

fn render_set(set: &FiniteSet, numeric: bool) -> String {
    if numeric {
        let items: Vec<String> = set
            .iter()
            .filter_map(Element::as_number)
            .map(matlab_number)
            .collect();
        if items.is_empty() {
            "zeros(1, 0)".to_string()
        } else {
            format!("[{}]", items.join(", "))
        }
    } else {
        let items: Vec<String> = set.iter().map(|e| quoted(&e.canonical())).collect();
        if items.is_empty() {
            "cell(1, 0)".to_string()
        } else {
            format!("{{{}}}", items.join(", "))
        }
    }
}

fn operation_line(operation: SetOperation) -> &'static str {
    match operation {
        SetOperation::Union => "R = union(A, B, 'stable');",
        SetOperation::Intersection => "R = intersect(A, B, 'stable');",
        SetOperation::DifferenceAB => "R = setdiff(A, B, 'stable');",
        SetOperation::DifferenceBA => "R = setdiff(B, A, 'stable');",
        SetOperation::SymmetricDifference => "R = setxor(A, B, 'stable');",
    }
}

pub fn set_operation_script(result: &SetOperationResult) -> Script {
    let numeric = numeric_mode(&[&result.a, &result.b]);
    let lines = vec![
        "% ===== Trivium: set operations =====".to_string(),
        format!("A = {};", render_set(&result.a, numeric)),
        format!("B = {};", render_set(&result.b, numeric)),
        operation_line(result.operation).to_string(),
        String::new(),
        format!("disp({});", quoted(&format!("{}:", result.operation.label()))),
        "disp(R);".to_string(),
        "fprintf('|A| = %d, |B| = %d\\n', numel(A), numel(B));".to_string(),
    ];
    Script::new(ScriptKind::SetOperation, lines)
}

pub fn universe_script(result: &UniverseComplements) -> Script {
    let numeric = numeric_mode(&[&result.universe, &result.a, &result.b]);
    let lines = vec![
        "% ===== Trivium: universe and complements =====".to_string(),
        format!("U = {};", render_set(&result.universe, numeric)),
        format!("A = {};", render_set(&result.a, numeric)),
        format!("B = {};", render_set(&result.b, numeric)),
        "Ac = setdiff(U, A, 'stable');".to_string(),
        "Bc = setdiff(U, B, 'stable');".to_string(),
        String::new(),
        "outside = [setdiff(A, U, 'stable'), setdiff(B, U, 'stable')];".to_string(),
        "if ~isempty(outside)".to_string(),
        "    disp('Warning: A or B has elements outside U.');".to_string(),
        "end".to_string(),
        "disp('A^c:'); disp(Ac);".to_string(),
        "disp('B^c:'); disp(Bc);".to_string(),
    ];
    Script::new(ScriptKind::Universe, lines)
}
