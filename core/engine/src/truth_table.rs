//! FILENAME: core/engine/src/truth_table.rs
//! PURPOSE: Assignment enumeration, truth tables and equivalence checking.
//! CONTEXT: Both operations compile their input once and run the resulting
//! RPN program over every assignment of the declared variables. Rows follow
//! binary counting order with the first declared variable as the most
//! significant bit, so two variables always produce FF, FT, TF, TT.

use crate::error::{EngineError, EngineResult};
use crate::evaluator::eval_rpn;
use parser::{compile_logic, RpnProgram, Variable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// VARIABLES AND ASSIGNMENTS
// ============================================================================

/// How many propositional variables are declared. Only 2 (A, B) and
/// 3 (A, B, C) are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum VariableCount {
    Two,
    Three,
}

impl VariableCount {
    pub fn variables(self) -> &'static [Variable] {
        match self {
            VariableCount::Two => &Variable::ALL[..2],
            VariableCount::Three => &Variable::ALL[..],
        }
    }

    pub fn count(self) -> u8 {
        match self {
            VariableCount::Two => 2,
            VariableCount::Three => 3,
        }
    }

    /// Number of rows of a full truth table (2^N).
    pub fn row_count(self) -> usize {
        1 << self.count()
    }
}

impl TryFrom<u8> for VariableCount {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(VariableCount::Two),
            3 => Ok(VariableCount::Three),
            other => Err(EngineError::UnsupportedVariableCount(other)),
        }
    }
}

impl From<VariableCount> for u8 {
    fn from(value: VariableCount) -> Self {
        value.count()
    }
}

/// One boolean value per declared variable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(BTreeMap<Variable, bool>);

impl Assignment {
    pub fn from_pairs<I: IntoIterator<Item = (Variable, bool)>>(pairs: I) -> Self {
        Assignment(pairs.into_iter().collect())
    }

    pub fn get(&self, variable: Variable) -> Option<bool> {
        self.0.get(&variable).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values in variable order.
    pub fn values(&self) -> Vec<bool> {
        self.0.values().copied().collect()
    }

    /// Renders the assignment as `A=1, B=0`.
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|(var, value)| format!("{}={}", var, u8::from(*value)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// All 2^N assignments in increasing binary order.
pub fn enumerate_assignments(count: VariableCount) -> Vec<Assignment> {
    let variables = count.variables();
    let n = variables.len();

    (0..count.row_count())
        .map(|row| {
            Assignment::from_pairs(
                variables
                    .iter()
                    .enumerate()
                    .map(|(i, &var)| (var, (row >> (n - 1 - i)) & 1 == 1)),
            )
        })
        .collect()
}

/// Compiles `expression` and makes sure it only mentions declared variables.
pub fn compile_for(expression: &str, count: VariableCount) -> EngineResult<RpnProgram> {
    let program = compile_logic(expression)?;
    let declared = count.variables();
    if let Some(&variable) = program.variables().iter().find(|v| !declared.contains(v)) {
        return Err(EngineError::UndeclaredVariable {
            variable,
            count: count.count(),
        });
    }
    Ok(program)
}

// ============================================================================
// TRUTH TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruthRow {
    pub assignment: Assignment,
    pub result: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruthTable {
    pub variables: Vec<Variable>,
    /// The expression exactly as entered.
    pub expression: String,
    /// Header of the result column, `R = <expression>`.
    pub result_header: String,
    pub rows: Vec<TruthRow>,
}

impl TruthTable {
    /// Results in row order.
    pub fn results(&self) -> Vec<bool> {
        self.rows.iter().map(|row| row.result).collect()
    }
}

/// Builds the full truth table. Any evaluation failure aborts the whole table.
pub fn build_truth_table(expression: &str, count: VariableCount) -> EngineResult<TruthTable> {
    let program = compile_for(expression, count)?;

    let rows = enumerate_assignments(count)
        .into_iter()
        .map(|assignment| {
            let result = eval_rpn(&program, &assignment)?;
            Ok(TruthRow { assignment, result })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    log::debug!(
        "truth table for {:?}: {} rows over {} variables",
        expression,
        rows.len(),
        count.count()
    );

    Ok(TruthTable {
        variables: count.variables().to_vec(),
        expression: expression.to_string(),
        result_header: format!("R = {}", expression),
        rows,
    })
}

// ============================================================================
// EQUIVALENCE
// ============================================================================

/// The first assignment where two formulas disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counterexample {
    pub assignment: Assignment,
    pub left: bool,
    pub right: bool,
}

impl Counterexample {
    /// `A=1, B=0 (R1≠R2)`
    pub fn describe(&self) -> String {
        format!("{} (R1≠R2)", self.assignment.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalence {
    pub left_expression: String,
    pub right_expression: String,
    pub variables: Vec<Variable>,
    pub equivalent: bool,
    pub counterexample: Option<Counterexample>,
}

/// Decides equivalence by exhaustive enumeration, stopping at the first mismatch.
pub fn check_equivalence(left: &str, right: &str, count: VariableCount) -> EngineResult<Equivalence> {
    let left_program = compile_for(left, count)?;
    let right_program = compile_for(right, count)?;

    let mut counterexample = None;
    for assignment in enumerate_assignments(count) {
        let r1 = eval_rpn(&left_program, &assignment)?;
        let r2 = eval_rpn(&right_program, &assignment)?;
        if r1 != r2 {
            counterexample = Some(Counterexample {
                assignment,
                left: r1,
                right: r2,
            });
            break;
        }
    }

    log::debug!(
        "equivalence {:?} vs {:?}: {}",
        left,
        right,
        counterexample.is_none()
    );

    Ok(Equivalence {
        left_expression: left.to_string(),
        right_expression: right.to_string(),
        variables: count.variables().to_vec(),
        equivalent: counterexample.is_none(),
        counterexample,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use parser::{LogicOperator, ParseError};

    const SAMPLES: [&str; 6] = [
        "A & B",
        "A -> B",
        "~A | B",
        "xor(A,B) <-> ~(A & B)",
        "(A | B) & ~(A & B)",
        "A <-> B",
    ];

    #[test]
    fn test_two_variable_row_order() {
        let rows = enumerate_assignments(VariableCount::Two);
        let bits: Vec<Vec<bool>> = rows.iter().map(|a| a.values()).collect();
        assert_eq!(
            bits,
            vec![
                vec![false, false],
                vec![false, true],
                vec![true, false],
                vec![true, true],
            ]
        );
    }

    #[test]
    fn test_three_variable_row_order() {
        let rows = enumerate_assignments(VariableCount::Three);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[1].values(), vec![false, false, true]);
        assert_eq!(rows[4].values(), vec![true, false, false]);
        assert!(rows.iter().all(|a| a.len() == 3));
    }

    #[test]
    fn test_variable_count_conversion() {
        assert_eq!(VariableCount::try_from(2u8), Ok(VariableCount::Two));
        assert_eq!(VariableCount::try_from(3u8), Ok(VariableCount::Three));
        assert_eq!(
            VariableCount::try_from(4u8),
            Err(EngineError::UnsupportedVariableCount(4))
        );
        let parsed: Result<VariableCount, _> = serde_json::from_str("5");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_truth_table_for_conjunction() {
        let table = build_truth_table("A & B", VariableCount::Two).unwrap();
        assert_eq!(table.variables, vec![Variable::A, Variable::B]);
        assert_eq!(table.results(), vec![false, false, false, true]);
        assert_eq!(table.result_header, "R = A & B");
    }

    #[test]
    fn test_truth_table_keeps_expression_verbatim() {
        let table = build_truth_table("A->  B", VariableCount::Two).unwrap();
        assert_eq!(table.expression, "A->  B");
        assert_eq!(table.result_header, "R = A->  B");
        assert_eq!(table.results(), vec![true, true, false, true]);
    }

    #[test]
    fn test_three_variable_table() {
        let table = build_truth_table("A & B | C", VariableCount::Three).unwrap();
        assert_eq!(
            table.results(),
            vec![false, true, false, true, false, true, true, true]
        );
    }

    #[test]
    fn test_trailing_operator_yields_no_table() {
        let err = build_truth_table("A & ", VariableCount::Two).unwrap_err();
        assert_eq!(
            err,
            EngineError::Eval(EvalError::MissingOperands { op: LogicOperator::And })
        );
        assert_eq!(err.to_string(), "missing operands for &");
    }

    #[test]
    fn test_syntax_errors_propagate() {
        assert_eq!(
            build_truth_table("A # B", VariableCount::Two),
            Err(EngineError::Parse(ParseError::InvalidSymbol { position: 2 }))
        );
    }

    #[test]
    fn test_undeclared_variable_is_rejected() {
        assert_eq!(
            build_truth_table("A & C", VariableCount::Two),
            Err(EngineError::UndeclaredVariable {
                variable: Variable::C,
                count: 2
            })
        );
    }

    #[test]
    fn test_implication_matches_disjunction() {
        let result = check_equivalence("A -> B", "~A | B", VariableCount::Two).unwrap();
        assert!(result.equivalent);
        assert!(result.counterexample.is_none());
    }

    #[test]
    fn test_every_formula_is_equivalent_to_itself() {
        for expr in SAMPLES {
            for count in [VariableCount::Two, VariableCount::Three] {
                assert!(check_equivalence(expr, expr, count).unwrap().equivalent, "{expr}");
            }
        }
    }

    #[test]
    fn test_equivalence_is_symmetric() {
        for left in SAMPLES {
            for right in SAMPLES {
                let forward = check_equivalence(left, right, VariableCount::Two).unwrap();
                let backward = check_equivalence(right, left, VariableCount::Two).unwrap();
                assert_eq!(forward.equivalent, backward.equivalent, "{left} vs {right}");
            }
        }
    }

    #[test]
    fn test_first_counterexample_is_reported() {
        let result = check_equivalence("xor(A,B)", "A <-> B", VariableCount::Two).unwrap();
        assert!(!result.equivalent);
        let cex = result.counterexample.unwrap();
        assert_eq!(cex.assignment.values(), vec![false, false]);
        assert!(!cex.left);
        assert!(cex.right);
        assert_eq!(cex.describe(), "A=0, B=0 (R1≠R2)");
    }

    #[test]
    fn test_counterexample_in_three_variables() {
        let result = check_equivalence("A & B", "A & B & C", VariableCount::Three).unwrap();
        let cex = result.counterexample.unwrap();
        assert_eq!(cex.assignment.describe(), "A=1, B=1, C=0");
    }

    #[test]
    fn test_table_serializes_variables_as_letters() {
        let table = build_truth_table("A | B", VariableCount::Two).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["variables"], serde_json::json!(["A", "B"]));
        assert_eq!(json["resultHeader"], "R = A | B");
        assert_eq!(json["rows"][2]["assignment"]["A"], true);
    }
}
