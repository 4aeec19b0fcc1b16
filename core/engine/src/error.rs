//! FILENAME: core/engine/src/error.rs
//! PURPOSE: Error types for evaluation and the engine entry points.

use parser::{LogicOperator, ParseError, Variable};
use thiserror::Error;

/// Failures of the logic RPN evaluator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("missing operand for ~")]
    MissingOperand,

    #[error("missing operands for {op}")]
    MissingOperands { op: LogicOperator },

    #[error("invalid expression")]
    InvalidExpression,

    #[error("variable {variable} has no value in this assignment")]
    UnassignedVariable { variable: Variable },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("variable {variable} is not declared when only {count} variables are in use")]
    UndeclaredVariable { variable: Variable, count: u8 },

    #[error("unsupported variable count {0}: choose 2 or 3")]
    UnsupportedVariableCount(u8),

    #[error("invalid domain: lower bound {lo} must be less than upper bound {hi}")]
    InvalidDomain { lo: f64, hi: f64 },

    #[error("point count {requested} is outside the allowed range {min}..={max}")]
    InvalidPointCount {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("{name} must be a finite number")]
    NonFiniteInput { name: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
