//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Stack machines that execute compiled RPN programs.
//! CONTEXT: Programs come from the parser crate and are never modified here.
//! The logic evaluator reports structural problems as `EvalError`; the numeric
//! evaluator never fails and lets domain errors surface as NaN or infinities,
//! which callers turn into "undefined" markers.
//!
//! LOGIC SEMANTICS:
//! - `~`   negation, needs one value
//! - `&`   conjunction, `|` disjunction
//! - `->`  material implication (!left || right)
//! - `<->` equality of both sides
//! - `xor(X,Y)` pushes X != Y directly

use crate::error::EvalError;
use crate::truth_table::Assignment;
use parser::{LogicOperator, MathInstruction, MathProgram, RpnProgram, RpnToken, Variable};

// ============================================================================
// LOGIC
// ============================================================================

/// Runs a logic program under one assignment.
pub fn eval_rpn(program: &RpnProgram, assignment: &Assignment) -> Result<bool, EvalError> {
    let mut stack: Vec<bool> = Vec::with_capacity(program.len());

    for token in program.tokens() {
        let value = match *token {
            RpnToken::Variable(var) => lookup(assignment, var)?,
            RpnToken::Xor(a, b) => lookup(assignment, a)? != lookup(assignment, b)?,
            RpnToken::Operator(op) => match op {
                LogicOperator::Not => !stack.pop().ok_or(EvalError::MissingOperand)?,
                LogicOperator::And => {
                    let (left, right) = pop_pair(&mut stack, op)?;
                    left && right
                }
                LogicOperator::Or => {
                    let (left, right) = pop_pair(&mut stack, op)?;
                    left || right
                }
                LogicOperator::Implies => {
                    let (left, right) = pop_pair(&mut stack, op)?;
                    !left || right
                }
                LogicOperator::Biconditional => {
                    let (left, right) = pop_pair(&mut stack, op)?;
                    left == right
                }
            },
        };
        stack.push(value);
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(EvalError::InvalidExpression),
    }
}

fn lookup(assignment: &Assignment, variable: Variable) -> Result<bool, EvalError> {
    assignment
        .get(variable)
        .ok_or(EvalError::UnassignedVariable { variable })
}

/// Pops the right operand, then the left one.
fn pop_pair(stack: &mut Vec<bool>, op: LogicOperator) -> Result<(bool, bool), EvalError> {
    if stack.len() < 2 {
        return Err(EvalError::MissingOperands { op });
    }
    let right = stack.pop().unwrap_or_default();
    let left = stack.pop().unwrap_or_default();
    Ok((left, right))
}

// ============================================================================
// NUMERIC
// ============================================================================

/// Runs a numeric program at `x`. The result may be non-finite.
pub fn eval_math(program: &MathProgram, x: f64) -> f64 {
    let mut stack: Vec<f64> = Vec::with_capacity(program.instructions().len());

    for instruction in program.instructions() {
        let value = match *instruction {
            MathInstruction::Number(n) => n,
            MathInstruction::X => x,
            MathInstruction::Pi => std::f64::consts::PI,
            MathInstruction::Negate => -stack.pop().unwrap_or(f64::NAN),
            MathInstruction::Call(func) => func.apply(stack.pop().unwrap_or(f64::NAN)),
            MathInstruction::Binary(op) => {
                let right = stack.pop().unwrap_or(f64::NAN);
                let left = stack.pop().unwrap_or(f64::NAN);
                op.apply(left, right)
            }
        };
        stack.push(value);
    }

    stack.pop().unwrap_or(f64::NAN)
}
