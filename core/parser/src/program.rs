//! FILENAME: core/parser/src/program.rs
//! PURPOSE: Postfix (RPN) programs produced by the shunting-yard compilers.
//! CONTEXT: These are the only representations the engine ever evaluates.
//! Programs are immutable once built and can be evaluated any number of times.

use crate::token::{ArithOperator, LogicOperator, MathFunction, Variable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// LOGIC PROGRAM
// ============================================================================

/// A token that may appear in a logic RPN program. Parentheses never survive
/// compilation, so they have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RpnToken {
    Variable(Variable),
    Xor(Variable, Variable),
    Operator(LogicOperator),
}

impl std::fmt::Display for RpnToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpnToken::Variable(v) => write!(f, "{}", v),
            RpnToken::Xor(a, b) => write!(f, "xor({},{})", a, b),
            RpnToken::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// A compiled propositional formula in postfix order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpnProgram {
    tokens: Vec<RpnToken>,
}

impl RpnProgram {
    pub(crate) fn new(tokens: Vec<RpnToken>) -> Self {
        RpnProgram { tokens }
    }

    pub fn tokens(&self) -> &[RpnToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Variables referenced anywhere in the program, including xor arguments.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        for token in &self.tokens {
            match *token {
                RpnToken::Variable(v) => {
                    vars.insert(v);
                }
                RpnToken::Xor(a, b) => {
                    vars.insert(a);
                    vars.insert(b);
                }
                RpnToken::Operator(_) => {}
            }
        }
        vars
    }
}

impl std::fmt::Display for RpnProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.tokens.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

// ============================================================================
// NUMERIC PROGRAM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MathInstruction {
    Number(f64),
    X,
    Pi,
    Negate,
    Binary(ArithOperator),
    Call(MathFunction),
}

impl MathInstruction {
    /// Net effect on the evaluation stack depth.
    pub(crate) fn stack_effect(self) -> (usize, usize) {
        // (values consumed, values produced)
        match self {
            MathInstruction::Number(_) | MathInstruction::X | MathInstruction::Pi => (0, 1),
            MathInstruction::Negate | MathInstruction::Call(_) => (1, 1),
            MathInstruction::Binary(_) => (2, 1),
        }
    }
}

/// A compiled expression over the single real variable `x`, in postfix order.
/// Construction guarantees every instruction finds its operands and exactly
/// one value remains at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathProgram {
    source: String,
    instructions: Vec<MathInstruction>,
}

impl MathProgram {
    pub(crate) fn new(source: String, instructions: Vec<MathInstruction>) -> Self {
        MathProgram {
            source,
            instructions,
        }
    }

    /// The expression text as the user entered it (trimmed).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn instructions(&self) -> &[MathInstruction] {
        &self.instructions
    }
}
