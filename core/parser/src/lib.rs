//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the Trivium expression compilers.
//! CONTEXT: This crate turns user-entered text into postfix programs that the
//! engine crate evaluates. It knows nothing about truth tables, sampling or sets.
//!
//! PIPELINE: Expression String --> Lexer --> Tokens --> Shunting-yard --> RPN program
//!
//! LOGIC LANGUAGE:
//! - Variables: A, B, C
//! - Connectives: ~ (not), & (and), | (or), -> (implies), <-> (iff)
//! - Exclusive or as a call: xor(A,B)
//! - Parentheses for grouping, whitespace ignored
//!
//! NUMERIC LANGUAGE:
//! - Variable x, constant pi, decimal literals with optional exponent
//! - Arithmetic: +, -, *, /, ^ and their elementwise spellings .*, ./, .^
//! - Unary minus (unary plus is accepted and dropped)
//! - Functions: sin, cos, tan, exp, log (natural), sqrt, abs

pub mod error;
pub mod lexer;
pub mod parser;
pub mod program;
pub mod token;

// Register the separate tests module
#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use error::{ParseError, ParseResult};
pub use lexer::{tokenize_logic, tokenize_math, Lexer, MathLexer};
pub use parser::{compile_function, compile_logic, to_rpn};
pub use program::{MathInstruction, MathProgram, RpnProgram, RpnToken};
pub use token::{ArithOperator, LogicOperator, MathFunction, MathToken, Token, Variable};
