//! FILENAME: core/parser/src/error.rs

use thiserror::Error;

/// Syntax errors raised while tokenizing or compiling an expression.
/// Positions are 1-based character offsets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid symbol at position {position}")]
    InvalidSymbol { position: usize },

    #[error("malformed xor call at position {position}: expected xor(X,Y) with X and Y in A/B/C")]
    MalformedXor { position: usize },

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("empty expression")]
    EmptyExpression,

    #[error("unsafe character '{ch}' at position {position}")]
    UnsafeCharacter { ch: char, position: usize },

    #[error("unknown identifier '{name}' at position {position}")]
    UnknownIdentifier { name: String, position: usize },

    #[error("function {name} must be followed by a parenthesized argument")]
    MissingFunctionArguments { name: String },

    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("missing operand for {op}")]
    MissingOperand { op: String },

    #[error("malformed expression")]
    MalformedExpression,
}

pub type ParseResult<T> = Result<T, ParseError>;
