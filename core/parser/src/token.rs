//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the logic and numeric lexers.
//! CONTEXT: Tokens are the atomic units produced by the lexers and consumed by
//! the shunting-yard compilers in parser.rs.

use serde::{Deserialize, Serialize};

// ============================================================================
// LOGIC TOKENS
// ============================================================================

/// A propositional variable. Only the fixed alphabet A, B, C is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variable {
    A,
    B,
    C,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Variable::A, Variable::B, Variable::C];

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'A' => Some(Variable::A),
            'B' => Some(Variable::B),
            'C' => Some(Variable::C),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Variable::A => 'A',
            Variable::B => 'B',
            Variable::C => 'C',
        }
    }

    /// Zero-based position in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Logical connectives, listed from highest to lowest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicOperator {
    Not,           // ~
    And,           // &
    Or,            // |
    Implies,       // ->
    Biconditional, // <->
}

impl LogicOperator {
    pub fn precedence(self) -> u8 {
        match self {
            LogicOperator::Not => 5,
            LogicOperator::And => 4,
            LogicOperator::Or => 3,
            LogicOperator::Implies => 2,
            LogicOperator::Biconditional => 1,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, LogicOperator::Not | LogicOperator::Implies)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LogicOperator::Not => "~",
            LogicOperator::And => "&",
            LogicOperator::Or => "|",
            LogicOperator::Implies => "->",
            LogicOperator::Biconditional => "<->",
        }
    }
}

impl std::fmt::Display for LogicOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParenSide {
    Open,
    Close,
}

/// Tokens recognized by the logic lexer, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    Variable(Variable),
    Operator(LogicOperator),
    Paren(ParenSide),
    /// The fixed-arity call form `xor(X,Y)`.
    Xor(Variable, Variable),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Variable(v) => write!(f, "{}", v),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Paren(ParenSide::Open) => write!(f, "("),
            Token::Paren(ParenSide::Close) => write!(f, ")"),
            Token::Xor(a, b) => write!(f, "xor({},{})", a, b),
        }
    }
}

// ============================================================================
// NUMERIC TOKENS
// ============================================================================

/// The fixed function vocabulary of the numeric engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sqrt,
    Abs,
}

impl MathFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(MathFunction::Sin),
            "cos" => Some(MathFunction::Cos),
            "tan" => Some(MathFunction::Tan),
            "exp" => Some(MathFunction::Exp),
            "log" => Some(MathFunction::Log),
            "sqrt" => Some(MathFunction::Sqrt),
            "abs" => Some(MathFunction::Abs),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
            MathFunction::Exp => "exp",
            MathFunction::Log => "log",
            MathFunction::Sqrt => "sqrt",
            MathFunction::Abs => "abs",
        }
    }

    /// Applies the function. Domain errors surface as NaN or infinities.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            MathFunction::Sin => value.sin(),
            MathFunction::Cos => value.cos(),
            MathFunction::Tan => value.tan(),
            MathFunction::Exp => value.exp(),
            MathFunction::Log => value.ln(),
            MathFunction::Sqrt => value.sqrt(),
            MathFunction::Abs => value.abs(),
        }
    }
}

/// Arithmetic operators. The elementwise spellings `.*`, `./`, `.^` are
/// normalized to the plain operator by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl ArithOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOperator::Add => "+",
            ArithOperator::Subtract => "-",
            ArithOperator::Multiply => "*",
            ArithOperator::Divide => "/",
            ArithOperator::Power => "^",
        }
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            ArithOperator::Add => left + right,
            ArithOperator::Subtract => left - right,
            ArithOperator::Multiply => left * right,
            ArithOperator::Divide => left / right,
            ArithOperator::Power => left.powf(right),
        }
    }
}

impl std::fmt::Display for ArithOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Tokens recognized by the numeric lexer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MathToken {
    Number(f64),
    /// The free variable `x`.
    X,
    Pi,
    Function(MathFunction),
    Operator(ArithOperator),
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for MathToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MathToken::Number(n) => write!(f, "{}", n),
            MathToken::X => write!(f, "x"),
            MathToken::Pi => write!(f, "pi"),
            MathToken::Function(func) => write!(f, "{}", func.name()),
            MathToken::Operator(op) => write!(f, "{}", op),
            MathToken::LParen => write!(f, "("),
            MathToken::RParen => write!(f, ")"),
            MathToken::Comma => write!(f, ","),
        }
    }
}
