//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans raw expression text and produces token streams.
//! CONTEXT: This is the first stage of both compilation pipelines. The logic
//! lexer works on the whitespace-stripped formula; the numeric lexer screens
//! the raw text against an allowed character class before scanning it.
//!
//! LOGIC SYMBOLS (priority order):
//! - Parentheses: ( )
//! - Multi char: <-> (checked before ->), ->
//! - Single char: ~ & |
//! - Call form: xor(X,Y) with X, Y in A/B/C
//! - Variables: A B C
//!
//! NUMERIC SYMBOLS:
//! - Operators: + - * / ^ and the elementwise spellings .* ./ .^
//! - Literals: decimal numbers (optional exponent), pi
//! - Variable: x
//! - Functions: sin cos tan exp log sqrt abs

use crate::error::{ParseError, ParseResult};
use crate::token::{ArithOperator, LogicOperator, MathFunction, MathToken, ParenSide, Token, Variable};
use once_cell::sync::Lazy;
use regex::Regex;

/// Anything outside this class is rejected before a numeric expression is scanned.
static UNSAFE_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9A-Za-z_+\-*/^().,\s]").expect("character class is valid"));

// ============================================================================
// LOGIC LEXER
// ============================================================================

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    /// Creates a lexer over `input` with all whitespace removed.
    /// Reported positions refer to the stripped text.
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().filter(|c| !c.is_whitespace()).collect(),
            pos: 0,
        }
    }

    /// Advances the lexer and returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> ParseResult<Option<Token>> {
        let Some(&ch) = self.chars.get(self.pos) else {
            return Ok(None);
        };

        let token = match ch {
            '(' => self.single(Token::Paren(ParenSide::Open)),
            ')' => self.single(Token::Paren(ParenSide::Close)),
            _ if self.starts_with("<->") => {
                self.pos += 3;
                Token::Operator(LogicOperator::Biconditional)
            }
            _ if self.starts_with("->") => {
                self.pos += 2;
                Token::Operator(LogicOperator::Implies)
            }
            '~' => self.single(Token::Operator(LogicOperator::Not)),
            '&' => self.single(Token::Operator(LogicOperator::And)),
            '|' => self.single(Token::Operator(LogicOperator::Or)),
            _ if self.starts_with("xor(") => self.read_xor()?,
            _ => match Variable::from_char(ch) {
                Some(var) => self.single(Token::Variable(var)),
                None => {
                    return Err(ParseError::InvalidSymbol {
                        position: self.pos + 1,
                    })
                }
            },
        };

        Ok(Some(token))
    }

    /// Consumes the whole input.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn single(&mut self, token: Token) -> Token {
        self.pos += 1;
        token
    }

    fn starts_with(&self, pattern: &str) -> bool {
        let mut offset = self.pos;
        for expected in pattern.chars() {
            if self.chars.get(offset) != Some(&expected) {
                return false;
            }
            offset += 1;
        }
        true
    }

    /// Reads `xor(X,Y)`; the cursor sits on the `x`.
    fn read_xor(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        let malformed = ParseError::MalformedXor { position: start + 1 };

        let arg = |offset: usize| self.chars.get(start + offset).copied().and_then(Variable::from_char);
        let left = arg(4).ok_or_else(|| malformed.clone())?;
        if self.chars.get(start + 5) != Some(&',') {
            return Err(malformed);
        }
        let right = arg(6).ok_or_else(|| malformed.clone())?;
        if self.chars.get(start + 7) != Some(&')') {
            return Err(malformed);
        }

        self.pos = start + 8;
        Ok(Token::Xor(left, right))
    }
}

/// Tokenizes a propositional formula.
pub fn tokenize_logic(input: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(input).tokenize()
}

// ============================================================================
// NUMERIC LEXER
// ============================================================================

/// A numeric token with the 1-based position where it starts.
pub type PositionedToken = (MathToken, usize);

pub struct MathLexer {
    chars: Vec<char>,
    pos: usize,
}

impl MathLexer {
    /// Screens `input` against the allowed character class and prepares a lexer.
    pub fn new(input: &str) -> ParseResult<Self> {
        if let Some(found) = UNSAFE_CHAR.find(input) {
            let ch = found.as_str().chars().next().unwrap_or('?');
            return Err(ParseError::UnsafeCharacter {
                ch,
                position: input[..found.start()].chars().count() + 1,
            });
        }

        Ok(MathLexer {
            chars: input.chars().collect(),
            pos: 0,
        })
    }

    pub fn next_token(&mut self) -> ParseResult<Option<PositionedToken>> {
        self.skip_whitespace();

        let Some(&ch) = self.chars.get(self.pos) else {
            return Ok(None);
        };
        let position = self.pos + 1;

        let token = match ch {
            '+' => self.operator(ArithOperator::Add, 1),
            '-' => self.operator(ArithOperator::Subtract, 1),
            '*' => self.operator(ArithOperator::Multiply, 1),
            '/' => self.operator(ArithOperator::Divide, 1),
            '^' => self.operator(ArithOperator::Power, 1),
            '(' => {
                self.pos += 1;
                MathToken::LParen
            }
            ')' => {
                self.pos += 1;
                MathToken::RParen
            }
            ',' => {
                self.pos += 1;
                MathToken::Comma
            }
            // Elementwise spellings
            '.' if self.peek_at(1) == Some('*') => self.operator(ArithOperator::Multiply, 2),
            '.' if self.peek_at(1) == Some('/') => self.operator(ArithOperator::Divide, 2),
            '.' if self.peek_at(1) == Some('^') => self.operator(ArithOperator::Power, 2),
            c if c.is_ascii_digit() || c == '.' => self.read_number(position)?,
            c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(position)?,
            _ => return Err(ParseError::InvalidSymbol { position }),
        };

        Ok(Some((token, position)))
    }

    pub fn tokenize(mut self) -> ParseResult<Vec<PositionedToken>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn operator(&mut self, op: ArithOperator, width: usize) -> MathToken {
        self.pos += width;
        MathToken::Operator(op)
    }

    /// Reads a decimal literal. A '.' that starts an elementwise operator
    /// ends the literal instead of becoming its decimal point.
    fn read_number(&mut self, position: usize) -> ParseResult<MathToken> {
        let mut text = String::new();
        let mut has_dot = false;

        while let Some(ch) = self.peek_at(0) {
            if ch.is_ascii_digit() {
                text.push(ch);
            } else if ch == '.' && !has_dot && !matches!(self.peek_at(1), Some('*' | '/' | '^')) {
                has_dot = true;
                text.push(ch);
            } else {
                break;
            }
            self.pos += 1;
        }

        // Exponent: e or E, optional sign, at least one digit
        if matches!(self.peek_at(0), Some('e' | 'E')) {
            let sign_width = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if self.peek_at(1 + sign_width).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..=sign_width {
                    text.push(self.chars[self.pos]);
                    self.pos += 1;
                }
                while let Some(ch) = self.peek_at(0).filter(|c| c.is_ascii_digit()) {
                    text.push(ch);
                    self.pos += 1;
                }
            }
        }

        text.parse::<f64>()
            .map(MathToken::Number)
            .map_err(|_| ParseError::InvalidSymbol { position })
    }

    fn read_identifier(&mut self, position: usize) -> ParseResult<MathToken> {
        let mut ident = String::new();
        while let Some(ch) = self.peek_at(0).filter(|c| c.is_ascii_alphanumeric() || *c == '_') {
            ident.push(ch);
            self.pos += 1;
        }

        if ident == "x" {
            return Ok(MathToken::X);
        }
        if ident.eq_ignore_ascii_case("pi") {
            return Ok(MathToken::Pi);
        }
        match MathFunction::from_name(&ident) {
            Some(func) => Ok(MathToken::Function(func)),
            None => Err(ParseError::UnknownIdentifier {
                name: ident,
                position,
            }),
        }
    }
}

/// Tokenizes a numeric expression over `x`.
pub fn tokenize_math(input: &str) -> ParseResult<Vec<PositionedToken>> {
    MathLexer::new(input)?.tokenize()
}
