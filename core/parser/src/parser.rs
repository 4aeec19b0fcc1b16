//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Operator-precedence (shunting-yard) compilers from token streams to RPN.
//! CONTEXT: This is the second stage of both pipelines. The logic compiler only
//! enforces parenthesis balance; operand checks happen when the program runs.
//! The numeric compiler also rejects structurally broken input up front so that
//! evaluation can only fail through domain errors.
//!
//! LOGIC PRECEDENCE (high to low):
//!   ~ (5, right)  &  (4, left)  |  (3, left)  -> (2, right)  <-> (1, left)
//!
//! NUMERIC PRECEDENCE (high to low):
//!   ^ (4, right)  unary - (3, right)  * / (2, left)  + - (1, left)
//!   function calls bind to their parenthesized argument.

use crate::error::{ParseError, ParseResult};
use crate::lexer::{tokenize_logic, tokenize_math, PositionedToken};
use crate::program::{MathInstruction, MathProgram, RpnProgram, RpnToken};
use crate::token::{ArithOperator, LogicOperator, MathFunction, MathToken, ParenSide, Token};

// ============================================================================
// LOGIC
// ============================================================================

#[derive(Clone, Copy)]
enum LogicStackEntry {
    Open,
    Operator(LogicOperator),
}

/// Converts a logic token stream to postfix order.
pub fn to_rpn(tokens: &[Token]) -> ParseResult<RpnProgram> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<LogicStackEntry> = Vec::new();

    for token in tokens {
        match *token {
            Token::Variable(v) => output.push(RpnToken::Variable(v)),
            Token::Xor(a, b) => output.push(RpnToken::Xor(a, b)),
            Token::Operator(incoming) => {
                while let Some(LogicStackEntry::Operator(top)) = stack.last().copied() {
                    let pops = if incoming.is_right_associative() {
                        incoming.precedence() < top.precedence()
                    } else {
                        incoming.precedence() <= top.precedence()
                    };
                    if !pops {
                        break;
                    }
                    output.push(RpnToken::Operator(top));
                    stack.pop();
                }
                stack.push(LogicStackEntry::Operator(incoming));
            }
            Token::Paren(ParenSide::Open) => stack.push(LogicStackEntry::Open),
            Token::Paren(ParenSide::Close) => loop {
                match stack.pop() {
                    Some(LogicStackEntry::Open) => break,
                    Some(LogicStackEntry::Operator(op)) => output.push(RpnToken::Operator(op)),
                    None => return Err(ParseError::UnbalancedParentheses),
                }
            },
        }
    }

    while let Some(entry) = stack.pop() {
        match entry {
            LogicStackEntry::Open => return Err(ParseError::UnbalancedParentheses),
            LogicStackEntry::Operator(op) => output.push(RpnToken::Operator(op)),
        }
    }

    Ok(RpnProgram::new(output))
}

/// Tokenizes and compiles a propositional formula.
pub fn compile_logic(input: &str) -> ParseResult<RpnProgram> {
    let tokens = tokenize_logic(input)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    let program = to_rpn(&tokens)?;
    log::debug!("compiled logic expression {:?} -> [{}]", input, program);
    Ok(program)
}

// ============================================================================
// NUMERIC
// ============================================================================

#[derive(Clone, Copy)]
enum MathStackEntry {
    Open,
    Negate,
    Binary(ArithOperator),
    Function(MathFunction),
}

impl MathStackEntry {
    /// Precedence of entries that can be popped by an incoming binary operator.
    fn precedence(self) -> Option<u8> {
        match self {
            MathStackEntry::Negate => Some(3),
            MathStackEntry::Binary(op) => Some(binary_precedence(op)),
            MathStackEntry::Open | MathStackEntry::Function(_) => None,
        }
    }

    fn into_instruction(self) -> Option<MathInstruction> {
        match self {
            MathStackEntry::Negate => Some(MathInstruction::Negate),
            MathStackEntry::Binary(op) => Some(MathInstruction::Binary(op)),
            MathStackEntry::Function(func) => Some(MathInstruction::Call(func)),
            MathStackEntry::Open => None,
        }
    }
}

fn binary_precedence(op: ArithOperator) -> u8 {
    match op {
        ArithOperator::Add | ArithOperator::Subtract => 1,
        ArithOperator::Multiply | ArithOperator::Divide => 2,
        ArithOperator::Power => 4,
    }
}

/// Shunting-yard state for a numeric expression.
pub struct Parser {
    tokens: Vec<PositionedToken>,
    output: Vec<MathInstruction>,
    stack: Vec<MathStackEntry>,
    /// True when the next token must start an operand.
    expect_operand: bool,
}

impl Parser {
    pub fn new(tokens: Vec<PositionedToken>) -> Self {
        Parser {
            output: Vec::with_capacity(tokens.len()),
            tokens,
            stack: Vec::new(),
            expect_operand: true,
        }
    }

    pub fn parse(mut self) -> ParseResult<Vec<MathInstruction>> {
        if self.tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let tokens = std::mem::take(&mut self.tokens);
        let mut last_operator = None;

        for (index, &(token, position)) in tokens.iter().enumerate() {
            match token {
                MathToken::Number(_) | MathToken::X | MathToken::Pi => {
                    self.require_operand_slot(token, position)?;
                    self.output.push(match token {
                        MathToken::Number(n) => MathInstruction::Number(n),
                        MathToken::X => MathInstruction::X,
                        _ => MathInstruction::Pi,
                    });
                    self.expect_operand = false;
                }
                MathToken::Function(func) => {
                    self.require_operand_slot(token, position)?;
                    if !matches!(tokens.get(index + 1), Some((MathToken::LParen, _))) {
                        return Err(ParseError::MissingFunctionArguments {
                            name: func.name().to_string(),
                        });
                    }
                    self.stack.push(MathStackEntry::Function(func));
                }
                MathToken::LParen => {
                    self.require_operand_slot(token, position)?;
                    self.stack.push(MathStackEntry::Open);
                }
                MathToken::RParen => {
                    if self.expect_operand {
                        return Err(ParseError::UnexpectedToken {
                            token: token.to_string(),
                            position,
                        });
                    }
                    self.close_paren()?;
                }
                MathToken::Operator(op) => {
                    if self.expect_operand {
                        match op {
                            ArithOperator::Subtract => self.stack.push(MathStackEntry::Negate),
                            ArithOperator::Add => {}
                            _ => {
                                return Err(ParseError::MissingOperand {
                                    op: op.to_string(),
                                })
                            }
                        }
                    } else {
                        self.push_binary(op);
                        self.expect_operand = true;
                    }
                    last_operator = Some(op);
                }
                MathToken::Comma => {
                    return Err(ParseError::UnexpectedToken {
                        token: token.to_string(),
                        position,
                    })
                }
            }
        }

        if self.expect_operand {
            return Err(match last_operator {
                Some(op) => ParseError::MissingOperand { op: op.to_string() },
                None => ParseError::MalformedExpression,
            });
        }

        while let Some(entry) = self.stack.pop() {
            match entry.into_instruction() {
                Some(instruction) => self.output.push(instruction),
                None => return Err(ParseError::UnbalancedParentheses),
            }
        }

        verify_stack_discipline(&self.output)?;
        Ok(self.output)
    }

    fn require_operand_slot(&self, token: MathToken, position: usize) -> ParseResult<()> {
        if self.expect_operand {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                token: token.to_string(),
                position,
            })
        }
    }

    fn push_binary(&mut self, incoming: ArithOperator) {
        let p1 = binary_precedence(incoming);
        let right_assoc = incoming == ArithOperator::Power;

        while let Some(top) = self.stack.last().copied() {
            let Some(p2) = top.precedence() else { break };
            let pops = if right_assoc { p1 < p2 } else { p1 <= p2 };
            if !pops {
                break;
            }
            self.stack.pop();
            if let Some(instruction) = top.into_instruction() {
                self.output.push(instruction);
            }
        }
        self.stack.push(MathStackEntry::Binary(incoming));
    }

    fn close_paren(&mut self) -> ParseResult<()> {
        loop {
            match self.stack.pop() {
                Some(MathStackEntry::Open) => break,
                Some(entry) => {
                    if let Some(instruction) = entry.into_instruction() {
                        self.output.push(instruction);
                    }
                }
                None => return Err(ParseError::UnbalancedParentheses),
            }
        }
        if let Some(MathStackEntry::Function(func)) = self.stack.last().copied() {
            self.stack.pop();
            self.output.push(MathInstruction::Call(func));
        }
        Ok(())
    }
}

/// Checks that every instruction finds its operands and one value remains.
fn verify_stack_discipline(instructions: &[MathInstruction]) -> ParseResult<()> {
    let mut depth = 0usize;
    for instruction in instructions {
        let (consumed, produced) = instruction.stack_effect();
        if depth < consumed {
            return Err(ParseError::MalformedExpression);
        }
        depth = depth - consumed + produced;
    }
    if depth == 1 {
        Ok(())
    } else {
        Err(ParseError::MalformedExpression)
    }
}

/// Compiles a restricted infix expression over `x` into a postfix program.
pub fn compile_function(input: &str) -> ParseResult<MathProgram> {
    let source = input.trim();
    if source.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let tokens = tokenize_math(source)?;
    let instructions = Parser::new(tokens).parse()?;
    log::debug!(
        "compiled function {:?} into {} instructions",
        source,
        instructions.len()
    );
    Ok(MathProgram::new(source.to_string(), instructions))
}
