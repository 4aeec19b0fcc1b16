//! FILENAME: core/parser/src/tests.rs
//! PURPOSE: Consolidated unit tests for the parser crate.

use crate::error::ParseError;
use crate::lexer::{tokenize_logic, tokenize_math, Lexer};
use crate::parser::{compile_function, compile_logic, to_rpn};
use crate::program::MathInstruction;
use crate::token::{ArithOperator, LogicOperator, MathFunction, MathToken, ParenSide, Token, Variable};

fn rpn(input: &str) -> String {
    compile_logic(input).expect("expression should compile").to_string()
}

fn instructions(input: &str) -> Vec<MathInstruction> {
    compile_function(input)
        .expect("expression should compile")
        .instructions()
        .to_vec()
}

// ========================================
// LOGIC LEXER TESTS
// ========================================

#[test]
fn test_lexer_tokenizes_simple_conjunction() {
    let tokens = tokenize_logic("A & B").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Variable(Variable::A),
            Token::Operator(LogicOperator::And),
            Token::Variable(Variable::B),
        ]
    );
}

#[test]
fn test_lexer_prefers_biconditional_over_implication() {
    let tokens = tokenize_logic("A<->B").unwrap();
    assert_eq!(tokens[1], Token::Operator(LogicOperator::Biconditional));

    let tokens = tokenize_logic("A->B").unwrap();
    assert_eq!(tokens[1], Token::Operator(LogicOperator::Implies));
}

#[test]
fn test_lexer_ignores_whitespace_everywhere() {
    let tokens = tokenize_logic("  ( A  - > B )  ").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Paren(ParenSide::Open),
            Token::Variable(Variable::A),
            Token::Operator(LogicOperator::Implies),
            Token::Variable(Variable::B),
            Token::Paren(ParenSide::Close),
        ]
    );
}

#[test]
fn test_lexer_tokenizes_xor_call() {
    let mut lexer = Lexer::new("xor(A, C) | B");
    assert_eq!(lexer.next_token(), Ok(Some(Token::Xor(Variable::A, Variable::C))));
    assert_eq!(lexer.next_token(), Ok(Some(Token::Operator(LogicOperator::Or))));
    assert_eq!(lexer.next_token(), Ok(Some(Token::Variable(Variable::B))));
    assert_eq!(lexer.next_token(), Ok(None));
}

#[test]
fn test_lexer_rejects_xor_with_bad_argument() {
    assert_eq!(
        tokenize_logic("xor(A,D)"),
        Err(ParseError::MalformedXor { position: 1 })
    );
    assert_eq!(
        tokenize_logic("A & xor(A B)"),
        Err(ParseError::MalformedXor { position: 3 })
    );
}

#[test]
fn test_lexer_reports_invalid_symbol_position() {
    assert_eq!(
        tokenize_logic("A # B"),
        Err(ParseError::InvalidSymbol { position: 2 })
    );
    assert_eq!(tokenize_logic("D"), Err(ParseError::InvalidSymbol { position: 1 }));
    assert_eq!(tokenize_logic("a"), Err(ParseError::InvalidSymbol { position: 1 }));
}

// ========================================
// LOGIC COMPILER TESTS
// ========================================

#[test]
fn test_parser_respects_logic_precedence() {
    assert_eq!(rpn("A & B | C"), "A B & C |");
    assert_eq!(rpn("A | B & C"), "A B C & |");
    assert_eq!(rpn("A | B -> C"), "A B | C ->");
    assert_eq!(rpn("A -> B <-> C"), "A B -> C <->");
}

#[test]
fn test_parser_groups_implication_to_the_right() {
    assert_eq!(rpn("A -> B -> C"), "A B C -> ->");
}

#[test]
fn test_parser_groups_biconditional_to_the_left() {
    assert_eq!(rpn("A <-> B <-> C"), "A B <-> C <->");
}

#[test]
fn test_parser_handles_negation() {
    assert_eq!(rpn("~A & B"), "A ~ B &");
    assert_eq!(rpn("~~A"), "A ~ ~");
    assert_eq!(rpn("~(A | B)"), "A B | ~");
}

#[test]
fn test_parser_handles_parentheses_and_xor() {
    assert_eq!(rpn("(A | B) & C"), "A B | C &");
    assert_eq!(rpn("xor(A,B) & C"), "xor(A,B) C &");
}

#[test]
fn test_parser_rejects_unbalanced_parentheses() {
    assert_eq!(compile_logic("(A & B"), Err(ParseError::UnbalancedParentheses));
    assert_eq!(compile_logic("A & B)"), Err(ParseError::UnbalancedParentheses));
    assert_eq!(to_rpn(&[Token::Paren(ParenSide::Close)]), Err(ParseError::UnbalancedParentheses));
}

#[test]
fn test_parser_rejects_blank_logic_input() {
    assert_eq!(compile_logic("   "), Err(ParseError::EmptyExpression));
}

#[test]
fn test_parser_defers_operand_checks_to_evaluation() {
    // Structural problems in logic programs surface when the program runs.
    assert_eq!(rpn("A &"), "A &");
}

#[test]
fn test_program_lists_referenced_variables() {
    let program = compile_logic("xor(A,C) & A").unwrap();
    let vars: Vec<Variable> = program.variables().into_iter().collect();
    assert_eq!(vars, vec![Variable::A, Variable::C]);
}

// ========================================
// NUMERIC LEXER TESTS
// ========================================

#[test]
fn test_math_lexer_tracks_positions() {
    let tokens = tokenize_math("2*x").unwrap();
    assert_eq!(
        tokens,
        vec![
            (MathToken::Number(2.0), 1),
            (MathToken::Operator(ArithOperator::Multiply), 2),
            (MathToken::X, 3),
        ]
    );
}

#[test]
fn test_math_lexer_normalizes_elementwise_operators() {
    let tokens = tokenize_math("x.^2").unwrap();
    assert_eq!(
        tokens,
        vec![
            (MathToken::X, 1),
            (MathToken::Operator(ArithOperator::Power), 2),
            (MathToken::Number(2.0), 4),
        ]
    );

    // The dot belongs to the operator, not the literal
    let tokens = tokenize_math("2.*x").unwrap();
    assert_eq!(tokens[0], (MathToken::Number(2.0), 1));
    assert_eq!(tokens[1], (MathToken::Operator(ArithOperator::Multiply), 2));
}

#[test]
fn test_math_lexer_reads_exponent_literals() {
    let tokens = tokenize_math("1.5e-3 + .25").unwrap();
    assert_eq!(tokens[0].0, MathToken::Number(1.5e-3));
    assert_eq!(tokens[2].0, MathToken::Number(0.25));
}

#[test]
fn test_math_lexer_recognizes_identifiers() {
    let tokens = tokenize_math("sqrt(PI)").unwrap();
    assert_eq!(tokens[0].0, MathToken::Function(MathFunction::Sqrt));
    assert_eq!(tokens[2].0, MathToken::Pi);
}

#[test]
fn test_math_lexer_rejects_unsafe_characters() {
    assert_eq!(
        tokenize_math("x; rm"),
        Err(ParseError::UnsafeCharacter { ch: ';', position: 2 })
    );
    assert!(matches!(
        tokenize_math("x == 1"),
        Err(ParseError::UnsafeCharacter { ch: '=', .. })
    ));
}

#[test]
fn test_math_lexer_rejects_unknown_identifiers() {
    assert_eq!(
        tokenize_math("y + 1"),
        Err(ParseError::UnknownIdentifier {
            name: "y".to_string(),
            position: 1
        })
    );
    // Only lowercase x is the free variable
    assert!(matches!(
        tokenize_math("X"),
        Err(ParseError::UnknownIdentifier { .. })
    ));
}

// ========================================
// NUMERIC COMPILER TESTS
// ========================================

#[test]
fn test_compiler_handles_power_before_negation() {
    use MathInstruction::*;
    assert_eq!(instructions("x^2"), vec![X, Number(2.0), Binary(ArithOperator::Power)]);
    assert_eq!(
        instructions("-x^2"),
        vec![X, Number(2.0), Binary(ArithOperator::Power), Negate]
    );
}

#[test]
fn test_compiler_groups_power_to_the_right() {
    use MathInstruction::*;
    assert_eq!(
        instructions("2^3^2"),
        vec![
            Number(2.0),
            Number(3.0),
            Number(2.0),
            Binary(ArithOperator::Power),
            Binary(ArithOperator::Power),
        ]
    );
    assert_eq!(
        instructions("2^-x"),
        vec![Number(2.0), X, Negate, Binary(ArithOperator::Power)]
    );
}

#[test]
fn test_compiler_groups_subtraction_to_the_left() {
    use MathInstruction::*;
    assert_eq!(
        instructions("1 - 2 - 3"),
        vec![
            Number(1.0),
            Number(2.0),
            Binary(ArithOperator::Subtract),
            Number(3.0),
            Binary(ArithOperator::Subtract),
        ]
    );
}

#[test]
fn test_compiler_applies_unary_minus_before_multiplication() {
    use MathInstruction::*;
    assert_eq!(
        instructions("-2*x"),
        vec![Number(2.0), Negate, X, Binary(ArithOperator::Multiply)]
    );
    assert_eq!(instructions("- -x"), vec![X, Negate, Negate]);
    assert_eq!(instructions("+x"), vec![X]);
}

#[test]
fn test_compiler_emits_function_calls_after_arguments() {
    use MathInstruction::*;
    assert_eq!(
        instructions("sin(x)*2"),
        vec![X, Call(MathFunction::Sin), Number(2.0), Binary(ArithOperator::Multiply)]
    );
    assert_eq!(instructions("exp(-x)"), vec![X, Negate, Call(MathFunction::Exp)]);
    assert_eq!(instructions("-(x)"), vec![X, Negate]);
}

#[test]
fn test_compiler_requires_function_arguments() {
    assert_eq!(
        compile_function("sin x"),
        Err(ParseError::MissingFunctionArguments {
            name: "sin".to_string()
        })
    );
}

#[test]
fn test_compiler_rejects_structural_errors() {
    assert_eq!(compile_function("sin(x"), Err(ParseError::UnbalancedParentheses));
    assert_eq!(compile_function("x)"), Err(ParseError::UnbalancedParentheses));
    assert_eq!(
        compile_function("x +"),
        Err(ParseError::MissingOperand { op: "+".to_string() })
    );
    assert_eq!(
        compile_function("* x"),
        Err(ParseError::MissingOperand { op: "*".to_string() })
    );
    assert_eq!(
        compile_function("()"),
        Err(ParseError::UnexpectedToken {
            token: ")".to_string(),
            position: 2
        })
    );
}

#[test]
fn test_compiler_rejects_implicit_multiplication_and_commas() {
    assert_eq!(
        compile_function("2x"),
        Err(ParseError::UnexpectedToken {
            token: "x".to_string(),
            position: 2
        })
    );
    assert_eq!(
        compile_function("(x, 1)"),
        Err(ParseError::UnexpectedToken {
            token: ",".to_string(),
            position: 3
        })
    );
}

#[test]
fn test_compiler_rejects_blank_input() {
    assert_eq!(compile_function(""), Err(ParseError::EmptyExpression));
    assert_eq!(compile_function("   "), Err(ParseError::EmptyExpression));
}

#[test]
fn test_compiler_keeps_trimmed_source() {
    let program = compile_function("  x + 1 ").unwrap();
    assert_eq!(program.source(), "x + 1");
}
