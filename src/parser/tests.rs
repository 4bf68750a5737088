//! Unit tests for the parser module.
//!
//! - Statement and expression productions
//! - Parse-time identifier declaration order
//! - Syntax errors and their positions
//! - Table construction for other grammars

use std::sync::Arc;

use super::{
    grammar::{Grammar, NonTerminal, ParseValue, Terminal},
    parser::{get_parser, parse, reset_parser, Parser},
    productions::{create_grammar, reduce_program, reduce_stmt_list_append},
    table::ParseAction,
};
use crate::{
    ast::{
        ast::{ExprType, Program, StmtType},
        expressions::StringExpr,
        statements::{LetStmt, PrintStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{TokenKind, IGNORED_PATTERNS, TOKEN_TABLE},
    },
    runtime::state::ProgramState,
    Position, MK_RHS,
};

fn parse_source(source: &str, state: &mut ProgramState) -> Result<Program, Error> {
    let lexer = Lexer::new(TOKEN_TABLE, IGNORED_PATTERNS).unwrap();
    let parser = Parser::new(create_grammar()).unwrap();
    parse(&parser, lexer.tokenize(source), state)
}

#[test]
fn test_grammar_builds_without_conflicts() {
    let parser = Parser::new(create_grammar()).unwrap();

    assert!(parser.table().state_count() > 0);
    assert_eq!(parser.grammar().productions().len(), 10);
    assert_eq!(
        parser.grammar().productions()[4].to_string(),
        "Stmt ::= PrintKeyword Expr"
    );
}

#[test]
fn test_start_state_expects_statements() {
    let parser = Parser::new(create_grammar()).unwrap();

    assert_eq!(
        parser.table().expected(0),
        vec![
            Terminal::Token(TokenKind::PrintKeyword),
            Terminal::Token(TokenKind::LetKeyword),
        ]
    );
}

#[test]
fn test_parse_print() {
    let program = parse_source("print \"hi\"", &mut ProgramState::new()).unwrap();

    assert_eq!(program.len(), 1);
    assert_eq!(program.statements[0].get_stmt_type(), StmtType::PrintStmt);

    let print = program.statements[0].as_any().downcast_ref::<PrintStmt>().unwrap();
    let literal = print.operand.as_any().downcast_ref::<StringExpr>().unwrap();
    assert_eq!(literal.value, "hi");
    assert_eq!(print.span.start, Position::new(1, 1, 0));
    assert_eq!(print.span.end, Position::new(1, 11, 10));
}

#[test]
fn test_parse_single_quoted_and_empty_strings() {
    let program = parse_source("print 'a b' print \"\"", &mut ProgramState::new()).unwrap();

    let values: Vec<String> = program
        .iter()
        .map(|stmt| {
            let print = stmt.as_any().downcast_ref::<PrintStmt>().unwrap();
            print.operand.as_any().downcast_ref::<StringExpr>().unwrap().value.clone()
        })
        .collect();
    assert_eq!(values, vec!["a b".to_string(), String::new()]);
}

#[test]
fn test_parse_let_forms() {
    let mut state = ProgramState::new();
    let program = parse_source("let x let y = undefined let z = 'v'", &mut state).unwrap();

    assert_eq!(program.len(), 3);

    let x = program.statements[0].as_any().downcast_ref::<LetStmt>().unwrap();
    assert_eq!(x.identifier, "x");
    assert!(x.initializer.is_none());

    let y = program.statements[1].as_any().downcast_ref::<LetStmt>().unwrap();
    assert_eq!(y.initializer.as_ref().unwrap().get_expr_type(), ExprType::Undefined);

    let z = program.statements[2].as_any().downcast_ref::<LetStmt>().unwrap();
    assert_eq!(z.initializer.as_ref().unwrap().get_expr_type(), ExprType::String);

    assert!(state.is_declared("x"));
    assert!(state.is_declared("y"));
    assert!(state.is_declared("z"));
    // Parsing declares, evaluation binds.
    assert!(state.definitions().is_empty());
}

#[test]
fn test_statements_keep_source_order() {
    let program = parse_source("let a print a let b print b", &mut ProgramState::new()).unwrap();

    let kinds: Vec<StmtType> = program.iter().map(|stmt| stmt.get_stmt_type()).collect();
    assert_eq!(
        kinds,
        vec![
            StmtType::LetStmt,
            StmtType::PrintStmt,
            StmtType::LetStmt,
            StmtType::PrintStmt,
        ]
    );
}

#[test]
fn test_identifier_after_let() {
    let program = parse_source("let x = \"v\" print x", &mut ProgramState::new()).unwrap();

    let print = program.statements[1].as_any().downcast_ref::<PrintStmt>().unwrap();
    assert_eq!(print.operand.get_expr_type(), ExprType::Identifier);
}

#[test]
fn test_forward_reference_fails() {
    let error = parse_source("print x let x = \"v\"", &mut ProgramState::new()).unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::IdentifierNotDefined {
            identifier: "x".to_string()
        }
    );
    assert_eq!(error.get_position(), Some(&Position::new(1, 7, 6)));
}

#[test]
fn test_self_reference_in_initializer_fails() {
    let error = parse_source("let x = x", &mut ProgramState::new()).unwrap_err();

    assert_eq!(error.get_error_name(), "IdentifierNotDefined");
    assert_eq!(error.get_position(), Some(&Position::new(1, 9, 8)));
}

#[test]
fn test_unexpected_token() {
    let error = parse_source("let = 'a'", &mut ProgramState::new()).unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            token: "=".to_string(),
            expected: vec!["Identifier".to_string()],
        }
    );
    assert_eq!(error.get_position(), Some(&Position::new(1, 5, 4)));
}

#[test]
fn test_unexpected_eof() {
    let error = parse_source("print", &mut ProgramState::new()).unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedEof {
            expected: vec![
                "StringLiteral".to_string(),
                "UndefinedLiteral".to_string(),
                "Identifier".to_string(),
            ],
        }
    );
    assert_eq!(error.get_position(), Some(&Position::new(1, 6, 5)));
}

#[test]
fn test_empty_source_is_error() {
    let error = parse_source("   ", &mut ProgramState::new()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedEof");
    assert!(error.get_position().is_none());
}

#[test]
fn test_lex_error_aborts_parse() {
    let mut state = ProgramState::new();
    let error = parse_source("let x # let y", &mut state).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(!state.is_declared("y"));
}

#[test]
fn test_failed_parse_discards_declarations() {
    let mut state = ProgramState::new();
    state.declare("kept");

    let error = parse_source("let x = 'a' let z print y", &mut state).unwrap_err();

    assert_eq!(error.get_error_name(), "IdentifierNotDefined");
    assert!(state.is_declared("kept"));
    assert!(!state.is_declared("x"));
    assert!(!state.is_declared("z"));
}

#[test]
fn test_ambiguous_grammar_reports_conflict() {
    // Expr ::= Expr Expr | StringLiteral
    let mut grammar = Grammar::new(NonTerminal::Expr);
    grammar.production(
        NonTerminal::Expr,
        MK_RHS!(NonTerminal::Expr, NonTerminal::Expr),
        reduce_stmt_list_append,
    );
    grammar.production(NonTerminal::Expr, MK_RHS!(TokenKind::StringLiteral), reduce_stmt_list_append);

    let error = Parser::new(grammar).err().unwrap();
    assert!(matches!(error.get_error(), ErrorImpl::GrammarConflict { .. }));
}

fn reduce_empty_list(_state: &mut ProgramState, _values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    Ok(ParseValue::StmtList(Vec::new()))
}

#[test]
fn test_nullable_productions() {
    // Program ::= StmtList, StmtList ::= <empty> | StmtList Stmt, Stmt ::= PrintKeyword Expr
    let mut grammar = Grammar::new(NonTerminal::Program);
    grammar.production(NonTerminal::Program, MK_RHS!(NonTerminal::StmtList), reduce_program);
    grammar.production(NonTerminal::StmtList, MK_RHS!(), reduce_empty_list);
    grammar.production(
        NonTerminal::StmtList,
        MK_RHS!(NonTerminal::StmtList, NonTerminal::Stmt),
        reduce_stmt_list_append,
    );
    let full = create_grammar();
    for (_, production) in full.productions_of(NonTerminal::Stmt).chain(full.productions_of(NonTerminal::Expr)) {
        grammar.production(production.lhs, production.rhs.clone(), production.handler);
    }

    let parser = Parser::new(grammar).unwrap();
    assert_eq!(
        parser.table().action(0, Terminal::End),
        Some(ParseAction::Reduce(2))
    );

    let lexer = Lexer::new(TOKEN_TABLE, IGNORED_PATTERNS).unwrap();
    let empty = parse(&parser, lexer.tokenize(""), &mut ProgramState::new()).unwrap();
    assert!(empty.is_empty());

    let two = parse(&parser, lexer.tokenize("print 'a' print 'b'"), &mut ProgramState::new()).unwrap();
    assert_eq!(two.len(), 2);
}

#[test]
fn test_cached_parser_is_reused_until_reset() {
    let first = get_parser().unwrap();
    let second = get_parser().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    reset_parser();
    let rebuilt = get_parser().unwrap();
    assert!(!Arc::ptr_eq(&first, &rebuilt));
}
