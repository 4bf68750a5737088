//! Unit tests for AST evaluation.

use super::{
    ast::{Expr, ExprType, ExprWrapper, Program, Stmt, StmtType, StmtWrapper},
    expressions::{IdentifierExpr, StringExpr, UndefinedExpr},
    statements::{LetStmt, PrintStmt},
};
use crate::{
    runtime::{interpreter::Interpreter, state::ProgramState, value::Value},
    Position, Span,
};

fn span() -> Span {
    Span {
        start: Position::start(),
        end: Position::start(),
    }
}

fn string(value: &str) -> ExprWrapper {
    ExprWrapper::new(StringExpr {
        value: value.to_string(),
        span: span(),
    })
}

fn identifier(name: &str) -> ExprWrapper {
    ExprWrapper::new(IdentifierExpr {
        name: name.to_string(),
        span: span(),
    })
}

fn run(program: &Program, state: &mut ProgramState) -> String {
    let mut out = Vec::new();
    let mut interpreter = Interpreter::new(state, &mut out);
    program.evaluate(&mut interpreter).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_literals_evaluate_to_themselves() {
    let mut state = ProgramState::new();
    let mut out = Vec::new();
    let mut interpreter = Interpreter::new(&mut state, &mut out);

    assert_eq!(string("hi").evaluate(&mut interpreter).unwrap(), Value::from("hi"));

    let undefined = UndefinedExpr { span: span() };
    assert_eq!(undefined.evaluate(&mut interpreter).unwrap(), Value::Undefined);
}

#[test]
fn test_print_writes_value() {
    let program = Program {
        statements: vec![StmtWrapper::new(PrintStmt {
            operand: string("hi"),
            span: span(),
        })],
        span: span(),
    };

    assert_eq!(run(&program, &mut ProgramState::new()), "hi\n");
}

#[test]
fn test_let_then_identifier() {
    let program = Program {
        statements: vec![
            StmtWrapper::new(LetStmt {
                identifier: "x".to_string(),
                initializer: Some(string("v")),
                span: span(),
            }),
            StmtWrapper::new(LetStmt {
                identifier: "y".to_string(),
                initializer: None,
                span: span(),
            }),
            StmtWrapper::new(PrintStmt {
                operand: identifier("x"),
                span: span(),
            }),
            StmtWrapper::new(PrintStmt {
                operand: identifier("y"),
                span: span(),
            }),
        ],
        span: span(),
    };

    let mut state = ProgramState::new();
    assert_eq!(run(&program, &mut state), "v\nundefined\n");
    assert_eq!(state.get_definition("y", Position::start()).unwrap(), Value::Undefined);
}

#[test]
fn test_identifier_resolves_at_evaluation() {
    let mut state = ProgramState::new();
    let mut out = Vec::new();
    let expr = identifier("late");

    {
        let mut interpreter = Interpreter::new(&mut state, &mut out);
        assert!(expr.evaluate(&mut interpreter).is_err());
    }

    state.add_definition("late", Value::from("bound"));
    let mut interpreter = Interpreter::new(&mut state, &mut out);
    assert_eq!(expr.evaluate(&mut interpreter).unwrap(), Value::from("bound"));
}

#[test]
fn test_node_types() {
    assert_eq!(string("a").get_expr_type(), ExprType::String);
    assert_eq!(identifier("a").get_expr_type(), ExprType::Identifier);

    let stmt = StmtWrapper::new(PrintStmt {
        operand: string("a"),
        span: span(),
    });
    assert_eq!(stmt.get_stmt_type(), StmtType::PrintStmt);
    assert!(stmt.as_any().downcast_ref::<PrintStmt>().is_some());
}
