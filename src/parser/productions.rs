use log::trace;

use crate::{
    ast::{
        ast::{ExprWrapper, Program, StmtWrapper},
        expressions::{IdentifierExpr, StringExpr, UndefinedExpr},
        statements::{LetStmt, PrintStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    runtime::state::ProgramState,
    Position, Span, MK_RHS,
};

use super::grammar::{Grammar, NonTerminal, ParseValue};

/// Declares the language grammar.
///
/// ```text
/// program   ::= stmt_list
/// stmt_list ::= stmt | stmt_list stmt
/// stmt      ::= PRINT expr | LET IDENT | LET IDENT ASSIGN expr
/// expr      ::= STRING_LITERAL | UNDEFINED_LITERAL | IDENT
/// ```
pub fn create_grammar() -> Grammar {
    let mut grammar = Grammar::new(NonTerminal::Program);

    grammar.production(NonTerminal::Program, MK_RHS!(NonTerminal::StmtList), reduce_program);

    grammar.production(NonTerminal::StmtList, MK_RHS!(NonTerminal::Stmt), reduce_stmt_list_first);
    grammar.production(
        NonTerminal::StmtList,
        MK_RHS!(NonTerminal::StmtList, NonTerminal::Stmt),
        reduce_stmt_list_append,
    );

    // Statements
    grammar.production(
        NonTerminal::Stmt,
        MK_RHS!(TokenKind::PrintKeyword, NonTerminal::Expr),
        reduce_print_stmt,
    );
    grammar.production(
        NonTerminal::Stmt,
        MK_RHS!(TokenKind::LetKeyword, TokenKind::Identifier),
        reduce_let_stmt,
    );
    grammar.production(
        NonTerminal::Stmt,
        MK_RHS!(
            TokenKind::LetKeyword,
            TokenKind::Identifier,
            TokenKind::AssignOperator,
            NonTerminal::Expr
        ),
        reduce_let_assign_stmt,
    );

    // Expressions
    grammar.production(NonTerminal::Expr, MK_RHS!(TokenKind::StringLiteral), reduce_string_expr);
    grammar.production(NonTerminal::Expr, MK_RHS!(TokenKind::UndefinedLiteral), reduce_undefined_expr);
    grammar.production(NonTerminal::Expr, MK_RHS!(TokenKind::Identifier), reduce_identifier_expr);

    grammar
}

fn take<const N: usize>(values: Vec<ParseValue>) -> Result<[ParseValue; N], Error> {
    <[ParseValue; N]>::try_from(values).map_err(|values| {
        Error::without_position(ErrorImpl::Internal {
            message: format!("expected {} values for reduction, found {}", N, values.len()),
        })
    })
}

pub fn reduce_program(_state: &mut ProgramState, values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    let [list] = take(values)?;
    let statements = list.into_stmt_list()?;

    let span = match (statements.first(), statements.last()) {
        (Some(first), Some(last)) => Span {
            start: first.get_span().start,
            end: last.get_span().end,
        },
        _ => Span {
            start: Position::start(),
            end: Position::start(),
        },
    };

    Ok(ParseValue::Program(Program { statements, span }))
}

pub fn reduce_stmt_list_first(_state: &mut ProgramState, values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    let [stmt] = take(values)?;
    Ok(ParseValue::StmtList(vec![stmt.into_stmt()?]))
}

pub fn reduce_stmt_list_append(_state: &mut ProgramState, values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    let [list, stmt] = take(values)?;
    let mut list = list.into_stmt_list()?;
    list.push(stmt.into_stmt()?);
    Ok(ParseValue::StmtList(list))
}

pub fn reduce_print_stmt(_state: &mut ProgramState, values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    let [keyword, operand] = take(values)?;
    let keyword = keyword.into_token()?;
    let operand = operand.into_expr()?;

    Ok(ParseValue::Stmt(StmtWrapper::new(PrintStmt {
        span: Span {
            start: keyword.position,
            end: operand.get_span().end,
        },
        operand,
    })))
}

pub fn reduce_let_stmt(state: &mut ProgramState, values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    let [keyword, identifier] = take(values)?;
    let keyword = keyword.into_token()?;
    let identifier = identifier.into_token()?;

    state.declare(&identifier.text);

    Ok(ParseValue::Stmt(StmtWrapper::new(LetStmt {
        span: Span {
            start: keyword.position,
            end: identifier.span().end,
        },
        identifier: identifier.text,
        initializer: None,
    })))
}

pub fn reduce_let_assign_stmt(state: &mut ProgramState, values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    let [keyword, identifier, _assign, initializer] = take(values)?;
    let keyword = keyword.into_token()?;
    let identifier = identifier.into_token()?;
    let initializer: ExprWrapper = initializer.into_expr()?;

    state.declare(&identifier.text);

    Ok(ParseValue::Stmt(StmtWrapper::new(LetStmt {
        span: Span {
            start: keyword.position,
            end: initializer.get_span().end,
        },
        identifier: identifier.text,
        initializer: Some(initializer),
    })))
}

pub fn reduce_string_expr(_state: &mut ProgramState, values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    let [literal] = take(values)?;
    let literal = literal.into_token()?;

    // Both quote characters are one byte wide.
    let value = literal
        .text
        .get(1..literal.text.len().saturating_sub(1))
        .unwrap_or_default()
        .to_string();

    Ok(ParseValue::Expr(ExprWrapper::new(StringExpr {
        value,
        span: literal.span(),
    })))
}

pub fn reduce_undefined_expr(_state: &mut ProgramState, values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    let [literal] = take(values)?;
    let literal = literal.into_token()?;

    Ok(ParseValue::Expr(ExprWrapper::new(UndefinedExpr {
        span: literal.span(),
    })))
}

/// Fails unless an earlier `let` already declared the identifier.
pub fn reduce_identifier_expr(state: &mut ProgramState, values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    let [identifier] = take(values)?;
    let identifier = identifier.into_token()?;

    if !state.is_declared(&identifier.text) {
        return Err(Error::new(
            ErrorImpl::IdentifierNotDefined {
                identifier: identifier.text,
            },
            identifier.position,
        ));
    }

    trace!("resolved reference to {:?}", identifier.text);
    Ok(ParseValue::Expr(ExprWrapper::new(IdentifierExpr {
        span: identifier.span(),
        name: identifier.text,
    })))
}
