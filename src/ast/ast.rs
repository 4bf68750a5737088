use std::{any::Any, fmt::Debug, ops::Deref, slice::Iter};

use log::trace;

use crate::{
    errors::errors::Error,
    runtime::{interpreter::Interpreter, value::Value},
    Span,
};

/// Statement Types
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum StmtType {
    PrintStmt,
    LetStmt,
}

/// Statement Trait
///
/// Defines the behavior of all statement types in the AST.
pub trait Stmt: Debug {
    /// Returns the type of the statement.
    fn get_stmt_type(&self) -> StmtType;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Returns the span of the statement.
    fn get_span(&self) -> &Span;
    /// Runs the statement. Statements yield `Value::Undefined`.
    fn evaluate(&self, interpreter: &mut Interpreter) -> Result<Value, Error>;
}

/// Statement Wrapper
///
/// A wrapper that allows for any statement kind to be stored with helper methods
#[derive(Debug)]
pub struct StmtWrapper(Box<dyn Stmt>);

impl StmtWrapper {
    pub fn new<T: Stmt + 'static>(stmt: T) -> Self {
        StmtWrapper(Box::new(stmt))
    }
}

impl Deref for StmtWrapper {
    type Target = Box<dyn Stmt>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Expression Types
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ExprType {
    String,
    Undefined,
    Identifier,
}

pub trait Expr: Debug {
    /// Returns the expression type of the expression.
    fn get_expr_type(&self) -> ExprType;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Returns the span of the expression.
    fn get_span(&self) -> &Span;
    fn evaluate(&self, interpreter: &mut Interpreter) -> Result<Value, Error>;
}

/// Expression Wrapper
///
/// A wrapper that allows for any expression kind to be stored with helper methods
#[derive(Debug)]
pub struct ExprWrapper(Box<dyn Expr>);

impl ExprWrapper {
    pub fn new<T: Expr + 'static>(expression: T) -> Self {
        ExprWrapper(Box::new(expression))
    }
}

impl Deref for ExprWrapper {
    type Target = Box<dyn Expr>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The root of a parsed source file.
///
/// Owns the top-level statements in source order.
#[derive(Debug)]
pub struct Program {
    pub statements: Vec<StmtWrapper>,
    pub span: Span,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, StmtWrapper> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Evaluates every statement in order. The first error stops the run.
    pub fn evaluate(&self, interpreter: &mut Interpreter) -> Result<(), Error> {
        for stmt in self.iter() {
            trace!("evaluating {:?}", stmt.get_stmt_type());
            stmt.evaluate(interpreter)?;
        }
        Ok(())
    }
}
