use std::any::Any;

use crate::{
    errors::errors::Error,
    runtime::{interpreter::Interpreter, value::Value},
    Span,
};

use super::ast::{Expr, ExprType};

#[derive(Debug, Clone)]
pub struct StringExpr {
    /// Dequoted text.
    pub value: String,
    pub span: Span,
}

impl Expr for StringExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::String
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn evaluate(&self, _interpreter: &mut Interpreter) -> Result<Value, Error> {
        Ok(Value::Str(self.value.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct UndefinedExpr {
    pub span: Span,
}

impl Expr for UndefinedExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Undefined
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn evaluate(&self, _interpreter: &mut Interpreter) -> Result<Value, Error> {
        Ok(Value::Undefined)
    }
}

/// A reference to a `let` binding, resolved when evaluated.
///
/// The parser only builds one after the name has been declared, so lookup
/// failure here means the node was constructed by hand.
#[derive(Debug, Clone)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

impl Expr for IdentifierExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Identifier
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn evaluate(&self, interpreter: &mut Interpreter) -> Result<Value, Error> {
        interpreter.state.get_definition(&self.name, self.span.start)
    }
}
