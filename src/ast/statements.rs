use std::any::Any;

use crate::{
    errors::errors::Error,
    runtime::{interpreter::Interpreter, value::Value},
    Span,
};

use super::ast::{ExprWrapper, Stmt, StmtType};

/// `print <expr>`
#[derive(Debug)]
pub struct PrintStmt {
    pub operand: ExprWrapper,
    pub span: Span,
}

impl Stmt for PrintStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::PrintStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn evaluate(&self, interpreter: &mut Interpreter) -> Result<Value, Error> {
        let value = self.operand.evaluate(interpreter)?;
        interpreter.print(&value)?;
        Ok(Value::Undefined)
    }
}

/// `let <ident>` or `let <ident> = <expr>`
///
/// Without an initializer the identifier is bound to `Value::Undefined`.
#[derive(Debug)]
pub struct LetStmt {
    pub identifier: String,
    pub initializer: Option<ExprWrapper>,
    pub span: Span,
}

impl Stmt for LetStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::LetStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn evaluate(&self, interpreter: &mut Interpreter) -> Result<Value, Error> {
        let value = match &self.initializer {
            Some(initializer) => initializer.evaluate(interpreter)?,
            None => Value::Undefined,
        };
        interpreter.state.add_definition(&self.identifier, value);
        Ok(Value::Undefined)
    }
}
