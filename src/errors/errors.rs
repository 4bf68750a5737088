use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The compilation error envelope.
///
/// Every failure the lexer, parser or evaluator can produce is reported as
/// one of these, with the source position when one is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position: Some(position),
        }
    }

    pub fn without_position(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            position: None,
        }
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorImpl::IdentifierNotDefined { .. } => "IdentifierNotDefined",
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
            ErrorImpl::GrammarConflict { .. } => "GrammarConflict",
            ErrorImpl::Io { .. } => "Io",
            ErrorImpl::Internal { .. } => "Internal",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(position) = &self.position {
            writeln!(
                f,
                "At line {}, column {}, position {}",
                position.line, position.column, position.offset
            )?;
        }
        write!(f, "error: {}", self.internal_error)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::without_position(ErrorImpl::Io {
            message: error.to_string(),
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token {token:?}, expected one of: {}", expected.join(", "))]
    UnexpectedToken {
        token: String,
        expected: Vec<String>,
    },
    #[error("unexpected end of input, expected one of: {}", expected.join(", "))]
    UnexpectedEof { expected: Vec<String> },
    #[error("identifier {identifier:?} not defined")]
    IdentifierNotDefined { identifier: String },
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("grammar conflict in state {state} on {symbol}: {message}")]
    GrammarConflict {
        state: usize,
        symbol: String,
        message: String,
    },
    #[error("{message}")]
    Io { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}
