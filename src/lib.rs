#![allow(clippy::module_inception)]

use std::io::Write;

use log::debug;

use crate::{
    errors::errors::Error,
    lexer::{lexer::get_lexer, tokens::Token},
    parser::parser::{get_parser, parse},
    runtime::{interpreter::Interpreter, state::ProgramState},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod runtime;

extern crate regex;

/// A location in the source text.
///
/// `line` and `column` are 1-based, `column` counts characters. `offset` is
/// the 0-based byte offset from the start of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }

    pub fn start() -> Self {
        Position::new(1, 1, 0)
    }

    /// The position just past `text` when it starts at `self`.
    pub fn advanced_over(&self, text: &str) -> Position {
        let mut position = *self;
        for ch in text.chars() {
            if ch == '\n' {
                position.line += 1;
                position.column = 1;
            } else {
                position.column += 1;
            }
        }
        position.offset += text.len();
        position
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes the whole source, stopping at the first lexical error.
pub fn lex_source(source: &str) -> Result<Vec<Token>, Error> {
    let lexer = get_lexer()?;
    lexer.tokenize(source).collect()
}

/// Lexes, parses and evaluates `source` with a fresh [`ProgramState`].
///
/// Output of `print` statements is written to `out`.
pub fn run_source(source: &str, out: &mut dyn Write) -> Result<(), Error> {
    let mut state = ProgramState::new();
    run_source_with_state(source, &mut state, out)
}

/// Same as [`run_source`] but evaluates against a caller supplied state.
pub fn run_source_with_state(
    source: &str,
    state: &mut ProgramState,
    out: &mut dyn Write,
) -> Result<(), Error> {
    let lexer = get_lexer()?;
    let parser = get_parser()?;

    let checkpoint = state.checkpoint();
    let program = parse(&parser, lexer.tokenize(source), state)?;
    debug!("parsed program with {} statements", program.len());

    let result = {
        let mut interpreter = Interpreter::new(state, out);
        program
            .evaluate(&mut interpreter)
            .and_then(|()| interpreter.flush())
    };
    if result.is_err() {
        state.rollback(checkpoint);
    }
    result
}

/// Writes one line per token to `out` in scan order.
///
/// Tokens before a lexical error are written before the error is returned.
pub fn write_tokens(source: &str, out: &mut dyn Write) -> Result<(), Error> {
    let lexer = get_lexer()?;
    for token in lexer.tokenize(source) {
        writeln!(out, "{}", token?)?;
    }
    out.flush()?;
    Ok(())
}
