//! Table-driven parser for building the Abstract Syntax Tree.
//!
//! The parser is a single left-to-right shift/reduce pass over the token
//! stream. Each reduction runs the production's builder handler, which may
//! record declarations in the Program State before later tokens are shifted.
//! The first error aborts the parse.

use std::sync::Arc;

use lazy_static::lazy_static;
use log::{debug, trace};
use parking_lot::RwLock;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Token,
    runtime::state::ProgramState,
    Position,
};

use super::{
    grammar::{Grammar, ParseValue, Terminal},
    productions::create_grammar,
    table::{ParseAction, ParseTable},
};

lazy_static! {
    static ref PARSER: RwLock<Option<Arc<Parser>>> = RwLock::new(None);
}

/// Returns the process-wide parser, building its tables on first use.
pub fn get_parser() -> Result<Arc<Parser>, Error> {
    if let Some(parser) = &*PARSER.read() {
        return Ok(Arc::clone(parser));
    }

    let mut cached = PARSER.write();
    if let Some(parser) = &*cached {
        return Ok(Arc::clone(parser));
    }

    let parser = Arc::new(Parser::new(create_grammar())?);
    *cached = Some(Arc::clone(&parser));
    Ok(parser)
}

/// Drops the cached parser so the next [`get_parser`] rebuilds it.
pub fn reset_parser() {
    debug!("resetting cached parser");
    *PARSER.write() = None;
}

/// A grammar together with its LALR(1) tables.
pub struct Parser {
    grammar: Grammar,
    table: ParseTable,
}

impl Parser {
    pub fn new(grammar: Grammar) -> Result<Parser, Error> {
        let table = ParseTable::build(&grammar)?;
        debug!(
            "built parser for {} productions, {} states",
            grammar.productions().len(),
            table.state_count()
        );
        Ok(Parser { grammar, table })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    fn unexpected(&self, state: usize, lookahead: Option<Token>, last_end: Option<Position>) -> Error {
        let expected = self
            .table
            .expected(state)
            .iter()
            .map(Terminal::to_string)
            .collect();

        match lookahead {
            Some(token) => Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.text,
                    expected,
                },
                token.position,
            ),
            None => {
                let error = ErrorImpl::UnexpectedEof { expected };
                match last_end {
                    Some(position) => Error::new(error, position),
                    None => Error::without_position(error),
                }
            }
        }
    }
}

fn internal(message: String) -> Error {
    Error::without_position(ErrorImpl::Internal { message })
}

/// Parses a token stream into a [`Program`].
///
/// # Arguments
///
/// * `parser` - The parser whose tables drive the parse
/// * `tokens` - Tokens in scan order; a lexical error in the stream aborts the parse
/// * `state` - Program State the grammar handlers record declarations into
///
/// # Returns
///
/// The root Program node, or the first error encountered. A failed parse
/// leaves no new declarations behind in `state`.
pub fn parse<I>(parser: &Parser, tokens: I, state: &mut ProgramState) -> Result<Program, Error>
where
    I: IntoIterator<Item = Result<Token, Error>>,
{
    let checkpoint = state.checkpoint();
    let result = drive(parser, tokens, state);
    if result.is_err() {
        state.rollback(checkpoint);
    }
    result
}

fn drive<I>(parser: &Parser, tokens: I, state: &mut ProgramState) -> Result<Program, Error>
where
    I: IntoIterator<Item = Result<Token, Error>>,
{
    let mut tokens = tokens.into_iter();
    let mut states: Vec<usize> = vec![0];
    let mut values: Vec<ParseValue> = Vec::new();
    let mut lookahead = tokens.next().transpose()?;
    let mut last_end: Option<Position> = None;

    loop {
        let top = states.last().copied().unwrap_or_default();
        let terminal = lookahead
            .as_ref()
            .map_or(Terminal::End, |token| Terminal::Token(token.kind));

        match parser.table.action(top, terminal) {
            Some(ParseAction::Shift(next)) => {
                let Some(token) = lookahead.take() else {
                    return Err(internal(String::from("shift past end of input")));
                };
                trace!("shift {} -> state {}", token, next);
                last_end = Some(token.span().end);
                values.push(ParseValue::Token(token));
                states.push(next);
                lookahead = tokens.next().transpose()?;
            }
            Some(ParseAction::Reduce(index)) => {
                let production = &parser.grammar.productions()[index];
                let arity = production.rhs.len();
                if values.len() < arity || states.len() <= arity {
                    return Err(internal(format!("stack underflow reducing {}", production)));
                }

                trace!("reduce {}", production);
                let arguments = values.split_off(values.len() - arity);
                states.truncate(states.len() - arity);
                let value = (production.handler)(state, arguments)?;

                let top = states.last().copied().unwrap_or_default();
                let next = parser.table.goto(top, production.lhs).ok_or_else(|| {
                    internal(format!("no goto from state {} on {}", top, production.lhs))
                })?;
                states.push(next);
                values.push(value);
            }
            Some(ParseAction::Accept) => {
                let value = values
                    .pop()
                    .ok_or_else(|| internal(String::from("accepted with an empty value stack")))?;
                return value.into_program();
            }
            None => return Err(parser.unexpected(top, lookahead, last_end)),
        }
    }
}
