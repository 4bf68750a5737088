use std::sync::Arc;

use lazy_static::lazy_static;
use log::{debug, trace};
use parking_lot::RwLock;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, IGNORED_PATTERNS, TOKEN_TABLE};

lazy_static! {
    static ref LEXER: RwLock<Option<Arc<Lexer>>> = RwLock::new(None);
}

/// Returns the process-wide compiled lexer, building it on first use.
pub fn get_lexer() -> Result<Arc<Lexer>, Error> {
    if let Some(lexer) = &*LEXER.read() {
        return Ok(Arc::clone(lexer));
    }

    let mut cached = LEXER.write();
    if let Some(lexer) = &*cached {
        return Ok(Arc::clone(lexer));
    }

    let lexer = Arc::new(Lexer::new(TOKEN_TABLE, IGNORED_PATTERNS)?);
    *cached = Some(Arc::clone(&lexer));
    Ok(lexer)
}

/// Drops the cached lexer so the next [`get_lexer`] rebuilds it.
pub fn reset_lexer() {
    debug!("resetting cached lexer");
    *LEXER.write() = None;
}

#[derive(Debug, Clone)]
pub struct RegexPattern {
    regex: Regex,
    /// `None` for ignored patterns.
    kind: Option<TokenKind>,
}

/// A Token Table compiled into anchored regexes.
#[derive(Debug, Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
}

impl Lexer {
    pub fn new(table: &[(TokenKind, &str)], ignored: &[&str]) -> Result<Lexer, Error> {
        let mut patterns = Vec::with_capacity(table.len() + ignored.len());

        for (kind, pattern) in table {
            patterns.push(RegexPattern {
                regex: compile_anchored(pattern)?,
                kind: Some(*kind),
            });
        }
        for pattern in ignored {
            patterns.push(RegexPattern {
                regex: compile_anchored(pattern)?,
                kind: None,
            });
        }

        debug!("built lexer with {} patterns", patterns.len());
        Ok(Lexer { patterns })
    }

    /// Returns a lazy token stream over `source`.
    pub fn tokenize<'l, 's>(&'l self, source: &'s str) -> Tokens<'l, 's> {
        Tokens {
            lexer: self,
            source,
            position: Position::start(),
            failed: false,
        }
    }

    /// First declared pattern matching at the start of `remainder`.
    fn match_at<'s>(&self, remainder: &'s str) -> Option<(Option<TokenKind>, &'s str)> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .regex
                .find(remainder)
                .filter(|found| !found.as_str().is_empty())
                .map(|found| (pattern.kind, found.as_str()))
        })
    }
}

fn compile_anchored(pattern: &str) -> Result<Regex, Error> {
    Regex::new(&format!(r"\A(?:{})", pattern)).map_err(|error| {
        Error::without_position(ErrorImpl::InvalidPattern {
            pattern: pattern.to_string(),
            message: error.to_string(),
        })
    })
}

/// Iterator produced by [`Lexer::tokenize`].
///
/// Yields at most one error, after which it is exhausted.
pub struct Tokens<'l, 's> {
    lexer: &'l Lexer,
    source: &'s str,
    position: Position,
    failed: bool,
}

impl Iterator for Tokens<'_, '_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let source = self.source;
            let remainder = &source[self.position.offset..];
            if remainder.is_empty() {
                return None;
            }

            let Some((kind, text)) = self.lexer.match_at(remainder) else {
                self.failed = true;
                let token = remainder.chars().next().map(String::from).unwrap_or_default();
                return Some(Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token },
                    self.position,
                )));
            };

            let start = self.position;
            self.position = start.advanced_over(text);

            if let Some(kind) = kind {
                let token = MK_TOKEN!(kind, String::from(text), start);
                trace!("lexed {}", token);
                return Some(Ok(token));
            }
        }
    }
}

impl std::iter::FusedIterator for Tokens<'_, '_> {}
