use std::fmt::Display;

use crate::{Position, Span};

/// Ordered pattern table consumed by the lexer builder.
///
/// Patterns are tried in declaration order and the first one matching at the
/// current position wins, so keywords must come before `Identifier`.
pub const TOKEN_TABLE: &[(TokenKind, &str)] = &[
    // Literals
    (TokenKind::StringLiteral, r#""[^"\n]*"|'[^'\n]*'"#),
    (TokenKind::UndefinedLiteral, r"undefined\b"),

    // Statements
    (TokenKind::PrintKeyword, r"print\b"),
    (TokenKind::LetKeyword, r"let\b"),

    (TokenKind::Identifier, r"[a-zA-Z_][a-zA-Z0-9_]*"),
    (TokenKind::AssignOperator, r"="),
];

/// Patterns that are recognised but never yielded as tokens.
pub const IGNORED_PATTERNS: &[&str] = &[r"\s+"];

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum TokenKind {
    StringLiteral,
    UndefinedLiteral,
    Identifier,

    // Reserved
    PrintKeyword,
    LetKeyword,

    AssignOperator, // =
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

/// Debug rendering used by `zed lex`: kind, literal text, position tuple.
impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} ({}, {}, {})",
            self.kind, self.text, self.position.line, self.position.column, self.position.offset
        )
    }
}

impl Token {
    /// Span from the first character to just past the last one.
    pub fn span(&self) -> Span {
        Span {
            start: self.position,
            end: self.position.advanced_over(&self.text),
        }
    }
}
