//! Utility macros for the interpreter.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RHS!` - Builds the right-hand side of a grammar production

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$text` - The token's literal text
/// * `$position` - The source position of the first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Identifier, "x".to_string(), Position::new(1, 1, 0));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $text:expr, $position:expr) => {
        Token {
            kind: $kind,
            text: $text,
            position: $position,
        }
    };
}

/// Builds the right-hand side of a grammar production.
///
/// Accepts any mix of `TokenKind` and `NonTerminal` values.
///
/// # Example
///
/// ```ignore
/// grammar.production(NonTerminal::Stmt, MK_RHS!(TokenKind::PrintKeyword, NonTerminal::Expr), reduce_print_stmt);
/// ```
#[macro_export]
macro_rules! MK_RHS {
    ($($symbol:expr),* $(,)?) => {
        vec![$($crate::parser::grammar::Symbol::from($symbol)),*]
    };
}
