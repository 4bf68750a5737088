//! Error types and error handling for the interpreter.
//!
//! This module defines the single error envelope used by every phase:
//!
//! - Lexical errors (no pattern matches the input)
//! - Syntax errors (the token stream does not fit the grammar)
//! - Semantic errors (an identifier used before it is declared)
//! - Formatting of errors with their source position

pub mod errors;
