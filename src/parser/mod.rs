//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains a table-driven LALR(1) parser. It handles:
//!
//! - Declaring the grammar as productions with builder handlers
//! - Building the ACTION/GOTO tables from those productions
//! - Driving the shift/reduce loop over the token stream
//! - Reporting unexpected tokens and undeclared identifiers
//!
//! The grammar is declared in `productions`, the automaton is built in
//! `table`, and `parser` owns the driver and the process-wide cache.

pub mod grammar;
pub mod parser;
pub mod productions;
pub mod table;

#[cfg(test)]
mod tests;
