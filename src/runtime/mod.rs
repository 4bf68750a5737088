//! Runtime support shared by the parser and the evaluator.
//!
//! - `value`: the dynamic value domain
//! - `state`: the per-run Program State (declarations and symbol table)
//! - `interpreter`: the evaluation context handed to every AST node

pub mod interpreter;
pub mod state;
pub mod value;
