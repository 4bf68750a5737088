/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure and its evaluation
///
/// Submodules:
/// - ast: Core AST traits, wrappers and the Program root
/// - expressions: Literal and identifier expressions
/// - statements: `print` and `let` statements
pub mod ast;
pub mod expressions;
pub mod statements;

#[cfg(test)]
mod tests;
