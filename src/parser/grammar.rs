use std::fmt::Display;

use crate::{
    ast::ast::{ExprWrapper, Program, StmtWrapper},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    runtime::state::ProgramState,
};

/// A terminal of the grammar: a token kind, or the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    Token(TokenKind),
    End,
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Terminal::Token(kind) => write!(f, "{}", kind),
            Terminal::End => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NonTerminal {
    /// Augmented start symbol, `Start ::= <grammar start>`.
    Start,
    Program,
    StmtList,
    Stmt,
    Expr,
}

impl Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl From<TokenKind> for Symbol {
    fn from(kind: TokenKind) -> Self {
        Symbol::Terminal(Terminal::Token(kind))
    }
}

impl From<NonTerminal> for Symbol {
    fn from(non_terminal: NonTerminal) -> Self {
        Symbol::NonTerminal(non_terminal)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(terminal) => write!(f, "{}", terminal),
            Symbol::NonTerminal(non_terminal) => write!(f, "{}", non_terminal),
        }
    }
}

/// A semantic value on the parser's value stack.
#[derive(Debug)]
pub enum ParseValue {
    Token(Token),
    Expr(ExprWrapper),
    Stmt(StmtWrapper),
    StmtList(Vec<StmtWrapper>),
    Program(Program),
}

impl ParseValue {
    fn name(&self) -> &'static str {
        match self {
            ParseValue::Token(_) => "token",
            ParseValue::Expr(_) => "expression",
            ParseValue::Stmt(_) => "statement",
            ParseValue::StmtList(_) => "statement list",
            ParseValue::Program(_) => "program",
        }
    }

    fn mismatch(self, expected: &str) -> Error {
        Error::without_position(ErrorImpl::Internal {
            message: format!("expected {} on value stack, found {}", expected, self.name()),
        })
    }

    pub fn into_token(self) -> Result<Token, Error> {
        match self {
            ParseValue::Token(token) => Ok(token),
            other => Err(other.mismatch("token")),
        }
    }

    pub fn into_expr(self) -> Result<ExprWrapper, Error> {
        match self {
            ParseValue::Expr(expr) => Ok(expr),
            other => Err(other.mismatch("expression")),
        }
    }

    pub fn into_stmt(self) -> Result<StmtWrapper, Error> {
        match self {
            ParseValue::Stmt(stmt) => Ok(stmt),
            other => Err(other.mismatch("statement")),
        }
    }

    pub fn into_stmt_list(self) -> Result<Vec<StmtWrapper>, Error> {
        match self {
            ParseValue::StmtList(list) => Ok(list),
            other => Err(other.mismatch("statement list")),
        }
    }

    pub fn into_program(self) -> Result<Program, Error> {
        match self {
            ParseValue::Program(program) => Ok(program),
            other => Err(other.mismatch("program")),
        }
    }
}

/// Builder action run when a production is reduced.
///
/// Receives the values of the right-hand side in source order.
pub type ReduceHandler = fn(&mut ProgramState, Vec<ParseValue>) -> Result<ParseValue, Error>;

pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: Vec<Symbol>,
    pub handler: ReduceHandler,
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ::=", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// An ordered list of productions.
///
/// Production 0 is always the augmented `Start ::= <start>`.
pub struct Grammar {
    productions: Vec<Production>,
}

impl Grammar {
    pub fn new(start: NonTerminal) -> Self {
        Grammar {
            productions: vec![Production {
                lhs: NonTerminal::Start,
                rhs: vec![Symbol::NonTerminal(start)],
                handler: accept_handler,
            }],
        }
    }

    /// Declares `lhs ::= rhs`, reduced with `handler`.
    pub fn production(&mut self, lhs: NonTerminal, rhs: Vec<Symbol>, handler: ReduceHandler) {
        self.productions.push(Production { lhs, rhs, handler });
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn productions_of(&self, lhs: NonTerminal) -> impl Iterator<Item = (usize, &Production)> {
        self.productions
            .iter()
            .enumerate()
            .filter(move |(_, production)| production.lhs == lhs)
    }
}

fn accept_handler(_state: &mut ProgramState, mut values: Vec<ParseValue>) -> Result<ParseValue, Error> {
    values.pop().ok_or_else(|| {
        Error::without_position(ErrorImpl::Internal {
            message: String::from("accepted with an empty value stack"),
        })
    })
}
