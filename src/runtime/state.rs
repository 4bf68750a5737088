use std::collections::{HashMap, HashSet};

use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::value::Value;

/// Mutable state of a single parse-and-evaluate run.
///
/// The parser records declarations while it reduces `let` statements, the
/// evaluator binds and reads values. One flat namespace, last binding wins.
#[derive(Debug, Default)]
pub struct ProgramState {
    declarations: HashSet<String>,
    definitions: HashMap<String, Value>,
}

impl ProgramState {
    pub fn new() -> Self {
        ProgramState::default()
    }

    /// Marks `identifier` as declared so that later references parse.
    pub fn declare(&mut self, identifier: &str) {
        trace!("declared {identifier:?}");
        self.declarations.insert(identifier.to_string());
    }

    pub fn is_declared(&self, identifier: &str) -> bool {
        self.declarations.contains(identifier)
    }

    /// The names declared so far, to hand back to [`ProgramState::rollback`].
    pub fn checkpoint(&self) -> HashSet<String> {
        self.declarations.clone()
    }

    /// Drops declarations made after `checkpoint` that never got bound.
    pub fn rollback(&mut self, checkpoint: HashSet<String>) {
        let definitions = &self.definitions;
        self.declarations
            .retain(|name| checkpoint.contains(name) || definitions.contains_key(name));
        trace!("rolled back to {} declarations", self.declarations.len());
    }

    /// Binds `identifier`, overwriting any previous binding.
    pub fn add_definition(&mut self, identifier: &str, value: Value) {
        trace!("bound {identifier:?} = {value:?}");
        self.declarations.insert(identifier.to_string());
        self.definitions.insert(identifier.to_string(), value);
    }

    pub fn get_definition(&self, identifier: &str, position: Position) -> Result<Value, Error> {
        self.definitions.get(identifier).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::IdentifierNotDefined {
                    identifier: identifier.to_string(),
                },
                position,
            )
        })
    }

    pub fn definitions(&self) -> &HashMap<String, Value> {
        &self.definitions
    }
}
