use std::io::Write;

use crate::errors::errors::Error;

use super::{state::ProgramState, value::Value};

/// Evaluation context passed to every node's `evaluate`.
///
/// Holds the Program State and the sink `print` writes to.
pub struct Interpreter<'a> {
    pub state: &'a mut ProgramState,
    out: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(state: &'a mut ProgramState, out: &'a mut dyn Write) -> Self {
        Interpreter { state, out }
    }

    /// Writes the rendered value followed by a newline.
    pub fn print(&mut self, value: &Value) -> Result<(), Error> {
        writeln!(self.out, "{}", value)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.out.flush()?;
        Ok(())
    }
}
