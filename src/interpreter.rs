use std::io::Write;

use tracing::debug;

use crate::ast::Statement;
use crate::runtime::class::ClassTable;
use crate::runtime::error::RuntimeError;
use crate::runtime::value::Closure;

mod operators;
mod runtime;

pub use runtime::{Context, ExecResult};

/// Tree-walking executor for a program built against a [`ClassTable`].
///
/// Each run starts from the globals it is given; nothing is kept between
/// runs, so one interpreter can execute many programs in isolation.
pub struct Interpreter<'a> {
    classes: &'a ClassTable,
}

impl<'a> Interpreter<'a> {
    pub fn new(classes: &'a ClassTable) -> Self {
        Self { classes }
    }

    /// Runs `program` with empty globals and returns everything it printed.
    pub fn run(&self, program: &Statement) -> Result<String, RuntimeError> {
        let mut output = Vec::new();
        self.run_with_output(program, &mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    pub fn run_with_output(
        &self,
        program: &Statement,
        output: &mut dyn Write,
    ) -> Result<(), RuntimeError> {
        let mut globals = Closure::default();
        self.run_in(program, &mut globals, output)
    }

    /// Runs `program` against caller-owned globals, which keep whatever the
    /// program assigned, even when it fails part-way.
    pub fn run_in(
        &self,
        program: &Statement,
        globals: &mut Closure,
        output: &mut dyn Write,
    ) -> Result<(), RuntimeError> {
        debug!(classes = self.classes.len(), "running program");
        let mut context = Context::new(self.classes, output);
        let result = match context.exec(program, globals)? {
            ExecResult::Normal(_) => Ok(()),
            ExecResult::Return(_) => Err(RuntimeError::ReturnOutsideMethod),
        };
        debug!(globals = globals.len(), "program finished");
        result
    }
}
