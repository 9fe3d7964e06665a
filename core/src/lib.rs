pub mod ast;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;
pub mod value;

use std::io::{self, Write};

pub use ast::{Expr, Stmt};
pub use diagnostics::{Diagnostic, Diagnostics, Reporter};
pub use environment::Environment;
pub use error::{ExecError, LexicalError, RuntimeError};
pub use interpreter::Interpreter;
pub use printer::AstPrinter;
pub use token::{Token, TokenKind};
pub use value::Value;

/// How a call to [`run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Ok,
    /// Scanning or parsing reported at least one error; nothing ran.
    SyntaxError,
    /// Execution stopped at a runtime error.
    RuntimeError,
}

/// Forwards to another reporter while counting syntax errors.
struct Tally<'r> {
    inner: &'r mut dyn Reporter,
    syntax_errors: usize,
}

impl Reporter for Tally<'_> {
    fn error(&mut self, line: usize, location: &str, message: &str) {
        self.syntax_errors += 1;
        self.inner.error(line, location, message);
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        self.inner.runtime_error(error);
    }
}

/// Scan and parse `source`.
///
/// Returns `None` when any syntax error was reported. Every error in the
/// source is reported, not only the first.
pub fn compile(source: &str, reporter: &mut dyn Reporter) -> Option<Vec<Stmt>> {
    let mut tally = Tally {
        inner: reporter,
        syntax_errors: 0,
    };

    let tokens = lexer::scan(source, &mut tally);
    let statements = parser::parse(tokens, &mut tally);

    if tally.syntax_errors > 0 {
        tracing::debug!(errors = tally.syntax_errors, "compile failed");
        return None;
    }

    Some(statements.into_iter().flatten().collect())
}

/// Scan, parse and execute `source` against `interpreter`.
///
/// Nothing executes if the source has syntax errors. Bindings persist in the
/// interpreter across calls.
pub fn run<W: Write>(
    source: &str,
    interpreter: &mut Interpreter<W>,
    reporter: &mut dyn Reporter,
) -> io::Result<RunOutcome> {
    let span = tracing::info_span!("run", bytes = source.len());
    let _enter = span.enter();

    match compile(source, reporter) {
        Some(statements) => interpreter.interpret(&statements, reporter),
        None => Ok(RunOutcome::SyntaxError),
    }
}
