//! Collection point for everything the pipeline wants to tell the user.
//!
//! The scanner, parser and interpreter never print. They hand each problem to
//! a [`Reporter`], and the host decides what to do with it. [`Diagnostics`] is
//! the stock implementation: it renders and keeps every message so the caller
//! can inspect whether a pass failed.

use std::fmt;

use crate::error::RuntimeError;
use crate::token::Token;

pub trait Reporter {
    /// Report a scan or parse error. `location` is already formatted.
    fn error(&mut self, line: usize, location: &str, message: &str);

    fn runtime_error(&mut self, error: &RuntimeError);

    /// Report a parse error at `token`.
    fn token_error(&mut self, token: &Token, message: &str) {
        if token.is_eof() {
            self.error(token.line, "at end", message);
        } else {
            let location = format!(" at '{}'", token.lexeme);
            self.error(token.line, &location, message);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    Syntax {
        line: usize,
        location: String,
        message: String,
    },
    Runtime {
        line: usize,
        message: String,
    },
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::Syntax { line, .. } | Diagnostic::Runtime { line, .. } => *line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Syntax {
                line,
                location,
                message,
            } => write!(f, "[{}]: Error {}: {}", line, location, message),
            Diagnostic::Runtime { line, message } => write!(f, "{}\n[line {}]", message, line),
        }
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        self.entries
            .iter()
            .any(|d| matches!(d, Diagnostic::Syntax { .. }))
    }

    pub fn had_runtime_error(&self) -> bool {
        self.entries
            .iter()
            .any(|d| matches!(d, Diagnostic::Runtime { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Rendered text of every diagnostic, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Diagnostic> {
        self.entries.drain(..)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Reporter for Diagnostics {
    fn error(&mut self, line: usize, location: &str, message: &str) {
        tracing::debug!(line, location, reason = message, "syntax error reported");
        self.entries.push(Diagnostic::Syntax {
            line,
            location: location.to_string(),
            message: message.to_string(),
        });
    }

    fn runtime_error(&mut self, error: &RuntimeError) {
        tracing::debug!(line = error.token.line, reason = %error.message, "runtime error reported");
        self.entries.push(Diagnostic::Runtime {
            line: error.token.line,
            message: error.message.clone(),
        });
    }
}
