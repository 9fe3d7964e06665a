use std::io;

use thiserror::Error;

use crate::token::Token;

/// Failures the lexer reports while scanning. None of them stop the scan.
#[derive(Error, Debug, Clone, PartialEq, Default)]
pub enum LexicalError {
    #[default]
    #[error("Unexpected character.")]
    UnexpectedCharacter,

    #[error("Unterminated string.")]
    UnterminatedString,

    #[error("Unterminated comment.")]
    UnterminatedComment,
}

/// An evaluation failure tied to the token that caused it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}\n[line {}]", token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        Self {
            token: token.clone(),
            message: message.into(),
        }
    }
}

/// Anything that can interrupt statement execution.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("Failed to write program output: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
