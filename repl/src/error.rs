use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a malformed command line.
pub const EX_USAGE: u8 = 64;
/// Exit code when the script has syntax errors.
pub const EX_DATAERR: u8 = 65;
/// Exit code when the script stopped at a runtime error.
pub const EX_SOFTWARE: u8 = 70;
/// Exit code when the script could not be read or output could not be written.
pub const EX_IOERR: u8 = 74;

#[derive(Error, Debug)]
pub enum ReplError {
    #[error("Could not read '{}': {source}", path.display())]
    ReadScript {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl ReplError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ReplError::ReadScript { .. } | ReplError::Output(_) => EX_IOERR,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReplError>;
