mod cli;
mod config;
mod error;
mod repl;

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use lox_core::{Diagnostics, Interpreter, RunOutcome};

use crate::cli::Args;
use crate::config::ReplConfig;
use crate::error::{EX_DATAERR, EX_SOFTWARE, EX_USAGE, ReplError, Result};
use crate::repl::{Repl, execute, flush_diagnostics};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EX_USAGE,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let config = ReplConfig::from_args(&args);
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match &config.script {
        Some(path) => match run_file(path, &config) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::from(e.exit_code())
            }
        },
        None => match Repl::new(&config).run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_file(path: &Path, config: &ReplConfig) -> Result<ExitCode> {
    tracing::info!(path = %path.display(), "running script");

    let source = fs::read_to_string(path).map_err(|source| ReplError::ReadScript {
        path: path.to_path_buf(),
        source,
    })?;

    let mut interpreter = Interpreter::new();
    let mut diagnostics = Diagnostics::new();
    let outcome = execute(&source, &mut interpreter, &mut diagnostics, config.print_ast)?;
    flush_diagnostics(&mut diagnostics);

    Ok(match outcome {
        RunOutcome::Ok => ExitCode::SUCCESS,
        RunOutcome::SyntaxError => ExitCode::from(EX_DATAERR),
        RunOutcome::RuntimeError => ExitCode::from(EX_SOFTWARE),
    })
}
