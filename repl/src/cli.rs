use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for the Lox scripting language", long_about = None)]
pub struct Args {
    /// Script to run. Without one an interactive session starts.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the syntax tree of each statement before running it.
    #[arg(long = "print-ast")]
    pub print_ast: bool,
}
