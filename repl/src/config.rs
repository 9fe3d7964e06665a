use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use crate::cli::Args;

/// Environment variable that overrides the log level chosen by `-v`.
pub const LOG_ENV: &str = "LOX_LOG";

#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub script: Option<PathBuf>,
    pub log_level: Level,
    pub print_ast: bool,
}

impl ReplConfig {
    pub fn from_args(args: &Args) -> Self {
        let env_level = env::var(LOG_ENV).ok();
        Self::resolve(args, env_level.as_deref())
    }

    fn resolve(args: &Args, env_level: Option<&str>) -> Self {
        let log_level = env_level
            .and_then(|value| Level::from_str(value.trim()).ok())
            .unwrap_or_else(|| level_for_verbosity(args.verbose));

        ReplConfig {
            script: args.script.clone(),
            log_level,
            print_ast: args.print_ast,
        }
    }
}

fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
