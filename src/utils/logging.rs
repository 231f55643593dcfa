// file: src/utils/logging.rs
// description: tracing subscriber setup and terminal status markers

use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber. RUST_LOG wins when set; otherwise
/// `--verbose` turns on debug output for this crate only.
pub fn init_logging(verbose: bool, ansi: bool) {
    let default_filter = if verbose {
        "reg_assistant=debug,info"
    } else {
        "info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_ansi(ansi))
        .init();
}

pub fn status_ok(msg: &str) -> String {
    format!("{} {}", "[ok]".green().bold(), msg)
}

pub fn status_warn(msg: &str) -> String {
    format!("{} {}", "[warn]".yellow().bold(), msg)
}

pub fn status_fail(msg: &str) -> String {
    format!("{} {}", "[fail]".red().bold(), msg)
}
