//! Logging initialization.
//!
//! Diagnostics go to stderr through `tracing`; stdout carries only command
//! results, so output stays pipeable while the batch progress bar and log
//! lines share the terminal.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `verbose` - DEBUG instead of INFO, and module targets on each line.
/// * `json_format` - One JSON object per event for log collectors.
///
/// # Notes
///
/// - `RUST_LOG` overrides the level chosen here
/// - Colors are only emitted when stderr is a terminal
pub fn init(verbose: bool, json_format: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json_format {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(verbose)
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal()),
            )
            .init();
    }
}
