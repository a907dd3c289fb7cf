//! Logger setup
//!
//! Verbosity picks the base level; `RUST_LOG` can refine it per module.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Where log records go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    /// Logging disabled (the TUI owns the terminal)
    Off,
}

/// Base level for a `-v` count
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a logger is already set.
pub fn init(verbosity: u8, sink: LogSink<'_>) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    if sink == LogSink::Off {
        builder.filter_level(LevelFilter::Off);
        return builder.try_init().context("Failed to install logger");
    }

    builder.filter_level(level_for_verbosity(verbosity));
    builder.parse_env("RUST_LOG");
    builder.format(|fmt, record| {
        let ts = fmt.timestamp_seconds();
        writeln!(
            fmt,
            "{} [{}] {}: {}",
            ts,
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let LogSink::File(path) = sink {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to install logger")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(3), LevelFilter::Trace);
        assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
    }
}
