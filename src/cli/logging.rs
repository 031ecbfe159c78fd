//! Logging utilities for CLI output

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

/// Log a message if the current level permits it
///
/// `Normal` messages print at `Normal` and `Verbose`; `Verbose` messages print
/// only at `Verbose`; nothing prints at `Quiet`.
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if allows(level, required) {
        println!("{msg}");
    }
}

fn allows(level: LogLevel, required: LogLevel) -> bool {
    level != LogLevel::Quiet && (level == required || required == LogLevel::Normal)
}
