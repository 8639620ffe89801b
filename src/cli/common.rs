//! Shared plumbing for CLI commands: errors, exit codes and output helpers.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::Family;
use serde::Serialize;
use std::fmt;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or a failed check
    Validation = 1,
    /// File system, configuration or catalog failure
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process ends with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input or failed check (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O or configuration failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Numeric exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the embedded catalog, mapping failures to exit code 2.
pub fn load_catalog() -> CliResult<Catalog> {
    Catalog::load().map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))
}

/// Loads the user configuration, mapping failures to exit code 2.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))
}

/// Parses a `--family` value, falling back to the configured default.
pub fn resolve_family(family: Option<&str>, config: &Config) -> CliResult<Family> {
    match family {
        Some(name) => name
            .parse()
            .map_err(|e| CliError::validation(format!("{e}"))),
        None => Ok(config.defaults.family),
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
