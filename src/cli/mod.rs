//! CLI command handlers.
//!
//! One module per subcommand. Every handler returns `CliResult`, and
//! `main` turns a `CliError` into its exit code.

pub mod check;
pub mod codec;
pub mod columns;
pub mod common;
pub mod config;
pub mod layout;
pub mod query;

// Re-export types used by main.rs and tests
pub use check::CheckArgs;
pub use codec::CodecArgs;
pub use columns::ColumnsArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use layout::LayoutArgs;
pub use query::QueryArgs;
