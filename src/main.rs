//! Furniture Configurator - command-line front end of the layout engine
//!
//! Reads shareable configuration links, reports legal column counts,
//! computes zone layouts and inspects the compact column codec.

use clap::{Parser, Subcommand};
use furnicfg::cli::{
    CheckArgs, CliResult, CodecArgs, ColumnsArgs, ConfigArgs, LayoutArgs, QueryArgs,
};
use furnicfg::config::Config;
use furnicfg::constants::APP_BINARY_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Furniture Configurator - constraint engine for configurable furniture
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse, normalize and reconcile a configuration query string
    Query(QueryArgs),
    /// Show legal column counts for a set of dimensions
    Columns(ColumnsArgs),
    /// Compute zone layouts for a rack-style piece of furniture
    Layout(LayoutArgs),
    /// Decode or re-encode compact column configuration strings
    Codec(CodecArgs),
    /// Validate the embedded family and template tables
    Check(CheckArgs),
    /// Show or change the application configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Query(args) => args.execute(),
            Self::Columns(args) => args.execute(),
            Self::Layout(args) => args.execute(),
            Self::Codec(args) => args.execute(),
            Self::Check(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        Config::load().unwrap_or_default().logging.level
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
