//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::Family;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default furniture family
    #[arg(long, value_name = "FAMILY")]
    family: Option<String>,

    /// Print JSON by default (true or false)
    #[arg(long, value_name = "BOOL")]
    json: Option<bool>,

    /// Default log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    path: String,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        let path = Config::config_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        if self.json {
            print_json(&ConfigOutput {
                path,
                config: &config,
            })?;
        } else {
            output_human_readable(&config, &path);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.family.is_none() && self.json.is_none() && self.log_level.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --family, --json, or --log-level",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

        if let Some(family) = &self.family {
            config.defaults.family = family
                .parse::<Family>()
                .map_err(|e| CliError::validation(format!("{e}")))?;
        }

        if let Some(json) = self.json {
            config.output.json = json;
        }

        if let Some(level) = &self.log_level {
            config
                .set_log_level(level)
                .map_err(|e| CliError::validation(format!("{e}")))?;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, path: &str) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!("File: {path}");
    println!();

    println!("Defaults:");
    println!("  Family: {}", config.defaults.family);
    println!();

    println!("Output:");
    println!("  JSON: {}", config.output.json);
    println!();

    println!("Logging:");
    println!("  Level: {}", config.logging.level);
}
