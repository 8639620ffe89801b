//! Codec commands: decode and re-encode compact column strings.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::parser::{decode_column_configurations, encode_column_configurations};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Decode or re-encode compact column configuration strings
#[derive(Args, Debug)]
pub struct CodecArgs {
    #[command(subcommand)]
    command: CodecCommand,
}

#[derive(Subcommand, Debug)]
enum CodecCommand {
    /// Decode a string and list its columns
    Decode(CodecDecodeArgs),
    /// Print the canonical encoding of a string
    Encode(CodecEncodeArgs),
}

/// Decode a compact string
#[derive(Args, Debug)]
pub struct CodecDecodeArgs {
    /// Compact string, e.g. "D1SL,DR3,D2SR"
    #[arg(value_name = "CODES")]
    input: String,

    /// Exit with an error when any token is skipped
    #[arg(long)]
    strict: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Re-encode a compact string
#[derive(Args, Debug)]
pub struct CodecEncodeArgs {
    /// Compact string to canonicalize
    #[arg(value_name = "CODES")]
    input: String,
}

#[derive(Serialize, Debug)]
struct DecodedColumn {
    code: String,
    #[serde(rename = "type")]
    configuration_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<&'static str>,
    drawers: u32,
    shelves: u32,
    doors: u32,
    hinges: u32,
}

#[derive(Serialize, Debug)]
struct DecodeResponse {
    columns: Vec<DecodedColumn>,
    skipped: Vec<String>,
    encoded: String,
}

impl CodecArgs {
    /// Execute codec subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            CodecCommand::Decode(args) => args.execute(),
            CodecCommand::Encode(args) => args.execute(),
        }
    }
}

impl CodecDecodeArgs {
    /// Execute decode command
    pub fn execute(&self) -> CliResult<()> {
        let settings = load_config()?;
        let report = decode_column_configurations(&self.input);
        let response = DecodeResponse {
            columns: report
                .configurations
                .iter()
                .map(|config| {
                    let meta = config.metadata();
                    DecodedColumn {
                        code: config.code(),
                        configuration_type: config.configuration_type().name(),
                        side: config.door_side().map(|side| side.as_str()),
                        drawers: meta.drawers,
                        shelves: meta.shelves,
                        doors: meta.doors,
                        hinges: meta.hinges,
                    }
                })
                .collect(),
            encoded: encode_column_configurations(&report.configurations),
            skipped: report.skipped,
        };

        if self.json || settings.output.json {
            print_json(&response)?;
        } else {
            for (index, column) in response.columns.iter().enumerate() {
                println!(
                    "{}. {:<5} {}",
                    index + 1,
                    column.code,
                    column.configuration_type
                );
            }
            for token in &response.skipped {
                println!("⚠ skipped '{token}'");
            }
        }

        if self.strict && !response.skipped.is_empty() {
            return Err(CliError::validation(format!(
                "{} unknown token(s): {}",
                response.skipped.len(),
                response.skipped.join(", ")
            )));
        }
        Ok(())
    }
}

impl CodecEncodeArgs {
    /// Execute encode command
    pub fn execute(&self) -> CliResult<()> {
        let report = decode_column_configurations(&self.input);
        println!("{}", encode_column_configurations(&report.configurations));
        Ok(())
    }
}
