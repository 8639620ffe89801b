//! Query command: read a shareable link and print its canonical form.

use crate::cli::common::{load_catalog, load_config, print_json, resolve_family, CliError, CliResult};
use crate::models::{ColumnDimensions, FurnitureConfig};
use crate::parser::query::QueryParams;
use crate::parser::{config_to_query, normalize_config, parse_query, parse_query_string, to_query_string};
use crate::services::reconcile_config;
use clap::Args;
use serde::Serialize;

/// Parse, normalize and reconcile a configuration query string
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Query string, with or without the leading '?'
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Furniture family (defaults to the configured one)
    #[arg(short, long, value_name = "FAMILY")]
    pub family: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response of the query command
#[derive(Debug, Serialize)]
struct QueryResponse {
    config: FurnitureConfig,
    column: ColumnDimensions,
    params: QueryParams,
    query: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped_codes: Vec<String>,
}

impl QueryArgs {
    /// Execute the query command
    pub fn execute(&self) -> CliResult<()> {
        let settings = load_config()?;
        let family = resolve_family(self.family.as_deref(), &settings)?;
        let catalog = load_catalog()?;
        let constraints = catalog.family(family);

        let params = parse_query_string(&self.query);
        let parsed = parse_query(&params, constraints);
        let skipped_codes = parsed.skipped;

        let normalized = normalize_config(&parsed.config, constraints);
        let config = reconcile_config(&normalized, constraints)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let canonical = config_to_query(&config, constraints);
        let query = to_query_string(&canonical).map_err(|e| CliError::io(format!("{e:#}")))?;
        let response = QueryResponse {
            column: config.dimensions().column_dimensions(config.columns),
            config,
            params: canonical,
            query,
            skipped_codes,
        };

        if self.json || settings.output.json {
            print_json(&response)?;
        } else {
            print_human(&response);
        }
        Ok(())
    }
}

fn print_human(response: &QueryResponse) {
    let config = &response.config;
    println!("Family:   {}", config.family);
    print!(
        "Size:     {} x {} x {} cm",
        config.width, config.height, config.depth
    );
    match config.plinth_height {
        Some(plinth) => println!(" (plinth {plinth} cm)"),
        None => println!(),
    }
    println!(
        "Columns:  {} ({} x {} mm each)",
        config.columns, response.column.width, response.column.height
    );
    println!("Color:    {}", config.color);
    println!("Opening:  {}", config.opening_type);
    if !config.column_configurations.is_empty() {
        println!("Interior:");
        for (index, column) in config.column_configurations.iter().enumerate() {
            let side = column
                .door_side()
                .map(|side| format!(" (opens {})", side.as_str()))
                .unwrap_or_default();
            println!(
                "  {}. {} {}{side}",
                index + 1,
                column.code(),
                column.configuration_type().name()
            );
        }
    }
    for code in &response.skipped_codes {
        println!("Skipped:  {code}");
    }
    println!();
    println!("?{}", response.query);
}
