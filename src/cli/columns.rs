//! Columns command: which column counts fit the given dimensions.

use crate::cli::common::{load_catalog, load_config, print_json, resolve_family, CliError, CliResult};
use crate::models::{Dimensions, Family};
use crate::services::{legal_column_counts, select_column_count, ColumnCountMap};
use clap::Args;
use serde::Serialize;

/// Show legal column counts for a set of dimensions
#[derive(Debug, Clone, Args)]
pub struct ColumnsArgs {
    /// Furniture family (defaults to the configured one)
    #[arg(short, long, value_name = "FAMILY")]
    pub family: Option<String>,

    /// Total width in cm
    #[arg(long)]
    pub width: u32,

    /// Total height in cm (family default when omitted)
    #[arg(long)]
    pub height: Option<u32>,

    /// Depth in cm (family default when omitted)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Plinth height in cm (families with a plinth only)
    #[arg(long)]
    pub plinth: Option<u32>,

    /// Preferred column count (family default when omitted)
    #[arg(short, long)]
    pub preferred: Option<u32>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response of the columns command
#[derive(Debug, Serialize)]
struct ColumnsResponse {
    family: Family,
    dimensions: Dimensions,
    legal: ColumnCountMap,
    preferred: u32,
    selected: u32,
}

impl ColumnsArgs {
    /// Execute the columns command
    pub fn execute(&self) -> CliResult<()> {
        let settings = load_config()?;
        let family = resolve_family(self.family.as_deref(), &settings)?;
        let catalog = load_catalog()?;
        let constraints = catalog.family(family);

        if self.plinth.is_some() && constraints.plinth.is_none() {
            return Err(CliError::validation(format!(
                "Family '{family}' has no adjustable plinth"
            )));
        }

        let defaults = constraints.default_dimensions();
        let dimensions = Dimensions::new(
            self.width,
            self.height.unwrap_or(defaults.height),
            self.depth.unwrap_or(defaults.depth),
            self.plinth.unwrap_or(defaults.plinth),
        );
        let preferred = self.preferred.unwrap_or(constraints.columns.default);
        let legal = legal_column_counts(constraints, &dimensions);
        let selected = select_column_count(constraints, &dimensions, preferred)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let response = ColumnsResponse {
            family,
            dimensions,
            legal,
            preferred,
            selected,
        };

        if self.json || settings.output.json {
            print_json(&response)?;
        } else {
            println!(
                "{} at {} cm wide:",
                response.family, response.dimensions.width
            );
            for (count, ok) in &response.legal {
                let mark = if *ok { "✓" } else { "✗" };
                println!("  {mark} {count} column(s)");
            }
            println!("Selected: {} (preferred {})", response.selected, response.preferred);
        }
        Ok(())
    }
}
