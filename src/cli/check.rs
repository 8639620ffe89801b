//! Check command: load and validate the embedded catalog.

use crate::catalog::Catalog;
use crate::cli::common::{load_config, print_json, CliError, CliResult};
use clap::Args;
use serde::Serialize;

/// Validate the embedded family and template tables
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct FamilySummary {
    family: String,
    columns: String,
    templates: usize,
}

#[derive(Serialize, Debug)]
struct CheckResponse {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    families: Vec<FamilySummary>,
    templates: usize,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> CliResult<()> {
        let settings = load_config()?;
        let json = self.json || settings.output.json;

        let catalog = match Catalog::load() {
            Ok(catalog) => catalog,
            Err(e) => {
                let message = format!("{e:#}");
                if json {
                    print_json(&CheckResponse {
                        valid: false,
                        error: Some(message.clone()),
                        families: Vec::new(),
                        templates: 0,
                    })?;
                }
                return Err(CliError::validation(format!("Catalog check failed: {message}")));
            }
        };

        let response = CheckResponse {
            valid: true,
            error: None,
            families: catalog
                .families()
                .iter()
                .map(|constraints| FamilySummary {
                    family: constraints.family.to_string(),
                    columns: format!("{}-{}", constraints.columns.min, constraints.columns.max),
                    templates: catalog.family_templates(constraints.family).count(),
                })
                .collect(),
            templates: catalog.templates().len(),
        };

        if json {
            print_json(&response)?;
        } else {
            println!("✓ Catalog is valid");
            for family in &response.families {
                println!(
                    "  {:<10} columns {}  templates {}",
                    family.family, family.columns, family.templates
                );
            }
        }
        Ok(())
    }
}
