//! Layout command: zone layout of every column.

use crate::cli::common::{load_catalog, load_config, print_json, resolve_family, CliError, CliResult};
use crate::models::{FurnitureConfig, Zone, ZoneType};
use crate::parser::normalize_config;
use crate::services::{layout_furniture, reconcile_config, FurnitureLayout};
use clap::Args;

/// Compute zone layouts for a rack-style piece of furniture
#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Furniture family (defaults to the configured one)
    #[arg(short, long, value_name = "FAMILY")]
    pub family: Option<String>,

    /// Total width in cm (family default when omitted)
    #[arg(long)]
    pub width: Option<u32>,

    /// Total height in cm (family default when omitted)
    #[arg(long)]
    pub height: Option<u32>,

    /// Depth in cm (family default when omitted)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Column count (family default when omitted)
    #[arg(short, long)]
    pub columns: Option<u32>,

    /// Template per column, left to right (comma-separated)
    #[arg(short, long, value_delimiter = ',', value_name = "ID")]
    pub templates: Vec<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl LayoutArgs {
    /// Execute the layout command
    pub fn execute(&self) -> CliResult<()> {
        let settings = load_config()?;
        let family = resolve_family(self.family.as_deref(), &settings)?;
        let catalog = load_catalog()?;
        let constraints = catalog.family(family);

        let defaults = FurnitureConfig::defaults(constraints);
        let requested = FurnitureConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            depth: self.depth.unwrap_or(defaults.depth),
            columns: self.columns.unwrap_or(defaults.columns),
            ..defaults
        };
        let config = reconcile_config(&normalize_config(&requested, constraints), constraints)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let layout = layout_furniture(&catalog, &config, &self.templates)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        if self.json || settings.output.json {
            print_json(&layout)?;
        } else {
            print_human(&config, &layout);
        }
        Ok(())
    }
}

fn describe_zone(zone: &Zone) -> String {
    let kind = match zone.zone_type {
        ZoneType::Shelves => "shelves",
        ZoneType::ShelvesFixed => "fixed shelves",
        ZoneType::Drawers => "drawers",
        ZoneType::Empty => "open",
    };
    let mut text = format!("{:>5} mm  {kind}", zone.height);
    if let (Some(count), Some(spacing)) = (zone.shelf_count, zone.shelf_spacing) {
        text.push_str(&format!(": {count} shelf/shelves every {spacing} mm"));
    }
    if let Some(bank) = &zone.drawers {
        let fronts: Vec<String> = bank.heights.iter().map(ToString::to_string).collect();
        text.push_str(&format!(": {} drawer(s) [{}] mm", bank.count(), fronts.join(", ")));
    }
    if let Some(door) = zone.door {
        text.push_str(&format!(" behind {} door", door.as_str()));
    }
    text
}

fn print_human(config: &FurnitureConfig, layout: &FurnitureLayout) {
    println!(
        "{}: {} x {} x {} cm, {} column(s) of {} x {} mm",
        config.family,
        config.width,
        config.height,
        config.depth,
        config.columns,
        layout.column.width,
        layout.column.height
    );
    if let Some(grid) = &layout.grid {
        let lines: Vec<String> = grid.positions.iter().map(ToString::to_string).collect();
        println!("Grid ({:.1} mm): {}", grid.spacing, lines.join(", "));
    }
    for (index, column) in layout.columns.iter().enumerate() {
        println!();
        println!("Column {} ({})", index + 1, column.template_id);
        for zone in &column.zones {
            println!("  {}", describe_zone(zone));
        }
    }
}
