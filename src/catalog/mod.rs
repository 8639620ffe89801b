//! Embedded furniture catalog.
//!
//! Family constraint tables and column templates ship inside the binary as
//! JSON and are parsed and checked once at startup. A table that fails the
//! checks is a data defect, so loading refuses it instead of degrading.

use crate::models::{
    ColumnDimensions, ConfigurationType, DimensionConstraint, Family, FamilyConstraints,
    Template, ZoneType,
};
use crate::services::column_count::legal_column_counts;
use crate::services::fallback::is_valid_configuration;
use anyhow::{Context, Result};
use serde::Deserialize;

/// Schema of families.json.
#[derive(Debug, Clone, Deserialize)]
struct FamilyTable {
    #[allow(dead_code)]
    version: String,
    families: Vec<FamilyConstraints>,
}

/// Schema of templates.json.
#[derive(Debug, Clone, Deserialize)]
struct TemplateTable {
    #[allow(dead_code)]
    version: String,
    templates: Vec<Template>,
}

/// Validated family constraints and templates.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// One entry per family, in `Family::ALL` order
    families: Vec<FamilyConstraints>,
    /// Templates in declaration order
    templates: Vec<Template>,
}

impl Catalog {
    /// Loads and validates the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded tables fail to parse or validate.
    ///
    /// # Examples
    ///
    /// ```
    /// use furnicfg::catalog::Catalog;
    /// use furnicfg::models::Family;
    ///
    /// let catalog = Catalog::load().unwrap();
    /// assert_eq!(catalog.family(Family::Rack).columns.default, 2);
    /// assert!(catalog.template("base-drawers").is_some());
    /// ```
    pub fn load() -> Result<Self> {
        Self::from_json(
            include_str!("families.json"),
            include_str!("templates.json"),
        )
    }

    /// Parses and validates catalog tables from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if either document is malformed, a family is missing
    /// or duplicated, or any table check fails.
    pub fn from_json(families_json: &str, templates_json: &str) -> Result<Self> {
        let families: FamilyTable =
            serde_json::from_str(families_json).context("Failed to parse families.json")?;
        let templates: TemplateTable =
            serde_json::from_str(templates_json).context("Failed to parse templates.json")?;

        let mut ordered = Vec::with_capacity(Family::ALL.len());
        for family in Family::ALL {
            let mut matching = families.families.iter().filter(|f| f.family == family);
            let constraints = matching
                .next()
                .with_context(|| format!("Family '{family}' is missing from families.json"))?;
            if matching.next().is_some() {
                anyhow::bail!("Family '{family}' is declared more than once in families.json");
            }
            ordered.push(constraints.clone());
        }

        let catalog = Self {
            families: ordered,
            templates: templates.templates,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Constraint table of a family.
    #[must_use]
    pub fn family(&self, family: Family) -> &FamilyConstraints {
        let index = Family::ALL
            .iter()
            .position(|f| *f == family)
            .unwrap_or_default();
        &self.families[index]
    }

    /// All family tables in `Family::ALL` order.
    #[must_use]
    pub fn families(&self) -> &[FamilyConstraints] {
        &self.families
    }

    /// Template by id.
    #[must_use]
    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates in declaration order.
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Templates of one family.
    pub fn family_templates(&self, family: Family) -> impl Iterator<Item = &Template> {
        self.templates.iter().filter(move |t| t.family == family)
    }

    /// Templates of a family that fit a column `column_width` cm wide in
    /// furniture `height` cm tall, in declaration order.
    #[must_use]
    pub fn templates_for(&self, family: Family, column_width: u32, height: u32) -> Vec<&Template> {
        self.family_templates(family)
            .filter(|t| t.fits(column_width, height))
            .collect()
    }

    /// Checks every table.
    ///
    /// # Errors
    ///
    /// Returns the first defect found.
    pub fn validate(&self) -> Result<()> {
        for constraints in &self.families {
            validate_family(constraints)
                .with_context(|| format!("Invalid constraints for family '{}'", constraints.family))?;
        }
        for template in &self.templates {
            validate_template(template)
                .with_context(|| format!("Invalid template '{}'", template.id))?;
        }
        Ok(())
    }
}

fn validate_dimension(name: &str, constraint: &DimensionConstraint) -> Result<()> {
    if constraint.step == 0 {
        anyhow::bail!("{name}: step must be at least 1");
    }
    if !(constraint.min <= constraint.default && constraint.default <= constraint.max) {
        anyhow::bail!(
            "{name}: default {} outside {}..={}",
            constraint.default,
            constraint.min,
            constraint.max
        );
    }
    if constraint.normalize(constraint.default) != constraint.default {
        anyhow::bail!(
            "{name}: default {} is not a multiple of step {}",
            constraint.default,
            constraint.step
        );
    }
    Ok(())
}

fn validate_family(constraints: &FamilyConstraints) -> Result<()> {
    validate_dimension("width", &constraints.width)?;
    validate_dimension("height", &constraints.height)?;
    validate_dimension("depth", &constraints.depth)?;
    if let Some(plinth) = &constraints.plinth {
        validate_dimension("plinth", plinth)?;
    }

    let columns = constraints.columns;
    if columns.min < 1
        || columns.max > crate::constants::MAX_COLUMNS
        || !columns.contains(columns.default)
    {
        anyhow::bail!(
            "columns: range {}..={} with default {} is not inside 1..=4",
            columns.min,
            columns.max,
            columns.default
        );
    }

    let mut dims = constraints.default_dimensions();
    let mut width = constraints.width.min;
    while width <= constraints.width.max {
        dims.width = width;
        let legal = legal_column_counts(constraints, &dims);
        if !legal.values().any(|ok| *ok) {
            anyhow::bail!("no legal column count at width {width} cm");
        }
        width += constraints.width.step;
    }

    let default_type: ConfigurationType =
        constraints.default_column_configuration.configuration_type();
    let column: ColumnDimensions = constraints
        .default_dimensions()
        .column_dimensions(columns.default);
    if !is_valid_configuration(default_type, &column) {
        anyhow::bail!(
            "default column configuration {} does not fit a {}x{}x{} mm column",
            constraints.default_column_configuration,
            column.width,
            column.height,
            column.depth
        );
    }

    Ok(())
}

fn validate_template(template: &Template) -> Result<()> {
    if template.zones.is_empty() {
        anyhow::bail!("template has no zones");
    }
    let total: u32 = template.zones.iter().map(|z| z.height_proportion).sum();
    if total != 100 {
        anyhow::bail!("zone proportions sum to {total}, expected 100");
    }
    for (index, zone) in template.zones.iter().enumerate() {
        if let (Some(lo), Some(hi)) = (zone.min_shelf_count, zone.max_shelf_count) {
            if lo > hi {
                anyhow::bail!("zone {index}: shelf window {lo}..={hi} is empty");
            }
        }
        if !zone.zone_type.has_shelves()
            && (zone.min_shelf_count.is_some() || zone.max_shelf_count.is_some())
        {
            anyhow::bail!("zone {index}: only shelf zones take a shelf window");
        }
        if zone.zone_type != ZoneType::Empty && zone.height_proportion == 0 {
            anyhow::bail!("zone {index}: zero height proportion");
        }
    }
    for door in &template.doors {
        if door.zone_indices.is_empty() {
            anyhow::bail!("door covers no zones");
        }
        if let Some(index) = door
            .zone_indices
            .iter()
            .find(|index| **index >= template.zones.len())
        {
            anyhow::bail!("door covers zone {index}, which does not exist");
        }
    }
    if template.min_height > template.max_height || template.min_width > template.max_width {
        anyhow::bail!("size bounds are inverted");
    }
    Ok(())
}
