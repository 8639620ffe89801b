//! Per-column zone layouts for a whole piece of furniture.

use crate::catalog::Catalog;
use crate::constants::MM_PER_CM;
use crate::models::{ColumnDimensions, ColumnLayout, Family, FurnitureConfig, Template};
use crate::services::master_grid::{align_column, MasterGrid};
use crate::services::zone_layout::layout_column;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

/// Zone layouts of every column, plus the shared grid when the family uses one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FurnitureLayout {
    /// Furniture family
    pub family: Family,
    /// Interior size of each column (mm)
    pub column: ColumnDimensions,
    /// Master grid, present only for families aligned to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<MasterGrid>,
    /// One layout per column, left to right
    pub columns: Vec<ColumnLayout>,
}

/// Lays out every column of `config`.
///
/// `template_ids` names the template of each column from the left; columns
/// without an entry use the first template that fits the column size.
/// Rack-style families are then snapped to their master grid.
///
/// # Errors
///
/// Returns an error if the family has no templates, a named template is
/// unknown or belongs to another family, or no template fits the column.
pub fn layout_furniture(
    catalog: &Catalog,
    config: &FurnitureConfig,
    template_ids: &[String],
) -> Result<FurnitureLayout> {
    let constraints = catalog.family(config.family);
    if catalog.family_templates(config.family).next().is_none() {
        anyhow::bail!("Family '{}' has no column templates", config.family);
    }

    let columns = config.columns.max(1);
    let column = config.dimensions().column_dimensions(columns);
    let column_width_cm = column.width / MM_PER_CM;
    let fallback = catalog
        .templates_for(config.family, column_width_cm, config.height)
        .first()
        .copied();

    let templates = (0..columns as usize)
        .map(|index| match template_ids.get(index) {
            Some(id) => named_template(catalog, config, id, column_width_cm),
            None => fallback.with_context(|| {
                format!(
                    "No {} template fits a {column_width_cm} cm column at {} cm",
                    config.family, config.height
                )
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    let mut layouts = templates
        .iter()
        .map(|template| layout_column(template, column.height, constraints))
        .collect::<Result<Vec<_>>>()?;

    let grid = if config.family.uses_master_grid() {
        let grid = MasterGrid::from_height(column.height);
        layouts = layouts
            .iter()
            .zip(&templates)
            .map(|(layout, template)| align_column(layout, template, &grid, constraints))
            .collect::<Result<Vec<_>>>()?;
        Some(grid)
    } else {
        None
    };

    Ok(FurnitureLayout {
        family: config.family,
        column,
        grid,
        columns: layouts,
    })
}

fn named_template<'a>(
    catalog: &'a Catalog,
    config: &FurnitureConfig,
    id: &str,
    column_width_cm: u32,
) -> Result<&'a Template> {
    let template = catalog
        .template(id)
        .with_context(|| format!("Unknown template '{id}'"))?;
    if template.family != config.family {
        anyhow::bail!(
            "Template '{id}' belongs to {}, not {}",
            template.family,
            config.family
        );
    }
    if !template.fits(column_width_cm, config.height) {
        warn!(
            "Template '{id}' is meant for {}-{} cm columns at {}-{} cm, got {column_width_cm} cm at {} cm",
            template.min_width,
            template.max_width,
            template.min_height,
            template.max_height,
            config.height
        );
    }
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_rack_defaults_to_first_fitting_template() {
        let catalog = Catalog::load().unwrap();
        let config = FurnitureConfig::defaults(catalog.family(Family::Rack));
        let layout = layout_furniture(&catalog, &config, &[]).unwrap();

        assert_eq!(layout.columns.len(), 2);
        assert!(layout.columns.iter().all(|c| c.template_id == "open"));
        assert_eq!(layout.column.height, 1764);
        assert_eq!(
            layout.grid.as_ref().map(|g| g.positions.len()),
            Some(7)
        );
    }

    #[test]
    fn test_rack_columns_share_grid_lines() {
        let catalog = Catalog::load().unwrap();
        let config = FurnitureConfig::defaults(catalog.family(Family::Rack));
        let layout =
            layout_furniture(&catalog, &config, &ids(&["base-drawers", "mixed"])).unwrap();

        let grid = layout.grid.as_ref().unwrap();
        for column in &layout.columns {
            assert_eq!(column.total_height(), 1764);
            for boundary in column.boundaries() {
                assert!(grid.positions.contains(&boundary), "{boundary} off grid");
            }
        }
    }

    #[test]
    fn test_shoe_rack_is_not_grid_aligned() {
        let catalog = Catalog::load().unwrap();
        let config = FurnitureConfig::defaults(catalog.family(Family::ShoeRack));
        let layout = layout_furniture(&catalog, &config, &ids(&["shoe-drawer"])).unwrap();
        assert!(layout.grid.is_none());
        assert_eq!(layout.columns[0].template_id, "shoe-drawer");
        assert_eq!(layout.columns[0].total_height(), 864);
    }

    #[test]
    fn test_template_errors() {
        let catalog = Catalog::load().unwrap();
        let rack = FurnitureConfig::defaults(catalog.family(Family::Rack));
        assert!(layout_furniture(&catalog, &rack, &ids(&["nope"])).is_err());
        assert!(layout_furniture(&catalog, &rack, &ids(&["shoe-open"])).is_err());

        let stand = FurnitureConfig::defaults(catalog.family(Family::Stand));
        assert!(layout_furniture(&catalog, &stand, &[]).is_err());
    }
}
