//! Reconciliation of a normalized configuration with the family rules.

use crate::models::{FamilyConstraints, FurnitureConfig};
use crate::services::column_count::select_column_count;
use crate::services::fallback::{fit_array_length, resolve_column_configurations};
use anyhow::Result;

/// Makes a normalized configuration buildable.
///
/// The column count is replaced by the nearest legal one, the column
/// configuration array is fitted to that count and every entry that no
/// longer fits its column is swapped for its nearest valid neighbour.
/// An empty array stays empty.
///
/// # Errors
///
/// Returns an error if no column count is legal for the dimensions.
pub fn reconcile_config(
    config: &FurnitureConfig,
    constraints: &FamilyConstraints,
) -> Result<FurnitureConfig> {
    let dims = config.dimensions();
    let columns = select_column_count(constraints, &dims, config.columns)?;
    let fitted = fit_array_length(&config.column_configurations, columns, constraints);
    let column = dims.column_dimensions(columns);

    Ok(FurnitureConfig {
        columns,
        column_configurations: resolve_column_configurations(&fitted, &column),
        ..config.clone()
    })
}
