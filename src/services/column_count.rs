//! Column-count validation.
//!
//! A column count is legal when the resulting per-column width fits the
//! family's band for that count AND the family's total-width rule (if any)
//! allows it. Both checks must pass.

use crate::constants::MAX_COLUMNS;
use crate::models::{Dimensions, FamilyConstraints};
use anyhow::Result;
use std::collections::BTreeMap;
use tracing::debug;

/// Legality of column counts 1..=4, keyed by count.
pub type ColumnCountMap = BTreeMap<u32, bool>;

/// Returns true if the per-column width for `columns` lies in the family's band.
#[must_use]
pub fn fits_width_band(constraints: &FamilyConstraints, dims: &Dimensions, columns: u32) -> bool {
    if columns == 0 {
        return false;
    }
    let column_width = f64::from(dims.width) / f64::from(columns);
    constraints
        .width_band(columns)
        .is_some_and(|band| band.contains(column_width))
}

/// Returns true if the family's total-width rule allows `columns`.
#[must_use]
pub fn passes_width_rule(constraints: &FamilyConstraints, dims: &Dimensions, columns: u32) -> bool {
    constraints
        .width_rule
        .map_or(true, |rule| rule.allows(columns, dims.width))
}

/// Returns true if `columns` is a legal count for these dimensions.
#[must_use]
pub fn is_legal_column_count(
    constraints: &FamilyConstraints,
    dims: &Dimensions,
    columns: u32,
) -> bool {
    constraints.columns.contains(columns)
        && fits_width_band(constraints, dims, columns)
        && passes_width_rule(constraints, dims, columns)
}

/// Computes which of the counts 1..=4 are legal.
#[must_use]
pub fn legal_column_counts(constraints: &FamilyConstraints, dims: &Dimensions) -> ColumnCountMap {
    (1..=MAX_COLUMNS)
        .map(|count| (count, is_legal_column_count(constraints, dims, count)))
        .collect()
}

/// Preference order used when the current count may have become illegal:
/// current, current - 1, current + 1, then ascending from 1.
#[must_use]
pub fn preference_order(current: u32) -> Vec<u32> {
    let mut order = Vec::with_capacity(MAX_COLUMNS as usize + 3);
    let candidates = [Some(current), current.checked_sub(1), current.checked_add(1)]
        .into_iter()
        .flatten()
        .chain(1..=MAX_COLUMNS);

    for count in candidates {
        if (1..=MAX_COLUMNS).contains(&count) && !order.contains(&count) {
            order.push(count);
        }
    }
    order
}

/// Picks the first legal count from `preference_order(preferred)`.
///
/// # Errors
///
/// Returns an error if no count is legal. That means the family table is
/// incoherent for these dimensions and has to be fixed in the catalog.
pub fn select_column_count(
    constraints: &FamilyConstraints,
    dims: &Dimensions,
    preferred: u32,
) -> Result<u32> {
    let legal = legal_column_counts(constraints, dims);

    for count in preference_order(preferred) {
        if legal.get(&count).copied().unwrap_or(false) {
            if count != preferred {
                debug!(
                    family = %constraints.family,
                    preferred,
                    selected = count,
                    width = dims.width,
                    "column count replaced"
                );
            }
            return Ok(count);
        }
    }

    anyhow::bail!(
        "No legal column count for {} at width {} cm (height {}, depth {}); the family constraint table is incoherent",
        constraints.family,
        dims.width,
        dims.height,
        dims.depth
    )
}
