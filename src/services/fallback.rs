//! Configuration fallback resolution.
//!
//! When new column dimensions invalidate a stored configuration, the
//! nearest still-valid type along `ConfigurationType::ALL` replaces it.
//! Nearness is the index distance in that order; equal distances try the
//! lower index first, so the result only depends on the inputs.

use crate::models::{
    ColumnConfiguration, ColumnDimensions, ConfigurationType, DoorSide, FamilyConstraints,
};
use tracing::{debug, error};

/// Drawer columns: accepted width range (mm).
const DRAWER_WIDTH_MM: (u32, u32) = (300, 1000);
/// Drawer columns: shallowest accepted depth (mm).
const DRAWER_MIN_DEPTH_MM: u32 = 300;
/// Drawer columns: accepted height per drawer (mm).
const DRAWER_FRONT_MM: (u32, u32) = (100, 450);
/// Single-door columns: accepted width range (mm).
const SINGLE_DOOR_WIDTH_MM: (u32, u32) = (250, 600);
/// Split-door columns: accepted width range (mm).
const SPLIT_DOOR_WIDTH_MM: (u32, u32) = (500, 1200);
/// Door columns: smallest compartment between shelves (mm).
const DOOR_MIN_COMPARTMENT_MM: u32 = 150;

/// Returns true if `ty` physically fits a column of the given size.
#[must_use]
pub fn is_valid_configuration(ty: ConfigurationType, column: &ColumnDimensions) -> bool {
    let meta = ty.metadata();
    let within = |value: u32, (lo, hi): (u32, u32)| value >= lo && value <= hi;

    match meta.doors {
        0 => {
            within(column.width, DRAWER_WIDTH_MM)
                && column.depth >= DRAWER_MIN_DEPTH_MM
                && within(column.height / meta.drawers.max(1), DRAWER_FRONT_MM)
        }
        1 => {
            within(column.width, SINGLE_DOOR_WIDTH_MM)
                && column.height / (meta.shelves + 1) >= DOOR_MIN_COMPARTMENT_MM
        }
        _ => {
            within(column.width, SPLIT_DOOR_WIDTH_MM)
                && column.height / (meta.shelves + 1) >= DOOR_MIN_COMPARTMENT_MM
        }
    }
}

/// Every type ordered by distance from `current`, `current` first.
///
/// # Examples
///
/// ```
/// use furnicfg::models::ConfigurationType as T;
/// use furnicfg::services::fallback::fallback_candidates;
///
/// let order = fallback_candidates(T::Drawers3);
/// assert_eq!(&order[..5], &[T::Drawers3, T::Drawers2, T::Drawers4, T::Drawers1, T::Drawers5]);
/// ```
#[must_use]
pub fn fallback_candidates(current: ConfigurationType) -> Vec<ConfigurationType> {
    let origin = current.ordinal();
    let mut order = ConfigurationType::ALL.to_vec();
    order.sort_by_key(|ty| (ty.ordinal().abs_diff(origin), ty.ordinal()));
    order
}

/// Returns `current` when it is valid, otherwise its nearest valid replacement.
///
/// A single-door replacement keeps the previous opening side when the
/// previous configuration had one, else opens left. When no type is valid
/// the original is returned unchanged and an error is logged; catalog
/// validation keeps that from happening at family defaults.
#[must_use]
pub fn resolve_configuration(
    current: ColumnConfiguration,
    column: &ColumnDimensions,
) -> ColumnConfiguration {
    let current_type = current.configuration_type();
    if is_valid_configuration(current_type, column) {
        return current;
    }

    let side = current.door_side().unwrap_or(DoorSide::Left);
    let Some(replacement) = fallback_candidates(current_type)
        .into_iter()
        .find(|ty| is_valid_configuration(*ty, column))
    else {
        error!(
            "No configuration type fits a {}x{}x{} mm column; keeping {}",
            column.width, column.height, column.depth, current
        );
        return current;
    };

    let resolved = replacement.with_side(side);
    debug!(
        "Replaced {} with {} for a {}x{}x{} mm column",
        current, resolved, column.width, column.height, column.depth
    );
    resolved
}

/// Resolves every entry of a configuration array against one column size.
#[must_use]
pub fn resolve_column_configurations(
    configurations: &[ColumnConfiguration],
    column: &ColumnDimensions,
) -> Vec<ColumnConfiguration> {
    configurations
        .iter()
        .map(|config| resolve_configuration(*config, column))
        .collect()
}

/// Matches a configuration array to `columns` entries.
///
/// An empty array stays empty (renderer defaults). A shorter array grows
/// with the family default configuration; a longer one is truncated.
#[must_use]
pub fn fit_array_length(
    configurations: &[ColumnConfiguration],
    columns: u32,
    constraints: &FamilyConstraints,
) -> Vec<ColumnConfiguration> {
    if configurations.is_empty() {
        return Vec::new();
    }
    let wanted = columns as usize;
    let mut fitted: Vec<ColumnConfiguration> =
        configurations.iter().copied().take(wanted).collect();
    if fitted.len() < configurations.len() {
        debug!(
            "Truncated column configurations from {} to {wanted}",
            configurations.len()
        );
    }
    while fitted.len() < wanted {
        fitted.push(constraints.default_column_configuration);
    }
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{Family, ItemCount};

    use ConfigurationType as T;

    fn column(width: u32, height: u32, depth: u32) -> ColumnDimensions {
        ColumnDimensions::new(width, height, depth)
    }

    #[test]
    fn test_validity_predicate() {
        let c = column(500, 744, 450);
        assert!(is_valid_configuration(T::Door1Shelf, &c));
        assert!(is_valid_configuration(T::Drawers3, &c));
        assert!(is_valid_configuration(T::Door2Shelves, &c));
        // 744 / 5 = 148 < 150
        assert!(!is_valid_configuration(T::Door4Shelves, &c));
        // split doors need 500 mm
        assert!(is_valid_configuration(T::DoorSplit1Shelf, &c));
        assert!(!is_valid_configuration(T::DoorSplit1Shelf, &column(499, 744, 450)));
        // drawers need depth
        assert!(!is_valid_configuration(T::Drawers3, &column(500, 744, 250)));
    }

    #[test]
    fn test_candidate_order() {
        let order = fallback_candidates(T::Door1Shelf);
        assert_eq!(
            &order[..5],
            &[T::Door1Shelf, T::Drawers5, T::Door2Shelves, T::Drawers4, T::Door3Shelves]
        );
        assert_eq!(order.len(), ConfigurationType::ALL.len());

        let order = fallback_candidates(T::Drawers1);
        assert_eq!(order, ConfigurationType::ALL.to_vec());
    }

    #[test]
    fn test_valid_configuration_is_kept() {
        let config = T::Door2Shelves.with_side(DoorSide::Right);
        assert_eq!(resolve_configuration(config, &column(500, 744, 450)), config);
    }

    #[test]
    fn test_single_door_keeps_side() {
        // 744 / 5 = 148: D4S is too cramped, D3S (744 / 4 = 186) fits
        let config = T::Door4Shelves.with_side(DoorSide::Right);
        let resolved = resolve_configuration(config, &column(500, 744, 450));
        assert_eq!(
            resolved,
            ColumnConfiguration::Door {
                shelves: ItemCount::Three,
                side: DoorSide::Right
            }
        );
    }

    #[test]
    fn test_replacement_gets_left_side_by_default() {
        // Too narrow for drawers and split doors, a single door fits
        let config = ColumnConfiguration::Drawers(ItemCount::Five);
        let resolved = resolve_configuration(config, &column(280, 744, 450));
        assert_eq!(
            resolved,
            ColumnConfiguration::Door {
                shelves: ItemCount::One,
                side: DoorSide::Left
            }
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let narrow = column(450, 1764, 350);
        let config = T::DoorSplit3Shelves.with_side(DoorSide::Left);
        let first = resolve_configuration(config, &narrow);
        let second = resolve_configuration(config, &narrow);
        assert_eq!(first, second);
        // DD3S → DD2S/DD4S → DD1S/DD5S are too narrow; D5S is next
        assert_eq!(first.configuration_type(), T::Door5Shelves);
    }

    #[test]
    fn test_nothing_valid_keeps_original() {
        let config = ColumnConfiguration::Drawers(ItemCount::Two);
        assert_eq!(resolve_configuration(config, &column(100, 100, 100)), config);
    }

    #[test]
    fn test_fit_array_length() {
        let catalog = Catalog::load().unwrap();
        let stand = catalog.family(Family::Stand);
        let dr3 = ColumnConfiguration::Drawers(ItemCount::Three);

        assert!(fit_array_length(&[], 3, stand).is_empty());
        assert_eq!(fit_array_length(&[dr3, dr3, dr3], 2, stand), vec![dr3, dr3]);
        assert_eq!(
            fit_array_length(&[dr3], 3, stand),
            vec![
                dr3,
                stand.default_column_configuration,
                stand.default_column_configuration
            ]
        );
    }

    #[test]
    fn test_resolve_array() {
        let configs = [
            T::Door1Shelf.with_side(DoorSide::Left),
            T::Drawers3.with_side(DoorSide::Left),
        ];
        let resolved = resolve_column_configurations(&configs, &column(500, 744, 450));
        assert_eq!(resolved, configs.to_vec());
    }
}
