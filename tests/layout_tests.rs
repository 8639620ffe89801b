//! Zone layouts and master grid alignment through the public library API.

use furnicfg::catalog::Catalog;
use furnicfg::models::{ColumnLayout, Family, FurnitureConfig, ZoneType};
use furnicfg::services::{layout_column, layout_furniture, MasterGrid};

mod fixtures;
use fixtures::*;

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_every_template_conserves_height() {
    let catalog = catalog();
    for template in catalog.templates() {
        let table = catalog.family(template.family);
        for height_cm in (template.min_height..=template.max_height).step_by(5) {
            let available = height_cm * 10 - 36;
            let layout = layout_column(template, available, table).unwrap();
            assert_eq!(
                layout.total_height(),
                available,
                "{} at {height_cm} cm",
                template.id
            );
            for zone in &layout.zones {
                if let Some(bank) = &zone.drawers {
                    assert_eq!(bank.total_height(), zone.height);
                }
            }
        }
    }
}

/// Heights from the bottom of every boundary that touches a door edge or
/// sits on top of a drawer zone.
fn door_and_drawer_boundaries(catalog: &Catalog, column: &ColumnLayout) -> Vec<u32> {
    let template = catalog.template(&column.template_id).unwrap();
    let heights: Vec<u32> = column.zones.iter().map(|z| z.height).collect();
    (0..heights.len().saturating_sub(1))
        .filter(|&index| {
            template.zones[index + 1].zone_type == ZoneType::Drawers
                || template.doors.iter().any(|door| {
                    door.first() == Some(index + 1) || door.last() == Some(index)
                })
        })
        .map(|index| heights[index + 1..].iter().sum())
        .collect()
}

#[test]
fn test_rack_heights_align_across_columns() {
    let catalog = catalog();
    let rack = catalog.family(Family::Rack);
    for height in [120, 150, 180, 200, 240] {
        let config = FurnitureConfig {
            height,
            width: 100,
            columns: 2,
            ..FurnitureConfig::defaults(rack)
        };
        let layout =
            layout_furniture(&catalog, &config, &ids(&["base-drawers", "base-doors"])).unwrap();
        let grid = layout.grid.as_ref().unwrap();
        assert_eq!(grid.height, layout.column.height);

        for column in &layout.columns {
            assert_eq!(column.total_height(), layout.column.height, "{height} cm");
            for boundary in door_and_drawer_boundaries(&catalog, column) {
                assert!(
                    grid.positions.contains(&boundary),
                    "{} at {height} cm: boundary {boundary} not in {:?}",
                    column.template_id,
                    grid.positions
                );
            }
            for zone in &column.zones {
                if zone.zone_type == ZoneType::Drawers {
                    let bank = zone.drawers.as_ref().unwrap();
                    assert_eq!(bank.total_height(), zone.height);
                }
            }
        }
    }
}

#[test]
fn test_grid_spacing_stays_in_band() {
    for height_cm in (60..=240).step_by(10) {
        let height = height_cm * 10 - 36;
        let grid = MasterGrid::from_height(height);
        assert_eq!(grid.positions.first(), Some(&0));
        assert_eq!(grid.positions.last(), Some(&height));
        assert!(grid.spacing >= 280.0, "{height}: {}", grid.spacing);
    }
}

#[test]
fn test_layout_is_deterministic() {
    let catalog = catalog();
    let config = default_config(Family::Rack);
    let templates = ids(&["mixed", "cabinet"]);
    let first = layout_furniture(&catalog, &config, &templates).unwrap();
    let second = layout_furniture(&catalog, &config, &templates).unwrap();
    assert_eq!(first, second);
}
