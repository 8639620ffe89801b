//! Zone layout calculation.
//!
//! Turns a template into concrete zones for a given interior height:
//! proportional zone heights with an exact integer sum, shelf counts that
//! respect the family spacing band, and drawer banks whose fronts add up
//! to the zone height.

use crate::models::{
    ColumnLayout, DoorKind, DrawerBank, FamilyConstraints, SpacingRule, Template, Zone,
    ZoneTemplate, ZoneType,
};
use anyhow::Result;

/// Gap between two drawer fronts (mm).
pub const DRAWER_GAP_MM: u32 = 3;

/// Space below the last drawer front (mm).
pub const DRAWER_BOTTOM_MARGIN_MM: u32 = 5;

/// Top shelf reserved above a drawer bank that sits behind a door (mm).
pub const DRAWER_TOP_SHELF_MM: u32 = 18;

/// How far the last drawer front overlaps the bottom margin (mm).
pub const DRAWER_FRONT_OVERLAP_MM: u32 = 2;

/// Most drawers a single zone can hold.
pub const MAX_DRAWERS_PER_ZONE: u32 = 6;

/// Shelf count and spacing chosen for one shelf zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfPlan {
    /// Number of shelves
    pub count: u32,
    /// Distance between shelves (floor of `height / (count + 1)`)
    pub spacing: u32,
}

/// Number of spaces (shelves + 1) that best divides `height` under `rule`.
///
/// Legal counts are the ones whose spacing lands inside `[min, max]`; the
/// one nearest `height / optimal` wins, ties going to fewer spaces. With no
/// legal count, the search widens to `height / max` (fewer, wider spaces)
/// and then to `height / min`.
#[must_use]
pub fn space_count(height: u32, rule: SpacingRule) -> u32 {
    let h = u64::from(height);
    let min = u64::from(rule.min.max(1));
    let max = u64::from(rule.max.max(rule.min).max(1));

    let lo = h.div_ceil(max).max(1);
    let hi = h / min;
    if lo <= hi {
        let target = h as f64 / f64::from(rule.optimal.max(1));
        let nearest = (target - 0.5).ceil().max(1.0) as u64;
        return nearest.clamp(lo, hi) as u32;
    }

    let spread = h / max;
    if spread >= 1 {
        spread as u32
    } else {
        h.div_ceil(min).max(1) as u32
    }
}

/// Plans the shelves of a zone.
///
/// `window` is the template's `[min_shelf_count, max_shelf_count]`; when
/// present it overrides the searched count before spacing is derived.
#[must_use]
pub fn plan_shelves(height: u32, rule: SpacingRule, window: Option<(u32, u32)>) -> ShelfPlan {
    let mut count = space_count(height, rule) - 1;
    if let Some((lo, hi)) = window {
        count = count.min(hi).max(lo);
    }
    ShelfPlan {
        count,
        spacing: height / (count + 1),
    }
}

fn drawer_usable_height(height: u32, top_reserve: u32, count: u32) -> i64 {
    i64::from(height)
        - i64::from(DRAWER_BOTTOM_MARGIN_MM)
        - i64::from(top_reserve)
        - i64::from(DRAWER_GAP_MM) * i64::from(count - 1)
}

/// Plans a drawer bank filling a zone of `height`.
///
/// Every drawer but the last gets the floor-rounded average front height;
/// the last absorbs the remainder plus `DRAWER_FRONT_OVERLAP_MM`.
#[must_use]
pub fn plan_drawers(height: u32, rule: SpacingRule, under_door: bool) -> DrawerBank {
    let top_reserve = if under_door { DRAWER_TOP_SHELF_MM } else { 0 };
    let average = |count: u32| drawer_usable_height(height, top_reserve, count).max(0) / i64::from(count);

    let mut best: Option<(u32, i64)> = None;
    for count in 1..=MAX_DRAWERS_PER_ZONE {
        let avg = average(count);
        if avg < i64::from(rule.min) || avg > i64::from(rule.max) {
            continue;
        }
        let distance = (avg - i64::from(rule.optimal)).abs();
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((count, distance));
        }
    }

    let count = best.map_or_else(
        || (height / rule.max.max(1)).clamp(1, MAX_DRAWERS_PER_ZONE),
        |(count, _)| count,
    );

    let usable = drawer_usable_height(height, top_reserve, count).max(0) as u32;
    let avg = usable / count;
    let mut heights = vec![avg; (count - 1) as usize];
    heights.push(usable - avg * (count - 1) + DRAWER_FRONT_OVERLAP_MM);

    DrawerBank {
        heights,
        gap: DRAWER_GAP_MM,
        bottom_margin: DRAWER_BOTTOM_MARGIN_MM - DRAWER_FRONT_OVERLAP_MM,
        top_reserve,
    }
}

/// Zone heights for a template at `available` interior height.
///
/// Each zone gets `round(available * proportion / 100)`; the rounding
/// residual goes to the tallest zone without a door (or the tallest zone
/// overall when every zone is behind a door), so the sum is exact.
#[must_use]
pub fn zone_heights(template: &Template, available: u32) -> Vec<u32> {
    let mut heights: Vec<i64> = template
        .zones
        .iter()
        .map(|zone| {
            let scaled = u64::from(available) * u64::from(zone.height_proportion);
            ((scaled + 50) / 100) as i64
        })
        .collect();

    let residual = i64::from(available) - heights.iter().sum::<i64>();
    if residual != 0 {
        if let Some(target) = residual_target(template, &heights) {
            heights[target] = (heights[target] + residual).max(0);
        }
    }

    heights.into_iter().map(|h| h as u32).collect()
}

fn residual_target(template: &Template, heights: &[i64]) -> Option<usize> {
    let tallest = |candidates: &mut dyn Iterator<Item = usize>| {
        candidates.fold(None, |best: Option<usize>, idx| match best {
            Some(b) if heights[b] >= heights[idx] => Some(b),
            _ => Some(idx),
        })
    };

    tallest(&mut (0..heights.len()).filter(|idx| !template.is_door_covered(*idx)))
        .or_else(|| tallest(&mut (0..heights.len())))
}

/// Builds one concrete zone of the given height.
#[must_use]
pub fn build_zone(
    zone_template: &ZoneTemplate,
    height: u32,
    door: Option<DoorKind>,
    constraints: &FamilyConstraints,
) -> Zone {
    let mut zone = Zone {
        zone_type: zone_template.zone_type,
        height,
        door,
        shelf_count: None,
        shelf_spacing: None,
        drawers: None,
    };

    match zone_template.zone_type {
        ZoneType::Shelves | ZoneType::ShelvesFixed => {
            let window = match (zone_template.min_shelf_count, zone_template.max_shelf_count) {
                (None, None) => None,
                (lo, hi) => Some((lo.unwrap_or(0), hi.unwrap_or(u32::MAX))),
            };
            let plan = plan_shelves(height, constraints.shelf_spacing, window);
            zone.shelf_count = Some(plan.count);
            zone.shelf_spacing = Some(plan.spacing);
        }
        ZoneType::Drawers => {
            zone.drawers = Some(plan_drawers(
                height,
                constraints.drawer_height,
                door.is_some(),
            ));
        }
        ZoneType::Empty => {}
    }

    zone
}

/// Instantiates `template` for a column with `available` interior height (mm).
///
/// # Errors
///
/// Returns an error if the template has no zones or its proportions do not
/// sum to 100.
pub fn layout_column(
    template: &Template,
    available: u32,
    constraints: &FamilyConstraints,
) -> Result<ColumnLayout> {
    if template.zones.is_empty() {
        anyhow::bail!("Template '{}' has no zones", template.id);
    }
    let total: u32 = template.zones.iter().map(|z| z.height_proportion).sum();
    if total != 100 {
        anyhow::bail!(
            "Template '{}' zone proportions sum to {total}, expected 100",
            template.id
        );
    }

    let zones = zone_heights(template, available)
        .into_iter()
        .enumerate()
        .map(|(idx, height)| {
            let door = template.door_for_zone(idx).map(|span| span.kind);
            build_zone(&template.zones[idx], height, door, constraints)
        })
        .collect();

    Ok(ColumnLayout {
        template_id: template.id.clone(),
        zones,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::Family;

    const RACK_SHELVES: SpacingRule = SpacingRule::new(250, 300, 400);
    const RACK_DRAWERS: SpacingRule = SpacingRule::new(150, 200, 300);

    #[test]
    fn test_space_count_prefers_optimal() {
        // 1764 / 300 = 5.88 → 6 spaces of 294
        assert_eq!(space_count(1764, RACK_SHELVES), 6);
        let plan = plan_shelves(1764, RACK_SHELVES, None);
        assert_eq!(plan.count, 5);
        assert_eq!(plan.spacing, 294);
    }

    #[test]
    fn test_space_count_ties_go_to_fewer() {
        // 750 / 300 = 2.5 → 2 and 3 are equally near; 2 spaces of 375 and 3 of 250 are both legal
        assert_eq!(space_count(750, RACK_SHELVES), 2);
    }

    #[test]
    fn test_space_count_widens_to_max_first() {
        let grid = SpacingRule::new(280, 300, 320);
        // 1000 mm has no count inside 280..=320; floor(1000/320) = 3 spaces of 333
        assert_eq!(space_count(1000, grid), 3);
        // 200 mm is below the minimum; one space
        assert_eq!(space_count(200, grid), 1);
    }

    #[test]
    fn test_spacing_within_bounds_when_solvable() {
        for height in 250..3000 {
            let h = u64::from(height);
            let solvable = h.div_ceil(400).max(1) <= h / 250;
            let plan = plan_shelves(height, RACK_SHELVES, None);
            if solvable {
                assert!(
                    (250..=400).contains(&plan.spacing),
                    "height {height}: spacing {}",
                    plan.spacing
                );
            }
        }
    }

    #[test]
    fn test_shelf_window_overrides_count() {
        let plan = plan_shelves(1764, RACK_SHELVES, Some((1, 4)));
        assert_eq!(plan.count, 4);
        assert_eq!(plan.spacing, 1764 / 5);

        let plan = plan_shelves(300, RACK_SHELVES, Some((2, 2)));
        assert_eq!(plan.count, 2);
    }

    #[test]
    fn test_drawer_bank_fills_zone_exactly() {
        for height in 200..1200 {
            for under_door in [false, true] {
                let bank = plan_drawers(height, RACK_DRAWERS, under_door);
                assert_eq!(bank.total_height(), height, "height {height}");
            }
        }
    }

    #[test]
    fn test_drawer_last_front_absorbs_remainder() {
        // usable = 617 - 5 - 3*2 = 606 → 3 drawers of 202, last 202 + 0 + 2
        let bank = plan_drawers(617, RACK_DRAWERS, false);
        assert_eq!(bank.heights, vec![202, 202, 204]);

        // usable = 618 - 5 - 6 = 607 → 202, 202, 203 + 2
        let bank = plan_drawers(618, RACK_DRAWERS, false);
        assert_eq!(bank.heights, vec![202, 202, 205]);
    }

    #[test]
    fn test_drawers_under_door_reserve_top_shelf() {
        let open = plan_drawers(617, RACK_DRAWERS, false);
        let closed = plan_drawers(617, RACK_DRAWERS, true);
        assert_eq!(closed.top_reserve, DRAWER_TOP_SHELF_MM);
        assert_eq!(open.top_reserve, 0);
        assert_eq!(closed.total_height(), open.total_height());
    }

    #[test]
    fn test_zone_heights_sum_exactly() {
        let catalog = Catalog::load().unwrap();
        for template in catalog.templates() {
            for available in 564..2400 {
                let heights = zone_heights(template, available);
                assert_eq!(
                    heights.iter().sum::<u32>(),
                    available,
                    "{} at {available}",
                    template.id
                );
            }
        }
    }

    #[test]
    fn test_residual_goes_to_tallest_open_zone() {
        let catalog = Catalog::load().unwrap();
        let mixed = catalog.template("mixed").unwrap();
        // 40/30/30 of 1001: 400 + 300 + 300 = 1000, residual 1 → zone 0
        assert_eq!(zone_heights(mixed, 1001), vec![401, 300, 300]);
        // 40/30/30 of 1005: 402 + 302 + 302 = 1006, residual -1 → zone 0
        assert_eq!(zone_heights(mixed, 1005), vec![401, 302, 302]);
    }

    #[test]
    fn test_layout_column_fills_zones() {
        let catalog = Catalog::load().unwrap();
        let rack = catalog.family(Family::Rack);
        let template = catalog.template("base-drawers").unwrap();
        let layout = layout_column(template, 1764, rack).unwrap();

        assert_eq!(layout.template_id, "base-drawers");
        assert_eq!(layout.total_height(), 1764);
        assert_eq!(layout.zones.len(), 2);
        assert!(layout.zones[0].shelf_count.is_some());
        let drawers = layout.zones[1].drawers.as_ref().unwrap();
        assert_eq!(drawers.total_height(), layout.zones[1].height);
    }

    #[test]
    fn test_cabinet_respects_shelf_window() {
        let catalog = Catalog::load().unwrap();
        let rack = catalog.family(Family::Rack);
        let cabinet = catalog.template("cabinet").unwrap();
        let layout = layout_column(cabinet, 1764, rack).unwrap();
        assert_eq!(layout.zones[0].shelf_count, Some(4));
        assert_eq!(layout.zones[0].door, Some(DoorKind::Split));
    }
}
