//! Master grid alignment for rack-style furniture.
//!
//! One shelf grid is computed per piece of furniture from the column
//! interior height. Zone boundaries that carry a door edge, or sit on top
//! of a drawer bank, are moved onto that grid so every column lines up.

use crate::models::{ColumnLayout, FamilyConstraints, SpacingRule, Template, ZoneType};
use crate::services::zone_layout::{build_zone, space_count};
use anyhow::Result;
use serde::Serialize;
use tracing::debug;

/// Spacing bounds of the master grid (mm).
pub const GRID_SPACING: SpacingRule = SpacingRule::new(280, 300, 320);

/// Smallest door span a snap may leave (mm).
pub const MIN_DOOR_SPAN_MM: u32 = 280;

/// Smallest drawer zone a snap may leave (mm).
pub const MIN_DRAWER_ZONE_MM: u32 = 150;

/// Tallest door span or drawer zone a snap may produce (mm).
pub const MAX_SUBJECT_MM: u32 = 1300;

/// Smallest zone allowed across a snapped boundary (mm).
pub const MIN_NEIGHBOUR_MM: u32 = 280;

/// Candidates closer than this to the best distance count as tied (mm).
pub const SNAP_TIE_MM: u32 = 20;

/// A snap further than this many grid spacings is dropped.
pub const MAX_SNAP_SPACINGS: f64 = 1.5;

/// Shared shelf grid of one piece of furniture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasterGrid {
    /// Column interior height the grid divides (mm)
    pub height: u32,
    /// Exact distance between grid lines (mm)
    pub spacing: f64,
    /// Grid lines measured from the bottom, `0` and `height` included
    pub positions: Vec<u32>,
}

impl MasterGrid {
    /// Computes the grid for a column interior height.
    #[must_use]
    pub fn from_height(height: u32) -> Self {
        let spaces = u64::from(space_count(height, GRID_SPACING));
        let positions = (0..=spaces)
            .map(|k| ((k * u64::from(height) + spaces / 2) / spaces) as u32)
            .collect();
        Self {
            height,
            spacing: f64::from(height) / spaces as f64,
            positions,
        }
    }

    /// Grid lines a boundary may move to (everything but the floor and the top).
    pub fn inner_positions(&self) -> impl Iterator<Item = u32> + '_ {
        self.positions
            .iter()
            .copied()
            .filter(|p| *p != 0 && *p != self.height)
    }

    /// Picks the grid line for a boundary at `boundary`.
    ///
    /// Only lines passing `accept` are considered. The nearest one wins;
    /// lines within `SNAP_TIE_MM` of the best distance are tied and the
    /// highest of them is taken. Returns `None` when nothing is accepted
    /// or the best line is more than `MAX_SNAP_SPACINGS` spacings away.
    pub fn snap(&self, boundary: u32, accept: impl Fn(u32) -> bool) -> Option<u32> {
        let candidates: Vec<(u32, u32)> = self
            .inner_positions()
            .filter(|p| accept(*p))
            .map(|p| (p, p.abs_diff(boundary)))
            .collect();

        let best = candidates.iter().map(|(_, d)| *d).min()?;
        if f64::from(best) > MAX_SNAP_SPACINGS * self.spacing {
            return None;
        }
        candidates
            .into_iter()
            .filter(|(_, d)| *d - best < SNAP_TIE_MM)
            .map(|(p, _)| p)
            .max()
    }
}

/// What a boundary would move, and on which side of it that sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Subject {
    /// Current height of the door span or drawer zone
    height: u32,
    /// Smallest height it may be left with
    min_height: u32,
    /// True when the subject lies below the boundary
    below: bool,
}

/// Finds the subject of boundary `index` (between zones `index` and `index + 1`).
///
/// A door span starting just below the boundary comes first, then a drawer
/// zone just below, then a door span ending just above. Boundaries inside
/// one door span are not snappable.
fn boundary_subject(template: &Template, heights: &[u32], index: usize) -> Option<Subject> {
    let span_height = |first: usize, last: usize| heights[first..=last].iter().sum::<u32>();

    for door in &template.doors {
        let (Some(first), Some(last)) = (door.first(), door.last()) else {
            continue;
        };
        if first == index + 1 {
            return Some(Subject {
                height: span_height(first, last),
                min_height: MIN_DOOR_SPAN_MM,
                below: true,
            });
        }
    }

    if template.zones[index + 1].zone_type == ZoneType::Drawers {
        return Some(Subject {
            height: heights[index + 1],
            min_height: MIN_DRAWER_ZONE_MM,
            below: true,
        });
    }

    template.doors.iter().find_map(|door| {
        let (first, last) = (door.first()?, door.last()?);
        (last == index).then(|| Subject {
            height: span_height(first, last),
            min_height: MIN_DOOR_SPAN_MM,
            below: false,
        })
    })
}

/// Snaps one column's door and drawer boundaries onto the master grid.
///
/// Boundaries are processed bottom-up. Each snap moves height between the
/// two zones touching the boundary; both are then rebuilt, so drawer banks
/// are recomputed for their new height instead of being rescaled.
///
/// # Errors
///
/// Returns an error if `layout` was not produced from `template`.
pub fn align_column(
    layout: &ColumnLayout,
    template: &Template,
    grid: &MasterGrid,
    constraints: &FamilyConstraints,
) -> Result<ColumnLayout> {
    if layout.template_id != template.id || layout.zones.len() != template.zones.len() {
        anyhow::bail!(
            "Layout '{}' does not match template '{}'",
            layout.template_id,
            template.id
        );
    }

    let mut aligned = layout.clone();
    let count = aligned.zones.len();

    for index in (0..count.saturating_sub(1)).rev() {
        let heights: Vec<u32> = aligned.zones.iter().map(|z| z.height).collect();
        let Some(subject) = boundary_subject(template, &heights, index) else {
            continue;
        };

        let boundary: u32 = heights[index + 1..].iter().sum();
        let above = i64::from(heights[index]);
        let below = i64::from(heights[index + 1]);
        let accept = |position: u32| {
            let delta = i64::from(position) - i64::from(boundary);
            let subject_height = if subject.below {
                i64::from(subject.height) + delta
            } else {
                i64::from(subject.height) - delta
            };
            let (adjacent, across) = if subject.below {
                (below + delta, above - delta)
            } else {
                (above - delta, below + delta)
            };
            subject_height >= i64::from(subject.min_height)
                && subject_height <= i64::from(MAX_SUBJECT_MM)
                && across >= i64::from(MIN_NEIGHBOUR_MM)
                && adjacent > 0
        };

        let Some(position) = grid.snap(boundary, accept) else {
            debug!(
                "Boundary {index} of '{}' at {boundary} mm left unsnapped",
                template.id
            );
            continue;
        };
        if position == boundary {
            continue;
        }

        let delta = i64::from(position) - i64::from(boundary);
        let new_above = (above - delta) as u32;
        let new_below = (below + delta) as u32;
        debug!(
            "Boundary {index} of '{}' snapped from {boundary} to {position} mm",
            template.id
        );

        for (zone_index, height) in [(index, new_above), (index + 1, new_below)] {
            let door = aligned.zones[zone_index].door;
            aligned.zones[zone_index] =
                build_zone(&template.zones[zone_index], height, door, constraints);
        }
    }

    Ok(aligned)
}
