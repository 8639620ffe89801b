//! Dimension constraints and the concrete dimensions they govern.

use crate::constants::{BOARD_THICKNESS_MM, MM_PER_CM};
use serde::{Deserialize, Serialize};

/// Bounds for one numeric axis (width, height, depth or plinth), in centimetres.
///
/// # Normalization
///
/// Values are clamped into `[min, max]`, snapped to the nearest multiple of
/// `step` (half rounds up) and clamped again, so a snapped value can never
/// leave the range when `step` does not divide it evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionConstraint {
    /// Smallest accepted value
    pub min: u32,
    /// Largest accepted value
    pub max: u32,
    /// Value used when a query omits the field
    pub default: u32,
    /// Snapping granularity
    pub step: u32,
}

impl DimensionConstraint {
    /// Creates a new constraint.
    #[must_use]
    pub const fn new(min: u32, max: u32, default: u32, step: u32) -> Self {
        Self {
            min,
            max,
            default,
            step,
        }
    }

    /// Clamps a value into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }

    /// Snaps a value to the nearest multiple of `step`, rounding halves up.
    #[must_use]
    pub fn snap(&self, value: u32) -> u32 {
        let step = self.step.max(1);
        (value.saturating_add(step / 2) / step) * step
    }

    /// Clamp, snap, clamp again.
    ///
    /// # Examples
    ///
    /// ```
    /// use furnicfg::models::DimensionConstraint;
    ///
    /// let width = DimensionConstraint::new(60, 245, 120, 10);
    /// assert_eq!(width.normalize(154), 150);
    /// assert_eq!(width.normalize(155), 160);
    /// assert_eq!(width.normalize(500), 245);
    /// assert_eq!(width.normalize(3), 60);
    /// ```
    #[must_use]
    pub fn normalize(&self, value: u32) -> u32 {
        self.clamp(self.snap(self.clamp(value)))
    }

    /// Returns true if `value` lies inside `[min, max]`.
    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Allowed column counts for a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    /// Fewest columns
    pub min: u32,
    /// Most columns
    pub max: u32,
    /// Column count used when a query omits the field
    pub default: u32,
}

impl ColumnRange {
    /// Clamps a column count into the range.
    #[must_use]
    pub fn clamp(&self, columns: u32) -> u32 {
        columns.clamp(self.min, self.max)
    }

    /// Returns true if `columns` is inside the range.
    #[must_use]
    pub const fn contains(&self, columns: u32) -> bool {
        columns >= self.min && columns <= self.max
    }
}

/// Outer dimensions of one piece of furniture, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Total width
    pub width: u32,
    /// Total height including plinth
    pub height: u32,
    /// Depth
    pub depth: u32,
    /// Plinth height (0 for families without a plinth)
    pub plinth: u32,
}

impl Dimensions {
    /// Creates a new set of outer dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32, depth: u32, plinth: u32) -> Self {
        Self {
            width,
            height,
            depth,
            plinth,
        }
    }

    /// Interior height of a column in millimetres (between top and bottom board).
    #[must_use]
    pub fn interior_height_mm(&self) -> u32 {
        self.height
            .saturating_sub(self.plinth)
            .saturating_mul(MM_PER_CM)
            .saturating_sub(2 * BOARD_THICKNESS_MM)
    }

    /// Per-column dimensions in millimetres for the given column count.
    #[must_use]
    pub fn column_dimensions(&self, columns: u32) -> ColumnDimensions {
        ColumnDimensions {
            width: self.width.saturating_mul(MM_PER_CM) / columns.max(1),
            height: self.interior_height_mm(),
            depth: self.depth.saturating_mul(MM_PER_CM),
        }
    }
}

/// Interior dimensions of one column, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDimensions {
    /// Column width
    pub width: u32,
    /// Usable interior height
    pub height: u32,
    /// Column depth
    pub depth: u32,
}

impl ColumnDimensions {
    /// Creates new column dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}
