//! Furniture families and their constraint tables.

use crate::models::configuration::ColumnConfiguration;
use crate::models::dimensions::{ColumnRange, DimensionConstraint, Dimensions};
use crate::models::rgb::RgbColor;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Furniture family. Each family has its own constraint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// Low TV/sideboard stand on an adjustable plinth
    Stand,
    /// Bedside table
    Bedside,
    /// Full-height wardrobe
    Wardrobe,
    /// Open rack / bookcase
    Rack,
    /// Shoe rack
    ShoeRack,
}

impl Family {
    /// Every family, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Stand,
        Self::Bedside,
        Self::Wardrobe,
        Self::Rack,
        Self::ShoeRack,
    ];

    /// Identifier used in the catalog and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stand => "stand",
            Self::Bedside => "bedside",
            Self::Wardrobe => "wardrobe",
            Self::Rack => "rack",
            Self::ShoeRack => "shoe-rack",
        }
    }

    /// Whether columns of this family share one master shelf grid.
    #[must_use]
    pub const fn uses_master_grid(self) -> bool {
        matches!(self, Self::Rack)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == wanted || (wanted == "bookcase" && *family == Self::Rack))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown furniture family '{s}'. Expected one of: stand, bedside, wardrobe, rack, shoe-rack"
                )
            })
    }
}

/// Inclusive per-column width band in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthBand {
    /// Narrowest column
    pub min: f64,
    /// Widest column
    pub max: f64,
}

impl WidthBand {
    /// Returns true if `column_width` lies inside the band.
    #[must_use]
    pub fn contains(&self, column_width: f64) -> bool {
        column_width >= self.min && column_width <= self.max
    }
}

/// Family-specific rule on the total width for one column count.
///
/// Evaluated in addition to the per-column width band; a count is legal
/// only when both pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnWidthRule {
    /// `columns` is illegal when total width exceeds `width`
    ForbidAbove {
        /// Column count the rule applies to
        columns: u32,
        /// Total width threshold (cm)
        width: u32,
    },
    /// `columns` is illegal when total width is below `width`
    RequireAtLeast {
        /// Column count the rule applies to
        columns: u32,
        /// Total width threshold (cm)
        width: u32,
    },
}

impl ColumnWidthRule {
    /// Returns true if `columns` passes the rule at the given total width.
    #[must_use]
    pub const fn allows(&self, columns: u32, total_width: u32) -> bool {
        match *self {
            Self::ForbidAbove { columns: c, width } => c != columns || total_width <= width,
            Self::RequireAtLeast { columns: c, width } => c != columns || total_width >= width,
        }
    }
}

/// Minimum / optimal / maximum of a spacing quantity, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingRule {
    /// Smallest accepted value
    pub min: u32,
    /// Preferred value
    pub optimal: u32,
    /// Largest accepted value
    pub max: u32,
}

impl SpacingRule {
    /// Creates a new spacing rule.
    #[must_use]
    pub const fn new(min: u32, optimal: u32, max: u32) -> Self {
        Self { min, optimal, max }
    }
}

/// Complete constraint table for one family.
///
/// Loaded once from the embedded catalog and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyConstraints {
    /// Family this table belongs to
    pub family: Family,
    /// Total width (cm)
    pub width: DimensionConstraint,
    /// Total height (cm)
    pub height: DimensionConstraint,
    /// Depth (cm)
    pub depth: DimensionConstraint,
    /// Plinth height (cm); only families with an adjustable plinth have one
    #[serde(default)]
    pub plinth: Option<DimensionConstraint>,
    /// Allowed column counts
    pub columns: ColumnRange,
    /// Per-column width band for 1, 2, 3 and 4 columns
    pub column_width_bands: [WidthBand; 4],
    /// Optional total-width rule
    #[serde(default)]
    pub width_rule: Option<ColumnWidthRule>,
    /// Shelf spacing bounds inside SHELVES zones (mm)
    pub shelf_spacing: SpacingRule,
    /// Per-drawer height bounds inside DRAWERS zones (mm)
    pub drawer_height: SpacingRule,
    /// Color used when a query omits or garbles the color
    pub default_color: RgbColor,
    /// Configuration synthesized when a column configuration array has to grow
    pub default_column_configuration: ColumnConfiguration,
}

impl FamilyConstraints {
    /// Family default dimensions.
    #[must_use]
    pub fn default_dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.width.default,
            self.height.default,
            self.depth.default,
            self.plinth.map_or(0, |p| p.default),
        )
    }

    /// Width band for a column count, or `None` when the count is outside 1..=4.
    #[must_use]
    pub fn width_band(&self, columns: u32) -> Option<&WidthBand> {
        let index = usize::try_from(columns).ok()?.checked_sub(1)?;
        self.column_width_bands.get(index)
    }
}
