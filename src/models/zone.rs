//! Zone templates and concrete zone layouts for rack-style families.

use crate::models::family::Family;
use serde::{Deserialize, Serialize};

/// Kind of vertical sub-region inside a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneType {
    /// Adjustable shelves, count derived from height
    Shelves,
    /// Fixed shelves, count usually pinned by the template window
    ShelvesFixed,
    /// Bank of equal drawers
    Drawers,
    /// Open space without shelves
    Empty,
}

impl ZoneType {
    /// True for zones that hold shelves.
    #[must_use]
    pub const fn has_shelves(self) -> bool {
        matches!(self, Self::Shelves | Self::ShelvesFixed)
    }
}

/// One zone inside a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTemplate {
    /// Zone kind
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    /// Share of the column height in percent
    pub height_proportion: u32,
    /// Lower bound on the shelf count (shelf zones only)
    #[serde(default)]
    pub min_shelf_count: Option<u32>,
    /// Upper bound on the shelf count (shelf zones only)
    #[serde(default)]
    pub max_shelf_count: Option<u32>,
}

/// Single or split (two-leaf) door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorKind {
    /// One door leaf
    Single,
    /// Two door leaves
    Split,
}

impl DoorKind {
    /// Lowercase name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Split => "split",
        }
    }
}

/// A door covering one or more consecutive zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorSpan {
    /// Indices of covered zones, top to bottom
    pub zone_indices: Vec<usize>,
    /// Door kind
    #[serde(rename = "type")]
    pub kind: DoorKind,
}

impl DoorSpan {
    /// Topmost covered zone index.
    #[must_use]
    pub fn first(&self) -> Option<usize> {
        self.zone_indices.iter().copied().min()
    }

    /// Bottommost covered zone index.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.zone_indices.iter().copied().max()
    }
}

/// Column archetype: zones as height proportions plus the doors over them.
///
/// Templates are declared in the embedded catalog; the engine only
/// instantiates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Stable identifier (e.g. "base-drawers")
    pub id: String,
    /// Display name
    pub name: String,
    /// Family the template belongs to
    pub family: Family,
    /// Zones, top to bottom; proportions sum to 100
    pub zones: Vec<ZoneTemplate>,
    /// Doors over zones
    #[serde(default)]
    pub doors: Vec<DoorSpan>,
    /// Smallest furniture height the template fits (cm)
    pub min_height: u32,
    /// Largest furniture height the template fits (cm)
    pub max_height: u32,
    /// Narrowest column the template fits (cm)
    pub min_width: u32,
    /// Widest column the template fits (cm)
    pub max_width: u32,
    /// Surcharge read by price calculators
    #[serde(default)]
    pub extra_cost: u32,
}

impl Template {
    /// Door span covering zone `index`, if any.
    #[must_use]
    pub fn door_for_zone(&self, index: usize) -> Option<&DoorSpan> {
        self.doors
            .iter()
            .find(|door| door.zone_indices.contains(&index))
    }

    /// Returns true if zone `index` sits behind a door.
    #[must_use]
    pub fn is_door_covered(&self, index: usize) -> bool {
        self.door_for_zone(index).is_some()
    }

    /// Returns true if the template fits a column of the given size (cm).
    #[must_use]
    pub const fn fits(&self, column_width: u32, height: u32) -> bool {
        column_width >= self.min_width
            && column_width <= self.max_width
            && height >= self.min_height
            && height <= self.max_height
    }
}

/// Drawer bank inside a DRAWERS zone.
///
/// `heights.sum() + gap * (count - 1) + bottom_margin + top_reserve`
/// equals the zone height; `bottom_margin` already accounts for the
/// overlap of the last drawer front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawerBank {
    /// Front heights, top to bottom
    pub heights: Vec<u32>,
    /// Gap between fronts
    pub gap: u32,
    /// Space left below the last front
    pub bottom_margin: u32,
    /// Space reserved above the first front for a top shelf under a door
    pub top_reserve: u32,
}

impl DrawerBank {
    /// Number of drawers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.heights.len()
    }

    /// Total height the bank occupies.
    #[must_use]
    pub fn total_height(&self) -> u32 {
        let gaps = self.gap * (self.heights.len().saturating_sub(1) as u32);
        self.heights.iter().sum::<u32>() + gaps + self.bottom_margin + self.top_reserve
    }
}

/// Concrete zone inside one column (all lengths in mm).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone kind
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    /// Zone height
    pub height: u32,
    /// Door over the zone, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door: Option<DoorKind>,
    /// Number of shelves (shelf zones only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_count: Option<u32>,
    /// Distance between shelves (shelf zones only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf_spacing: Option<u32>,
    /// Drawer fronts (drawer zones only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawers: Option<DrawerBank>,
}

impl Zone {
    /// Shelf offsets from the bottom of the zone.
    #[must_use]
    pub fn shelf_positions(&self) -> Vec<u32> {
        let Some(count) = self.shelf_count else {
            return Vec::new();
        };
        let spaces = u64::from(count) + 1;
        (1..=u64::from(count))
            .map(|k| ((k * u64::from(self.height) + spaces / 2) / spaces) as u32)
            .collect()
    }
}

/// Instantiated template for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Template the layout was computed from
    pub template_id: String,
    /// Zones, top to bottom
    pub zones: Vec<Zone>,
}

impl ColumnLayout {
    /// Sum of zone heights.
    #[must_use]
    pub fn total_height(&self) -> u32 {
        self.zones.iter().map(|zone| zone.height).sum()
    }

    /// Offsets of the boundaries between zones, measured from the bottom.
    ///
    /// Entry `i` is the boundary between zone `i` and zone `i + 1`.
    #[must_use]
    pub fn boundaries(&self) -> Vec<u32> {
        (0..self.zones.len().saturating_sub(1))
            .map(|i| self.zones[i + 1..].iter().map(|zone| zone.height).sum())
            .collect()
    }
}
