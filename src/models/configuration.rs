//! Column configuration types and their static metadata.
//!
//! `ConfigurationType` is the closed set of column interiors. Every variant
//! has exactly one metadata entry and one compact code; both are exhaustive
//! `match`es so a new variant cannot compile without them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of drawers or shelves in a configuration (1-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemCount {
    /// One item
    One,
    /// Two items
    Two,
    /// Three items
    Three,
    /// Four items
    Four,
    /// Five items
    Five,
}

impl ItemCount {
    /// All counts in ascending order.
    pub const ALL: [Self; 5] = [Self::One, Self::Two, Self::Three, Self::Four, Self::Five];

    /// Numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    /// Converts a number in 1..=5.
    #[must_use]
    pub const fn from_u32(n: u32) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            _ => None,
        }
    }
}

/// Side a single door opens towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorSide {
    /// Opens to the left
    #[default]
    Left,
    /// Opens to the right
    Right,
}

impl DoorSide {
    /// Lower-case name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Suffix letter used by the compact codec.
    #[must_use]
    pub const fn suffix(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Parses a codec suffix letter.
    #[must_use]
    pub const fn from_suffix(c: char) -> Option<Self> {
        match c {
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

/// Where hinges go on the door(s) of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HingePlacement {
    /// No door, no hinges
    None,
    /// Single door hinged on its opening side
    OpeningSide,
    /// Two doors hinged on the outer edges of the column
    BothOuterEdges,
}

/// Static metadata for one configuration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeMetadata {
    /// Number of drawers
    pub drawers: u32,
    /// Number of internal shelves
    pub shelves: u32,
    /// Number of doors (0, 1 or 2)
    pub doors: u32,
    /// Total hinge count across all doors
    pub hinges: u32,
    /// Hinge placement rule
    pub hinge_placement: HingePlacement,
}

impl TypeMetadata {
    const fn drawers(n: u32) -> Self {
        Self {
            drawers: n,
            shelves: 0,
            doors: 0,
            hinges: 0,
            hinge_placement: HingePlacement::None,
        }
    }

    const fn single_door(shelves: u32, hinges: u32) -> Self {
        Self {
            drawers: 0,
            shelves,
            doors: 1,
            hinges,
            hinge_placement: HingePlacement::OpeningSide,
        }
    }

    const fn split_door(shelves: u32, hinges: u32) -> Self {
        Self {
            drawers: 0,
            shelves,
            doors: 2,
            hinges,
            hinge_placement: HingePlacement::BothOuterEdges,
        }
    }
}

/// Interior archetype of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfigurationType {
    /// One drawer
    #[serde(rename = "DRAWERS_1")]
    Drawers1,
    /// Two drawers
    #[serde(rename = "DRAWERS_2")]
    Drawers2,
    /// Three drawers
    #[serde(rename = "DRAWERS_3")]
    Drawers3,
    /// Four drawers
    #[serde(rename = "DRAWERS_4")]
    Drawers4,
    /// Five drawers
    #[serde(rename = "DRAWERS_5")]
    Drawers5,
    /// Single door, one shelf
    #[serde(rename = "DOOR_1_SHELF")]
    Door1Shelf,
    /// Single door, two shelves
    #[serde(rename = "DOOR_2_SHELVES")]
    Door2Shelves,
    /// Single door, three shelves
    #[serde(rename = "DOOR_3_SHELVES")]
    Door3Shelves,
    /// Single door, four shelves
    #[serde(rename = "DOOR_4_SHELVES")]
    Door4Shelves,
    /// Single door, five shelves
    #[serde(rename = "DOOR_5_SHELVES")]
    Door5Shelves,
    /// Two doors, one shelf
    #[serde(rename = "DOOR_SPLIT_1_SHELF")]
    DoorSplit1Shelf,
    /// Two doors, two shelves
    #[serde(rename = "DOOR_SPLIT_2_SHELVES")]
    DoorSplit2Shelves,
    /// Two doors, three shelves
    #[serde(rename = "DOOR_SPLIT_3_SHELVES")]
    DoorSplit3Shelves,
    /// Two doors, four shelves
    #[serde(rename = "DOOR_SPLIT_4_SHELVES")]
    DoorSplit4Shelves,
    /// Two doors, five shelves
    #[serde(rename = "DOOR_SPLIT_5_SHELVES")]
    DoorSplit5Shelves,
}

impl ConfigurationType {
    /// Every type, in fallback order.
    pub const ALL: [Self; 15] = [
        Self::Drawers1,
        Self::Drawers2,
        Self::Drawers3,
        Self::Drawers4,
        Self::Drawers5,
        Self::Door1Shelf,
        Self::Door2Shelves,
        Self::Door3Shelves,
        Self::Door4Shelves,
        Self::Door5Shelves,
        Self::DoorSplit1Shelf,
        Self::DoorSplit2Shelves,
        Self::DoorSplit3Shelves,
        Self::DoorSplit4Shelves,
        Self::DoorSplit5Shelves,
    ];

    /// Static metadata for this type.
    #[must_use]
    pub const fn metadata(self) -> TypeMetadata {
        match self {
            Self::Drawers1 => TypeMetadata::drawers(1),
            Self::Drawers2 => TypeMetadata::drawers(2),
            Self::Drawers3 => TypeMetadata::drawers(3),
            Self::Drawers4 => TypeMetadata::drawers(4),
            Self::Drawers5 => TypeMetadata::drawers(5),
            Self::Door1Shelf => TypeMetadata::single_door(1, 2),
            Self::Door2Shelves => TypeMetadata::single_door(2, 2),
            Self::Door3Shelves => TypeMetadata::single_door(3, 3),
            Self::Door4Shelves => TypeMetadata::single_door(4, 3),
            Self::Door5Shelves => TypeMetadata::single_door(5, 3),
            Self::DoorSplit1Shelf => TypeMetadata::split_door(1, 4),
            Self::DoorSplit2Shelves => TypeMetadata::split_door(2, 4),
            Self::DoorSplit3Shelves => TypeMetadata::split_door(3, 6),
            Self::DoorSplit4Shelves => TypeMetadata::split_door(4, 6),
            Self::DoorSplit5Shelves => TypeMetadata::split_door(5, 6),
        }
    }

    /// Compact code used in shareable links. Never ends in `L` or `R`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Drawers1 => "DR1",
            Self::Drawers2 => "DR2",
            Self::Drawers3 => "DR3",
            Self::Drawers4 => "DR4",
            Self::Drawers5 => "DR5",
            Self::Door1Shelf => "D1S",
            Self::Door2Shelves => "D2S",
            Self::Door3Shelves => "D3S",
            Self::Door4Shelves => "D4S",
            Self::Door5Shelves => "D5S",
            Self::DoorSplit1Shelf => "DD1S",
            Self::DoorSplit2Shelves => "DD2S",
            Self::DoorSplit3Shelves => "DD3S",
            Self::DoorSplit4Shelves => "DD4S",
            Self::DoorSplit5Shelves => "DD5S",
        }
    }

    /// Upper-case name, e.g. `DOOR_1_SHELF`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Drawers1 => "DRAWERS_1",
            Self::Drawers2 => "DRAWERS_2",
            Self::Drawers3 => "DRAWERS_3",
            Self::Drawers4 => "DRAWERS_4",
            Self::Drawers5 => "DRAWERS_5",
            Self::Door1Shelf => "DOOR_1_SHELF",
            Self::Door2Shelves => "DOOR_2_SHELVES",
            Self::Door3Shelves => "DOOR_3_SHELVES",
            Self::Door4Shelves => "DOOR_4_SHELVES",
            Self::Door5Shelves => "DOOR_5_SHELVES",
            Self::DoorSplit1Shelf => "DOOR_SPLIT_1_SHELF",
            Self::DoorSplit2Shelves => "DOOR_SPLIT_2_SHELVES",
            Self::DoorSplit3Shelves => "DOOR_SPLIT_3_SHELVES",
            Self::DoorSplit4Shelves => "DOOR_SPLIT_4_SHELVES",
            Self::DoorSplit5Shelves => "DOOR_SPLIT_5_SHELVES",
        }
    }

    /// Looks up a base code (without side suffix).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.code() == code)
    }

    /// Position in the fallback ordering.
    #[must_use]
    pub fn ordinal(self) -> usize {
        Self::ALL
            .iter()
            .position(|ty| *ty == self)
            .unwrap_or_default()
    }

    /// True for the types with exactly one door, the only ones carrying an opening side.
    #[must_use]
    pub const fn has_single_door(self) -> bool {
        self.metadata().doors == 1
    }

    /// Builds a column configuration of this type.
    ///
    /// `side` is kept only for single-door types.
    #[must_use]
    pub const fn with_side(self, side: DoorSide) -> ColumnConfiguration {
        let meta = self.metadata();
        let count = match ItemCount::from_u32(if meta.drawers > 0 {
            meta.drawers
        } else {
            meta.shelves
        }) {
            Some(count) => count,
            None => ItemCount::One,
        };
        match meta.doors {
            0 => ColumnConfiguration::Drawers(count),
            1 => ColumnConfiguration::Door {
                shelves: count,
                side,
            },
            _ => ColumnConfiguration::SplitDoor { shelves: count },
        }
    }
}

impl fmt::Display for ConfigurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chosen interior of one physical column.
///
/// Only the single-door variant carries an opening side, so a side can
/// neither be missing where it is needed nor present where it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnConfiguration {
    /// Equal drawers, no shelves
    Drawers(ItemCount),
    /// One door over internal shelves
    Door {
        /// Number of shelves behind the door
        shelves: ItemCount,
        /// Opening side
        side: DoorSide,
    },
    /// Two doors over internal shelves
    SplitDoor {
        /// Number of shelves behind the doors
        shelves: ItemCount,
    },
}

impl ColumnConfiguration {
    /// Configuration type of this column.
    #[must_use]
    pub const fn configuration_type(&self) -> ConfigurationType {
        use ConfigurationType as T;
        match *self {
            Self::Drawers(n) => match n {
                ItemCount::One => T::Drawers1,
                ItemCount::Two => T::Drawers2,
                ItemCount::Three => T::Drawers3,
                ItemCount::Four => T::Drawers4,
                ItemCount::Five => T::Drawers5,
            },
            Self::Door { shelves, .. } => match shelves {
                ItemCount::One => T::Door1Shelf,
                ItemCount::Two => T::Door2Shelves,
                ItemCount::Three => T::Door3Shelves,
                ItemCount::Four => T::Door4Shelves,
                ItemCount::Five => T::Door5Shelves,
            },
            Self::SplitDoor { shelves } => match shelves {
                ItemCount::One => T::DoorSplit1Shelf,
                ItemCount::Two => T::DoorSplit2Shelves,
                ItemCount::Three => T::DoorSplit3Shelves,
                ItemCount::Four => T::DoorSplit4Shelves,
                ItemCount::Five => T::DoorSplit5Shelves,
            },
        }
    }

    /// Opening side, present only for single-door configurations.
    #[must_use]
    pub const fn door_side(&self) -> Option<DoorSide> {
        match *self {
            Self::Door { side, .. } => Some(side),
            _ => None,
        }
    }

    /// Static metadata of the configuration type.
    #[must_use]
    pub const fn metadata(&self) -> TypeMetadata {
        self.configuration_type().metadata()
    }

    /// Compact code including the side suffix, e.g. `D1SL` or `DR3`.
    #[must_use]
    pub fn code(&self) -> String {
        let base = self.configuration_type().code();
        match self.door_side() {
            Some(side) => format!("{base}{}", side.suffix()),
            None => base.to_string(),
        }
    }
}

impl fmt::Display for ColumnConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// Strict parse of a single code: a single door needs its side, other
/// types must not have one. The lenient, link-facing decoder lives in
/// `parser::column_codec`.
impl FromStr for ColumnConfiguration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let (base, side) = split_side_suffix(token);
        let ty = ConfigurationType::from_code(base)
            .ok_or_else(|| anyhow::anyhow!("Unknown column configuration code '{token}'"))?;

        match (ty.has_single_door(), side) {
            (true, Some(side)) => Ok(ty.with_side(side)),
            (true, None) => anyhow::bail!("Column configuration '{token}' needs an L or R suffix"),
            (false, None) => Ok(ty.with_side(DoorSide::Left)),
            (false, Some(_)) => {
                anyhow::bail!("Column configuration '{token}' has no single door to open")
            }
        }
    }
}

impl TryFrom<String> for ColumnConfiguration {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ColumnConfiguration> for String {
    fn from(config: ColumnConfiguration) -> Self {
        config.code()
    }
}

/// Splits a trailing `L`/`R` off a token.
#[must_use]
pub fn split_side_suffix(token: &str) -> (&str, Option<DoorSide>) {
    match token.chars().last().and_then(DoorSide::from_suffix) {
        Some(side) => (&token[..token.len() - 1], Some(side)),
        None => (token, None),
    }
}
