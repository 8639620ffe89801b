//! The typed configuration object a shareable link describes.

use crate::models::configuration::ColumnConfiguration;
use crate::models::dimensions::Dimensions;
use crate::models::family::{Family, FamilyConstraints};
use crate::models::rgb::RgbColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Door/drawer front opening mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningType {
    /// Push-to-open, no handle
    #[default]
    Push,
    /// Round knob
    Round,
    /// Milled profile grip
    Profile,
}

impl OpeningType {
    /// Query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Round => "round",
            Self::Profile => "profile",
        }
    }

    /// Parses a query value; the historical `handle` means `round`.
    #[must_use]
    pub fn from_query(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "push" => Some(Self::Push),
            "round" | "handle" => Some(Self::Round),
            "profile" => Some(Self::Profile),
            _ => None,
        }
    }
}

impl fmt::Display for OpeningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete product configuration for one piece of furniture.
///
/// Produced by `parser::query::parse_query_to_config`, made canonical by
/// `normalize_config`, and turned back into a link by `config_to_query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureConfig {
    /// Furniture family
    pub family: Family,
    /// Total width (cm)
    pub width: u32,
    /// Total height (cm)
    pub height: u32,
    /// Depth (cm)
    pub depth: u32,
    /// Plinth height (cm); `Some` only for families with an adjustable plinth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plinth_height: Option<u32>,
    /// Column count
    pub columns: u32,
    /// Finish color
    pub color: RgbColor,
    /// One entry per column; empty means "family defaults"
    pub column_configurations: Vec<ColumnConfiguration>,
    /// Wardrobe column encoding, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wardrobe_cfg: Option<String>,
    /// Opening mechanism
    pub opening_type: OpeningType,
}

impl FurnitureConfig {
    /// Family default configuration.
    #[must_use]
    pub fn defaults(constraints: &FamilyConstraints) -> Self {
        Self {
            family: constraints.family,
            width: constraints.width.default,
            height: constraints.height.default,
            depth: constraints.depth.default,
            plinth_height: constraints.plinth.map(|p| p.default),
            columns: constraints.columns.default,
            color: constraints.default_color,
            column_configurations: Vec::new(),
            wardrobe_cfg: None,
            opening_type: OpeningType::default(),
        }
    }

    /// Outer dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.width,
            self.height,
            self.depth,
            self.plinth_height.unwrap_or(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_type_aliases() {
        assert_eq!(OpeningType::from_query("handle"), Some(OpeningType::Round));
        assert_eq!(OpeningType::from_query(" PUSH "), Some(OpeningType::Push));
        assert_eq!(OpeningType::from_query("profile"), Some(OpeningType::Profile));
        assert_eq!(OpeningType::from_query("lever"), None);
        assert_eq!(OpeningType::Round.to_string(), "round");
    }
}
