//! Data models for furniture families, dimensions, column interiors and zones.
//!
//! This module contains the plain data the engine consumes and produces.
//! Models carry no layout logic; that lives in `services`.

pub mod configuration;
pub mod dimensions;
pub mod family;
pub mod furniture;
pub mod rgb;
pub mod zone;

// Re-export all model types
pub use configuration::{
    ColumnConfiguration, ConfigurationType, DoorSide, HingePlacement, ItemCount, TypeMetadata,
};
pub use dimensions::{ColumnDimensions, ColumnRange, DimensionConstraint, Dimensions};
pub use family::{ColumnWidthRule, Family, FamilyConstraints, SpacingRule, WidthBand};
pub use furniture::{FurnitureConfig, OpeningType};
pub use rgb::RgbColor;
pub use zone::{
    ColumnLayout, DoorKind, DoorSpan, DrawerBank, Template, Zone, ZoneTemplate, ZoneType,
};
