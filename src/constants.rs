//! Application-wide constants.
//!
//! This module defines the application name plus the carcass measurements
//! shared by every furniture family.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Furniture Configurator";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "furnicfg";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "FurnitureConfigurator";

/// Thickness of the top and bottom carcass boards in millimetres.
pub const BOARD_THICKNESS_MM: u32 = 18;

/// Millimetres per centimetre. Query values are centimetres, interior geometry is millimetres.
pub const MM_PER_CM: u32 = 10;

/// Highest column count any family supports.
pub const MAX_COLUMNS: u32 = 4;
