//! Service layer for the layout engine.
//!
//! Every service is a pure function of the catalog tables and the
//! configuration it is handed; nothing here keeps state between calls.

pub mod column_count;
pub mod fallback;
pub mod furniture_layout;
pub mod master_grid;
pub mod reconcile;
pub mod zone_layout;

// Re-export commonly used types and functions
pub use column_count::{legal_column_counts, select_column_count, ColumnCountMap};
pub use fallback::{is_valid_configuration, resolve_configuration};
pub use furniture_layout::{layout_furniture, FurnitureLayout};
pub use master_grid::MasterGrid;
pub use reconcile::reconcile_config;
pub use zone_layout::layout_column;
