// Layout Calculators
// Grid system, per-archetype placement strategies and the engine that runs them.
// Everything here is synchronous and pure; deck-level fan-out lives in `deck`.

pub mod calculators;
pub mod engine;
pub mod geometry;
pub mod grid;
pub mod limits;
pub mod result;
pub mod spec;

// Re-export the public API consumed by validation, deck and the binary.
pub use engine::{calculate_layout, calculate_layout_with, fallback_layout, strategy};
pub use geometry::{Alignment, ElementPosition, Rect, VerticalAlignment};
pub use grid::{create_grid_box, create_layout_config, ColumnPreset, GridConfig, LayoutConfig};
pub use limits::ContentLimits;
pub use result::{
    ColumnSide, ElementContent, LayoutMetadata, LayoutOutcome, LayoutResult, PlacedElement,
};
pub use spec::{Archetype, ContentSpec};
