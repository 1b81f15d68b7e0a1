//! Grid & spacing system: margins, content area and a 12-column grid.
//!
//! Archetype-relative placements ("medium column at y") become absolute canvas
//! rectangles here. Every box this module returns lies inside the content area.

use serde::{Deserialize, Serialize};

use crate::layout::geometry::{Alignment, ElementPosition, Rect, VerticalAlignment};
use crate::layout::spec::Archetype;
use crate::theme::ThemeTokens;

pub const GRID_COLUMNS: u32 = 12;

const TITLE_MARGIN_TOP: f32 = 0.8;
const TITLE_MARGIN_SIDES: f32 = 0.6;
const CONTENT_MARGIN: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// Canvas, margins and the resulting content area for one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub archetype: Archetype,
    pub canvas: Rect,
    pub margins: Margins,
    pub content_area: Rect,
}

/// Title slides get a deeper top margin (0.8) and 0.6 elsewhere; every other
/// archetype uses a uniform 0.5.
pub fn create_layout_config(archetype: Archetype, theme: &ThemeTokens) -> LayoutConfig {
    let canvas = Rect::new(
        0.0,
        0.0,
        theme.layout.canvas_width,
        theme.layout.canvas_height,
    );
    let margins = if archetype.is_title() {
        Margins {
            top: TITLE_MARGIN_TOP,
            right: TITLE_MARGIN_SIDES,
            bottom: TITLE_MARGIN_SIDES,
            left: TITLE_MARGIN_SIDES,
        }
    } else {
        Margins::uniform(CONTENT_MARGIN)
    };
    let content_area = canvas.inset(margins.top, margins.right, margins.bottom, margins.left);
    LayoutConfig {
        archetype,
        canvas,
        margins,
        content_area,
    }
}

/// Named column spans, always centered in the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPreset {
    /// All 12 columns.
    Full,
    /// 10 columns.
    Medium,
    /// 8 columns.
    Narrow,
    /// 6 columns.
    Tight,
}

impl ColumnPreset {
    pub fn span(self) -> u32 {
        match self {
            ColumnPreset::Full => 12,
            ColumnPreset::Medium => 10,
            ColumnPreset::Narrow => 8,
            ColumnPreset::Tight => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: u32,
    pub gutter: f32,
    pub area: Rect,
}

impl GridConfig {
    /// 12-column grid over `area`, gutter taken from the theme spacing scale.
    pub fn new(area: Rect, theme: &ThemeTokens) -> Self {
        Self {
            columns: GRID_COLUMNS,
            gutter: theme.spacing.grid_gutter(),
            area,
        }
    }

    pub fn column_width(&self) -> f32 {
        let gutters = self.gutter * (self.columns.saturating_sub(1)) as f32;
        ((self.area.width - gutters) / self.columns.max(1) as f32).max(0.0)
    }

    /// Width covered by `span` adjacent columns including the gutters between them.
    pub fn span_width(&self, span: u32) -> f32 {
        let span = span.clamp(1, self.columns);
        self.column_width() * span as f32 + self.gutter * (span - 1) as f32
    }

    /// X coordinate of the left edge of column `index` (0-based).
    pub fn column_x(&self, index: u32) -> f32 {
        self.area.x + (self.column_width() + self.gutter) * index.min(self.columns) as f32
    }
}

/// Places a centered `preset` box at `y` with `height`, clamped into the content area.
pub fn create_grid_box(
    preset: ColumnPreset,
    grid: &GridConfig,
    height: f32,
    y: f32,
) -> ElementPosition {
    let span = preset.span().min(grid.columns);
    let offset = (grid.columns - span) / 2;
    let x = grid.column_x(offset);
    let width = grid.span_width(span).min(grid.area.right() - x);

    let top = y.clamp(grid.area.y, grid.area.bottom());
    let height = height.max(0.0).min(grid.area.bottom() - top);

    let alignment = if preset == ColumnPreset::Full {
        Alignment::Left
    } else {
        Alignment::Center
    };
    ElementPosition::new(
        Rect::new(x, top, width, height),
        alignment,
        VerticalAlignment::Top,
    )
}
