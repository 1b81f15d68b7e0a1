//! Per-archetype placement strategies.
//!
//! Every strategy has the same shape: it receives the slide frame (content
//! area, grid, theme, measurer and the cursor below the title) plus the content
//! spec, and returns a [`Placement`]. Strategies never touch the title box and
//! never clip their own boxes to the content area; the engine decides what
//! counts as overflow.

mod bullets;
mod chart;
mod grid_cells;
mod image_text;
mod metrics;
mod single_column;
mod table;
mod title;
mod two_column;

pub use bullets::place_bullets;
pub use chart::place_chart;
pub use grid_cells::place_grid;
pub use image_text::{place_image_left, place_image_right};
pub use metrics::place_metrics;
pub use single_column::place_single_column;
pub use table::place_table;
pub use title::place_title;
pub use two_column::place_two_column;

use crate::errors::LayoutError;
use crate::layout::geometry::{Alignment, ElementPosition, Rect, VerticalAlignment};
use crate::layout::grid::{GridConfig, LayoutConfig};
use crate::layout::result::{ElementContent, PlacedElement, Placement};
use crate::layout::spec::ContentSpec;
use crate::theme::ThemeTokens;
use crate::typography::{derive_text_style, StyleOptions, TextMeasurer, TextRole};

/// Fixed bullet row height and the gap between rows, in canvas units.
pub const BULLET_ROW_HEIGHT: f32 = 0.4;
pub const BULLET_GAP: f32 = 0.1;
/// Rows never shrink below this when squeezed into a grid cell.
pub const MIN_ROW_HEIGHT: f32 = 0.2;

pub type Strategy = fn(&SlideFrame<'_>, &ContentSpec) -> Result<Placement, LayoutError>;

/// Everything a strategy may read about the slide it is filling.
pub struct SlideFrame<'a> {
    pub config: LayoutConfig,
    pub grid: GridConfig,
    pub theme: &'a ThemeTokens,
    pub measurer: &'a dyn TextMeasurer,
    /// Box reserved for the slide title.
    pub title_box: Rect,
    /// Top of the free space below the title.
    pub cursor: f32,
}

impl SlideFrame<'_> {
    pub fn area(&self) -> Rect {
        self.config.content_area
    }

    /// Vertical space between the cursor and the content area bottom.
    pub fn available_height(&self) -> f32 {
        self.area().bottom() - self.cursor
    }

    /// Fails with `NoSpace` when less than `min` units remain below the cursor.
    pub fn require_space(&self, min: f32) -> Result<f32, LayoutError> {
        let available = self.available_height();
        if available < min {
            return Err(LayoutError::NoSpace { available });
        }
        Ok(available)
    }

    /// A box carrying text, styled for `role` and the length of that text.
    pub fn text_element(
        &self,
        content: ElementContent,
        role: TextRole,
        rect: Rect,
        alignment: Alignment,
    ) -> PlacedElement {
        let text = content.text().unwrap_or_default();
        let style = derive_text_style(role, self.theme, &StyleOptions::for_text(&text));
        PlacedElement {
            position: ElementPosition::new(rect, alignment, VerticalAlignment::Top),
            content,
            style: Some(style),
        }
    }

    /// A box with no text style (images, charts, placeholders).
    pub fn plain_element(&self, content: ElementContent, rect: Rect) -> PlacedElement {
        PlacedElement {
            position: ElementPosition::new(rect, Alignment::Center, VerticalAlignment::Middle),
            content,
            style: None,
        }
    }

    /// Stacks one bullet box per non-empty item from `top` downwards.
    pub fn stack_rows<'s>(
        &self,
        items: impl IntoIterator<Item = &'s str>,
        x: f32,
        width: f32,
        top: f32,
        row_height: f32,
    ) -> Vec<PlacedElement> {
        items
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .enumerate()
            .map(|(index, text)| {
                let y = top + index as f32 * (row_height + BULLET_GAP);
                self.text_element(
                    ElementContent::Bullet {
                        text: text.to_string(),
                        index,
                    },
                    TextRole::Bullet,
                    Rect::new(x, y, width, row_height),
                    Alignment::Left,
                )
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::frame;
    use crate::layout::spec::Archetype;
    use crate::theme::default_theme;

    #[test]
    fn test_stack_rows_skips_blank_items() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::Bullets, &theme);
        let rows = f.stack_rows(["a", " ", "b"], 0.5, 9.0, 1.6, 0.4);
        assert_eq!(rows.len(), 2);
        assert!((rows[1].position.y - 2.1).abs() < 1e-5);
    }

    #[test]
    fn test_require_space() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::Chart, &theme);
        assert!(f.require_space(1.0).is_ok());
        assert!(f.require_space(10.0).is_err());
    }
}
