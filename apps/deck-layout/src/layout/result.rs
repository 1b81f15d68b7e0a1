//! Layout output types and the value builders calculators return.

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;
use crate::layout::geometry::ElementPosition;
use crate::layout::spec::{Archetype, ChartSpec, ColumnSpec, ImageRef, MetricSpec, TableSpec};
use crate::typography::TextStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSide {
    Left,
    Right,
}

/// Payload of one placed box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementContent {
    Title { text: String },
    Subtitle { text: String },
    Heading { text: String },
    Text { text: String },
    Bullet { text: String, index: usize },
    Column { side: ColumnSide, column: ColumnSpec },
    Image(ImageRef),
    Chart(ChartSpec),
    Table(TableSpec),
    Metric(MetricSpec),
    /// Stand-in for a cell or block whose content was missing or invalid.
    Placeholder { reason: String },
}

impl ElementContent {
    /// Visible text, if the element carries any.
    pub fn text(&self) -> Option<String> {
        match self {
            ElementContent::Title { text }
            | ElementContent::Subtitle { text }
            | ElementContent::Heading { text }
            | ElementContent::Text { text }
            | ElementContent::Bullet { text, .. } => Some(text.clone()),
            ElementContent::Column { column, .. } => Some(column.joined_text()),
            ElementContent::Metric(m) => Some(format!("{} {}", m.value, m.label)),
            ElementContent::Table(t) => Some(
                t.headers
                    .iter()
                    .chain(t.rows.iter().flatten())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            ElementContent::Image(_)
            | ElementContent::Chart(_)
            | ElementContent::Placeholder { .. } => None,
        }
    }

    /// Text that wraps inside its box and so can be measured against it.
    pub fn is_flowing_text(&self) -> bool {
        matches!(
            self,
            ElementContent::Title { .. }
                | ElementContent::Subtitle { .. }
                | ElementContent::Heading { .. }
                | ElementContent::Text { .. }
                | ElementContent::Bullet { .. }
                | ElementContent::Column { .. }
        )
    }

    pub fn char_count(&self) -> usize {
        self.text().map_or(0, |t| t.chars().count())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedElement {
    pub position: ElementPosition,
    pub content: ElementContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetadata {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub shape_count: usize,
    /// Characters placed inside the content area.
    pub used_text: usize,
    /// Characters in boxes that cross the content area.
    pub overflow_text: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub archetype: Archetype,
    pub title: PlacedElement,
    pub content: Vec<PlacedElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub total_height: f32,
    pub is_overflowing: bool,
    pub recommendations: Vec<String>,
    pub metadata: LayoutMetadata,
}

impl LayoutResult {
    /// Every rendered box. The title box is skipped when the content already
    /// carries the title text, as on title slides.
    pub fn shapes(&self) -> impl Iterator<Item = &PlacedElement> {
        let title_in_content = self
            .content
            .iter()
            .any(|e| matches!(e.content, ElementContent::Title { .. }));
        let title = (!title_in_content).then_some(&self.title);
        title.into_iter().chain(self.content.iter())
    }
}

/// Layout for one slide: either what the calculator produced, or the
/// title-only fallback together with the error that caused it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LayoutOutcome {
    Complete(LayoutResult),
    Fallback {
        result: LayoutResult,
        cause: LayoutError,
    },
}

impl LayoutOutcome {
    pub fn result(&self) -> &LayoutResult {
        match self {
            LayoutOutcome::Complete(result) | LayoutOutcome::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> LayoutResult {
        match self {
            LayoutOutcome::Complete(result) | LayoutOutcome::Fallback { result, .. } => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, LayoutOutcome::Fallback { .. })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

/// Warnings and recommendations produced by one step, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Diagnostics {
    pub fn from_warnings(warnings: Vec<String>) -> Self {
        Self {
            warnings,
            recommendations: Vec::new(),
        }
    }

    pub fn warning(mut self, msg: impl Into<String>) -> Self {
        self.warnings.push(msg.into());
        self
    }

    pub fn recommendation(mut self, msg: impl Into<String>) -> Self {
        self.recommendations.push(msg.into());
        self
    }

    /// `self` followed by `other`.
    pub fn merge(mut self, other: Diagnostics) -> Self {
        self.warnings.extend(other.warnings);
        self.recommendations.extend(other.recommendations);
        self
    }
}

/// What a calculator hands back to the engine: boxes, the cursor after the
/// last one, and anything worth reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub elements: Vec<PlacedElement>,
    pub cursor: f32,
    pub diagnostics: Diagnostics,
}

impl Placement {
    pub fn empty(cursor: f32) -> Self {
        Self {
            elements: Vec::new(),
            cursor,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Appends `element`, advancing the cursor past its bottom edge.
    pub fn with_element(mut self, element: PlacedElement) -> Self {
        self.cursor = self.cursor.max(element.position.bottom());
        self.elements.push(element);
        self
    }

    pub fn with_elements(self, elements: impl IntoIterator<Item = PlacedElement>) -> Self {
        elements.into_iter().fold(self, Placement::with_element)
    }

    pub fn warn(mut self, msg: impl Into<String>) -> Self {
        self.diagnostics = self.diagnostics.warning(msg);
        self
    }

    pub fn merge(self, other: Placement) -> Self {
        let cursor = other.cursor;
        let mut merged = self.with_elements(other.elements);
        merged.cursor = merged.cursor.max(cursor);
        merged.diagnostics = merged.diagnostics.merge(other.diagnostics);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::Rect;

    fn element(y: f32, content: ElementContent) -> PlacedElement {
        PlacedElement {
            position: ElementPosition::top_left(Rect::new(0.5, y, 4.0, 0.4)),
            content,
            style: None,
        }
    }

    fn text(t: &str) -> ElementContent {
        ElementContent::Text {
            text: t.to_string(),
        }
    }

    #[test]
    fn test_placement_cursor_tracks_lowest_edge() {
        let p = Placement::empty(1.0)
            .with_element(element(2.0, text("a")))
            .with_element(element(1.2, text("b")));
        assert!((p.cursor - 2.4).abs() < 1e-6);
        assert_eq!(p.elements.len(), 2);
    }

    #[test]
    fn test_placement_merge_preserves_order() {
        let a = Placement::empty(1.0)
            .with_element(element(1.0, text("a")))
            .warn("first");
        let b = Placement::empty(1.0)
            .with_element(element(3.0, text("b")))
            .warn("second");
        let merged = a.merge(b);
        assert_eq!(merged.diagnostics.warnings, vec!["first", "second"]);
        assert_eq!(merged.elements[1].content, text("b"));
        assert!((merged.cursor - 3.4).abs() < 1e-6);
    }

    #[test]
    fn test_element_text_and_counts() {
        let metric = ElementContent::Metric(MetricSpec {
            value: "42%".to_string(),
            label: "Growth".to_string(),
            trend: None,
        });
        assert_eq!(metric.char_count(), 10);
        assert!(!metric.is_flowing_text());
        let placeholder = ElementContent::Placeholder {
            reason: "empty".to_string(),
        };
        assert_eq!(placeholder.char_count(), 0);
    }

    #[test]
    fn test_element_content_serializes_with_kind_tag() {
        let json = serde_json::to_value(ElementContent::Bullet {
            text: "x".to_string(),
            index: 0,
        })
        .unwrap();
        assert_eq!(json["kind"], "bullet");
        assert_eq!(json["index"], 0);
    }
}
