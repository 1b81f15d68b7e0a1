//! Slide content specification: one tagged variant per layout archetype.
//!
//! Upstream content generation hands us JSON shaped like
//! `{"layout": "bullets", "title": "...", "bullets": [...]}`. Only the fields
//! relevant to the tagged archetype are read; everything else is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::EngineError;
use crate::theme::SpacingPreset;

// ────────────────────────────────────────────────────────────────────────────
// Archetypes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    Title,
    Bullets,
    TwoColumn,
    ImageLeft,
    ImageRight,
    Chart,
    ComparisonTable,
    Grid,
    Metrics,
    SingleColumn,
}

impl Archetype {
    pub const ALL: [Archetype; 10] = [
        Archetype::Title,
        Archetype::Bullets,
        Archetype::TwoColumn,
        Archetype::ImageLeft,
        Archetype::ImageRight,
        Archetype::Chart,
        Archetype::ComparisonTable,
        Archetype::Grid,
        Archetype::Metrics,
        Archetype::SingleColumn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Title => "title",
            Archetype::Bullets => "bullets",
            Archetype::TwoColumn => "two-column",
            Archetype::ImageLeft => "image-left",
            Archetype::ImageRight => "image-right",
            Archetype::Chart => "chart",
            Archetype::ComparisonTable => "comparison-table",
            Archetype::Grid => "grid",
            Archetype::Metrics => "metrics",
            Archetype::SingleColumn => "single-column",
        }
    }

    /// Resolves a layout name, accepting common aliases. Unknown names map to
    /// the single-column fallback.
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "title" | "title-slide" | "cover" => Archetype::Title,
            "bullets" | "bullet-list" | "bullet" | "list" => Archetype::Bullets,
            "two-column" | "two-columns" | "columns" => Archetype::TwoColumn,
            "image-left" | "image-text" => Archetype::ImageLeft,
            "image-right" | "text-image" => Archetype::ImageRight,
            "chart" | "chart-focus" => Archetype::Chart,
            "comparison-table" | "table" | "comparison" => Archetype::ComparisonTable,
            "grid" | "grid-of-cells" | "custom-grid" => Archetype::Grid,
            "metrics" | "metrics-dashboard" | "dashboard" => Archetype::Metrics,
            _ => Archetype::SingleColumn,
        }
    }

    pub fn is_title(self) -> bool {
        self == Archetype::Title
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-specs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

impl ColumnSpec {
    pub fn is_empty(&self) -> bool {
        self.heading.as_deref().map_or(true, |h| h.trim().is_empty())
            && self.paragraph.as_deref().map_or(true, |p| p.trim().is_empty())
            && self.bullets.iter().all(|b| b.trim().is_empty())
    }

    /// All text in reading order, newline-separated.
    pub fn joined_text(&self) -> String {
        self.heading
            .iter()
            .chain(self.paragraph.iter())
            .chain(self.bullets.iter())
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTextSpec {
    pub title: String,
    pub image: ImageRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.values.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/// Content of a single grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellContent {
    Header { text: String },
    Bullets { items: Vec<String> },
    Paragraph { text: String },
    Metric(MetricSpec),
    Image(ImageRef),
    Chart(ChartSpec),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
    pub content: CellContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    #[serde(default)]
    pub spacing: SpacingPreset,
    #[serde(default)]
    pub cells: Vec<GridCell>,
}

// ────────────────────────────────────────────────────────────────────────────
// Content spec
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "kebab-case")]
pub enum ContentSpec {
    Title {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },
    Bullets {
        title: String,
        #[serde(default)]
        bullets: Vec<String>,
    },
    TwoColumn {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        left: Option<ColumnSpec>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right: Option<ColumnSpec>,
    },
    ImageLeft(ImageTextSpec),
    ImageRight(ImageTextSpec),
    Chart {
        title: String,
        chart: ChartSpec,
    },
    ComparisonTable {
        title: String,
        table: TableSpec,
    },
    Grid {
        title: String,
        grid: GridSpec,
    },
    Metrics {
        title: String,
        #[serde(default)]
        metrics: Vec<MetricSpec>,
    },
    SingleColumn {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        paragraph: Option<String>,
        #[serde(default)]
        bullets: Vec<String>,
    },
}

impl ContentSpec {
    pub fn archetype(&self) -> Archetype {
        match self {
            ContentSpec::Title { .. } => Archetype::Title,
            ContentSpec::Bullets { .. } => Archetype::Bullets,
            ContentSpec::TwoColumn { .. } => Archetype::TwoColumn,
            ContentSpec::ImageLeft(_) => Archetype::ImageLeft,
            ContentSpec::ImageRight(_) => Archetype::ImageRight,
            ContentSpec::Chart { .. } => Archetype::Chart,
            ContentSpec::ComparisonTable { .. } => Archetype::ComparisonTable,
            ContentSpec::Grid { .. } => Archetype::Grid,
            ContentSpec::Metrics { .. } => Archetype::Metrics,
            ContentSpec::SingleColumn { .. } => Archetype::SingleColumn,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentSpec::Title { title, .. }
            | ContentSpec::Bullets { title, .. }
            | ContentSpec::TwoColumn { title, .. }
            | ContentSpec::Chart { title, .. }
            | ContentSpec::ComparisonTable { title, .. }
            | ContentSpec::Grid { title, .. }
            | ContentSpec::Metrics { title, .. }
            | ContentSpec::SingleColumn { title, .. } => title,
            ContentSpec::ImageLeft(spec) | ContentSpec::ImageRight(spec) => &spec.title,
        }
    }

    /// Parses loosely-tagged JSON. Layout aliases are canonicalized, and a
    /// missing or unknown `layout` tag selects the single-column fallback.
    pub fn from_value(mut value: Value) -> Result<Self, EngineError> {
        let obj = value.as_object_mut().ok_or_else(|| {
            EngineError::MalformedContent("slide spec must be a JSON object".to_string())
        })?;
        let archetype = obj
            .get("layout")
            .and_then(Value::as_str)
            .map(Archetype::from_name)
            .unwrap_or(Archetype::SingleColumn);
        obj.insert(
            "layout".to_string(),
            Value::String(archetype.name().to_string()),
        );
        serde_json::from_value(value).map_err(|e| EngineError::MalformedContent(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_archetype_names_round_trip() {
        for a in Archetype::ALL {
            assert_eq!(Archetype::from_name(a.name()), a);
        }
    }

    #[test]
    fn test_archetype_aliases_and_unknown() {
        assert_eq!(Archetype::from_name("Bullet_List"), Archetype::Bullets);
        assert_eq!(Archetype::from_name("dashboard"), Archetype::Metrics);
        assert_eq!(Archetype::from_name("table"), Archetype::ComparisonTable);
        assert_eq!(Archetype::from_name("quote"), Archetype::SingleColumn);
    }

    #[test]
    fn test_parse_bullets_spec() {
        let spec = ContentSpec::from_value(json!({
            "layout": "bullets",
            "title": "Agenda",
            "bullets": ["One", "Two"]
        }))
        .unwrap();
        assert_eq!(spec.archetype(), Archetype::Bullets);
        assert_eq!(spec.title(), "Agenda");
    }

    #[test]
    fn test_unknown_layout_becomes_single_column() {
        let spec = ContentSpec::from_value(json!({
            "layout": "quote",
            "title": "Words",
            "paragraph": "Simplicity is prerequisite for reliability."
        }))
        .unwrap();
        match spec {
            ContentSpec::SingleColumn { paragraph, bullets, .. } => {
                assert!(paragraph.is_some());
                assert!(bullets.is_empty());
            }
            other => panic!("expected single column, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_layout_becomes_single_column() {
        let spec = ContentSpec::from_value(json!({ "title": "Untitled" })).unwrap();
        assert_eq!(spec.archetype(), Archetype::SingleColumn);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(ContentSpec::from_value(json!(["a"])).is_err());
    }

    #[test]
    fn test_image_variant_parses_flat_fields() {
        let spec = ContentSpec::from_value(json!({
            "layout": "image-right",
            "title": "Product",
            "image": { "src": "product.png" },
            "bullets": ["Fast"]
        }))
        .unwrap();
        assert_eq!(spec.archetype(), Archetype::ImageRight);
        assert_eq!(spec.title(), "Product");
    }

    #[test]
    fn test_grid_cells_parse_with_type_tags() {
        let spec = ContentSpec::from_value(json!({
            "layout": "grid",
            "title": "Overview",
            "grid": {
                "columns": 2,
                "rows": 1,
                "spacing": "tight",
                "cells": [
                    { "row": 0, "column": 0, "content": { "type": "header", "text": "Hi" } },
                    { "row": 0, "column": 1, "content": { "type": "metric", "value": "42%", "label": "Growth" } }
                ]
            }
        }))
        .unwrap();
        match spec {
            ContentSpec::Grid { grid, .. } => {
                assert_eq!(grid.spacing, SpacingPreset::Tight);
                assert_eq!(grid.cells.len(), 2);
                assert!(matches!(grid.cells[1].content, CellContent::Metric(_)));
            }
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn test_column_spec_emptiness() {
        assert!(ColumnSpec::default().is_empty());
        let col = ColumnSpec {
            bullets: vec!["x".to_string()],
            ..Default::default()
        };
        assert!(!col.is_empty());
        assert_eq!(col.joined_text(), "x");
    }
}
