//! User-specified N×M grid. Each declared cell gets a sub-box and its content
//! is synthesized with the same primitives the other archetypes use.
//!
//! Missing cells and cells with unusable content become placeholders; only a
//! grid that cannot be partitioned at all is an error.

use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::LayoutError;
use crate::layout::geometry::{Alignment, Rect, VerticalAlignment};
use crate::layout::result::{ElementContent, Placement};
use crate::layout::spec::{CellContent, ContentSpec, GridCell, GridSpec};
use crate::typography::TextRole;

use super::{SlideFrame, BULLET_GAP, BULLET_ROW_HEIGHT, MIN_ROW_HEIGHT};

pub const MAX_GRID_DIMENSION: u32 = 6;

pub fn place_grid(frame: &SlideFrame<'_>, spec: &ContentSpec) -> Result<Placement, LayoutError> {
    let ContentSpec::Grid { grid, .. } = spec else {
        return Err(LayoutError::ArchetypeMismatch { expected: "grid" });
    };
    let valid = 1..=MAX_GRID_DIMENSION;
    if !valid.contains(&grid.columns) || !valid.contains(&grid.rows) {
        return Err(LayoutError::InvalidGrid {
            columns: grid.columns,
            rows: grid.rows,
            max: MAX_GRID_DIMENSION,
        });
    }

    let area = frame.area();
    let available = frame.available_height();
    let gap = frame.theme.spacing.cell_gap(grid.spacing);
    let cell_width = (area.width - gap * (grid.columns - 1) as f32) / grid.columns as f32;
    let cell_height = (available - gap * (grid.rows - 1) as f32) / grid.rows as f32;
    if cell_height < MIN_ROW_HEIGHT {
        return Err(LayoutError::NoSpace { available });
    }

    let (cells, placement) = index_cells(grid, Placement::empty(frame.cursor));

    Ok((0..grid.rows)
        .flat_map(|row| (0..grid.columns).map(move |column| (row, column)))
        .fold(placement, |placement, (row, column)| {
            let rect = Rect::new(
                area.x + column as f32 * (cell_width + gap),
                frame.cursor + row as f32 * (cell_height + gap),
                cell_width,
                cell_height,
            );
            match cells.get(&(row, column)) {
                Some(cell) => placement.merge(synthesize(frame, &cell.content, rect)),
                None => placement.with_element(frame.plain_element(
                    ElementContent::Placeholder {
                        reason: "empty".to_string(),
                    },
                    rect,
                )),
            }
        }))
}

/// Declared cells keyed by position. Out-of-range and duplicate cells are
/// dropped with a warning; the first declaration of a position wins.
fn index_cells(grid: &GridSpec, placement: Placement) -> (BTreeMap<(u32, u32), &GridCell>, Placement) {
    grid.cells
        .iter()
        .fold((BTreeMap::new(), placement), |(mut cells, placement), cell| {
            let key = (cell.row, cell.column);
            if cell.row >= grid.rows || cell.column >= grid.columns {
                debug!(row = cell.row, column = cell.column, "Grid cell out of range");
                let msg = format!(
                    "Cell ({}, {}) is outside the {}x{} grid and was ignored",
                    cell.row, cell.column, grid.columns, grid.rows
                );
                (cells, placement.warn(msg))
            } else if cells.contains_key(&key) {
                let msg = format!(
                    "Cell ({}, {}) is declared more than once; keeping the first",
                    cell.row, cell.column
                );
                (cells, placement.warn(msg))
            } else {
                cells.insert(key, cell);
                (cells, placement)
            }
        })
}

fn placeholder(frame: &SlideFrame<'_>, rect: Rect, reason: &str) -> Placement {
    Placement::empty(rect.y)
        .with_element(frame.plain_element(
            ElementContent::Placeholder {
                reason: reason.to_string(),
            },
            rect,
        ))
        .warn(format!("Grid cell replaced by placeholder: {reason}"))
}

/// Content for one cell, placed inside `rect`.
fn synthesize(frame: &SlideFrame<'_>, content: &CellContent, rect: Rect) -> Placement {
    let single = |element| Placement::empty(rect.y).with_element(element);
    match content {
        CellContent::Header { text } if !text.trim().is_empty() => single(frame.text_element(
            ElementContent::Heading { text: text.clone() },
            TextRole::Heading,
            rect,
            Alignment::Left,
        )),
        CellContent::Paragraph { text } if !text.trim().is_empty() => single(frame.text_element(
            ElementContent::Text { text: text.clone() },
            TextRole::Body,
            rect,
            Alignment::Left,
        )),
        CellContent::Header { .. } | CellContent::Paragraph { .. } => {
            placeholder(frame, rect, "text is empty")
        }
        CellContent::Bullets { items } => cell_bullets(frame, items, rect),
        CellContent::Metric(metric) if !metric.value.trim().is_empty() => {
            let mut card = frame.text_element(
                ElementContent::Metric(metric.clone()),
                TextRole::Metric,
                rect,
                Alignment::Center,
            );
            card.position.vertical_alignment = VerticalAlignment::Middle;
            single(card)
        }
        CellContent::Metric(_) => placeholder(frame, rect, "metric has no value"),
        CellContent::Image(image) if !image.src.trim().is_empty() => {
            single(frame.plain_element(ElementContent::Image(image.clone()), rect))
        }
        CellContent::Image(_) => placeholder(frame, rect, "image source is empty"),
        CellContent::Chart(chart) if chart.has_data() => {
            single(frame.plain_element(ElementContent::Chart(chart.clone()), rect))
        }
        CellContent::Chart(_) => placeholder(frame, rect, "chart has no data"),
        CellContent::Empty => single(frame.plain_element(
            ElementContent::Placeholder {
                reason: "empty".to_string(),
            },
            rect,
        )),
    }
}

/// Bullet rows squeezed into a cell. Rows shrink down to `MIN_ROW_HEIGHT`;
/// items that still do not fit are dropped with a warning.
fn cell_bullets(frame: &SlideFrame<'_>, items: &[String], rect: Rect) -> Placement {
    let items: Vec<&str> = items
        .iter()
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .collect();
    if items.is_empty() {
        return placeholder(frame, rect, "bullet list is empty");
    }

    let fit = ((rect.height + BULLET_GAP) / (MIN_ROW_HEIGHT + BULLET_GAP) + 1e-3).floor() as usize;
    let shown = items.len().min(fit.max(1));
    let row_height = ((rect.height - BULLET_GAP * (shown - 1) as f32) / shown as f32)
        .min(BULLET_ROW_HEIGHT)
        .max(MIN_ROW_HEIGHT);

    let placement = Placement::empty(rect.y).with_elements(frame.stack_rows(
        items[..shown].iter().copied(),
        rect.x,
        rect.width,
        rect.y,
        row_height,
    ));
    if shown < items.len() {
        placement.warn(format!(
            "{} of {} bullets do not fit their grid cell and were dropped",
            items.len() - shown,
            items.len()
        ))
    } else {
        placement
    }
}
