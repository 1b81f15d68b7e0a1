use crate::errors::LayoutError;
use crate::layout::geometry::{Alignment, EPSILON};
use crate::layout::grid::{create_grid_box, ColumnPreset};
use crate::layout::result::{ElementContent, Placement};
use crate::layout::spec::{ContentSpec, TableSpec};
use crate::typography::TextRole;

use super::SlideFrame;

const TABLE_ROW_HEIGHT: f32 = 0.4;
const TABLE_PADDING: f32 = 0.2;

/// Height a table wants before clipping: header plus rows, plus padding.
pub fn table_height(row_count: usize) -> f32 {
    (row_count + 1) as f32 * TABLE_ROW_HEIGHT + TABLE_PADDING
}

fn check_shape(table: &TableSpec) -> Result<(), LayoutError> {
    if table.headers.is_empty() {
        return Err(LayoutError::EmptyTable);
    }
    let expected = table.headers.len();
    match table
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != expected)
    {
        Some((row, cells)) => Err(LayoutError::MalformedTable {
            row,
            expected,
            found: cells.len(),
        }),
        None => Ok(()),
    }
}

/// A single full-width table box, clipped to the free height.
pub fn place_table(frame: &SlideFrame<'_>, spec: &ContentSpec) -> Result<Placement, LayoutError> {
    let ContentSpec::ComparisonTable { table, .. } = spec else {
        return Err(LayoutError::ArchetypeMismatch {
            expected: "comparison-table",
        });
    };
    check_shape(table)?;

    let wanted = table_height(table.rows.len());
    let rect = create_grid_box(ColumnPreset::Full, &frame.grid, wanted, frame.cursor).rect();
    let element = frame.text_element(
        ElementContent::Table(table.clone()),
        TextRole::Body,
        rect,
        Alignment::Left,
    );

    let placement = Placement::empty(frame.cursor).with_element(element);
    if rect.height + EPSILON < wanted {
        Ok(placement.warn(format!(
            "Table needs {wanted:.2} units but was clipped to {:.2}; some rows will not be visible",
            rect.height
        )))
    } else {
        Ok(placement)
    }
}
