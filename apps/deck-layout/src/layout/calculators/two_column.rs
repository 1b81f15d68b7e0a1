use crate::errors::LayoutError;
use crate::layout::geometry::{Alignment, Rect};
use crate::layout::result::{ColumnSide, ElementContent, Placement};
use crate::layout::spec::ContentSpec;
use crate::typography::TextRole;

use super::{SlideFrame, MIN_ROW_HEIGHT};

/// Two equal columns separated by the theme column gap. A side is placed
/// only when its column is present and has content.
pub fn place_two_column(
    frame: &SlideFrame<'_>,
    spec: &ContentSpec,
) -> Result<Placement, LayoutError> {
    let ContentSpec::TwoColumn { left, right, .. } = spec else {
        return Err(LayoutError::ArchetypeMismatch {
            expected: "two-column",
        });
    };
    let height = frame.require_space(MIN_ROW_HEIGHT)?;
    let area = frame.area();
    let gap = frame.theme.spacing.column_gap();
    let width = (area.width - gap) / 2.0;

    let sides = [
        (ColumnSide::Left, left, area.x),
        (ColumnSide::Right, right, area.x + width + gap),
    ];

    Ok(sides
        .into_iter()
        .fold(Placement::empty(frame.cursor), |placement, (side, column, x)| {
            match column {
                Some(column) if !column.is_empty() => placement.with_element(frame.text_element(
                    ElementContent::Column {
                        side,
                        column: column.clone(),
                    },
                    TextRole::Body,
                    Rect::new(x, frame.cursor, width, height),
                    Alignment::Left,
                )),
                Some(_) => placement.warn(format!("{side:?} column is empty and was skipped")),
                None => placement,
            }
        }))
}
