use crate::errors::LayoutError;
use crate::layout::geometry::Rect;
use crate::layout::result::{ElementContent, Placement};
use crate::layout::spec::ContentSpec;

use super::{SlideFrame, MIN_ROW_HEIGHT};

const CHART_WIDTH_SHARE: f32 = 0.8;

/// One centered chart box, 80% of the content width, filling the free height.
pub fn place_chart(frame: &SlideFrame<'_>, spec: &ContentSpec) -> Result<Placement, LayoutError> {
    let ContentSpec::Chart { chart, .. } = spec else {
        return Err(LayoutError::ArchetypeMismatch { expected: "chart" });
    };
    let height = frame.require_space(MIN_ROW_HEIGHT)?;
    let area = frame.area();
    let width = area.width * CHART_WIDTH_SHARE;
    let rect = Rect::new(area.x + (area.width - width) / 2.0, frame.cursor, width, height);

    let placement = Placement::empty(frame.cursor);
    if chart.has_data() {
        Ok(placement.with_element(frame.plain_element(ElementContent::Chart(chart.clone()), rect)))
    } else {
        Ok(placement.with_element(frame.plain_element(
            ElementContent::Placeholder {
                reason: "chart has no data".to_string(),
            },
            rect,
        )))
    }
}
