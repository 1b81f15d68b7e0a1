use crate::errors::LayoutError;
use crate::layout::geometry::{Alignment, VerticalAlignment};
use crate::layout::grid::{create_grid_box, ColumnPreset};
use crate::layout::result::{ElementContent, Placement};
use crate::layout::spec::ContentSpec;
use crate::typography::TextRole;

use super::SlideFrame;

const SUBTITLE_HEIGHT: f32 = 0.6;

/// Title slide: the title itself is the hero content, centered in the title
/// box, with an optional subtitle on a medium column below it.
pub fn place_title(frame: &SlideFrame<'_>, spec: &ContentSpec) -> Result<Placement, LayoutError> {
    let ContentSpec::Title { title, subtitle } = spec else {
        return Err(LayoutError::ArchetypeMismatch { expected: "title" });
    };

    let mut hero = frame.text_element(
        ElementContent::Title {
            text: title.clone(),
        },
        TextRole::Hero,
        frame.title_box,
        Alignment::Center,
    );
    hero.position.vertical_alignment = VerticalAlignment::Middle;

    let placement = Placement::empty(frame.cursor).with_element(hero);

    match subtitle.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => {
            let rect = create_grid_box(ColumnPreset::Medium, &frame.grid, SUBTITLE_HEIGHT, frame.cursor)
                .rect();
            Ok(placement.with_element(frame.text_element(
                ElementContent::Subtitle {
                    text: text.to_string(),
                },
                TextRole::Subtitle,
                rect,
                Alignment::Center,
            )))
        }
        _ => Ok(placement),
    }
}
