use crate::errors::LayoutError;
use crate::layout::geometry::{Alignment, Rect};
use crate::layout::result::{ElementContent, Placement};
use crate::layout::spec::ContentSpec;
use crate::typography::{derive_text_style, StyleOptions, TextRole};

use super::{SlideFrame, BULLET_GAP, BULLET_ROW_HEIGHT};

const MIN_PARAGRAPH_HEIGHT: f32 = 0.4;

/// Fallback layout: a measured paragraph box, then stacked bullets.
pub fn place_single_column(
    frame: &SlideFrame<'_>,
    spec: &ContentSpec,
) -> Result<Placement, LayoutError> {
    let ContentSpec::SingleColumn {
        paragraph, bullets, ..
    } = spec
    else {
        return Err(LayoutError::ArchetypeMismatch {
            expected: "single-column",
        });
    };
    let area = frame.area();

    let placement = match paragraph.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => {
            let style = derive_text_style(TextRole::Body, frame.theme, &StyleOptions::for_text(text));
            let height = frame
                .measurer
                .estimate_height(text, &style, area.width)
                .max(MIN_PARAGRAPH_HEIGHT);
            let element = frame.text_element(
                ElementContent::Text {
                    text: text.to_string(),
                },
                TextRole::Body,
                Rect::new(area.x, frame.cursor, area.width, height),
                Alignment::Left,
            );
            Placement::empty(frame.cursor).with_element(element)
        }
        _ => Placement::empty(frame.cursor),
    };

    let top = if placement.elements.is_empty() {
        placement.cursor
    } else {
        placement.cursor + BULLET_GAP
    };
    let rows = frame.stack_rows(
        bullets.iter().map(String::as_str),
        area.x,
        area.width,
        top,
        BULLET_ROW_HEIGHT,
    );
    Ok(placement.with_elements(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculators::test_support::frame;
    use crate::layout::spec::Archetype;
    use crate::theme::default_theme;

    #[test]
    fn test_paragraph_then_bullets() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::SingleColumn, &theme);
        let spec = ContentSpec::SingleColumn {
            title: "Notes".to_string(),
            paragraph: Some("A short paragraph.".to_string()),
            bullets: vec!["one".to_string(), "two".to_string()],
        };
        let p = place_single_column(&f, &spec).unwrap();
        assert_eq!(p.elements.len(), 3);
        let para = p.elements[0].position;
        assert!((para.height - 0.4).abs() < 1e-5);
        assert!((p.elements[1].position.y - (para.bottom() + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_long_paragraph_grows_with_measured_height() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::SingleColumn, &theme);
        let spec = ContentSpec::SingleColumn {
            title: "Notes".to_string(),
            paragraph: Some("word ".repeat(80)),
            bullets: vec![],
        };
        let p = place_single_column(&f, &spec).unwrap();
        assert!(p.elements[0].position.height > 0.4);
    }

    #[test]
    fn test_bullets_only_start_at_cursor() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::SingleColumn, &theme);
        let spec = ContentSpec::SingleColumn {
            title: "Notes".to_string(),
            paragraph: None,
            bullets: vec!["one".to_string()],
        };
        let p = place_single_column(&f, &spec).unwrap();
        assert_eq!(p.elements[0].position.y, f.cursor);
    }
}
