use crate::errors::LayoutError;
use crate::layout::geometry::{Alignment, Rect};
use crate::layout::result::{ElementContent, Placement};
use crate::layout::spec::{ContentSpec, ImageTextSpec};
use crate::typography::TextRole;

use super::{SlideFrame, MIN_ROW_HEIGHT};

const IMAGE_WIDTH_SHARE: f32 = 0.45;
const TEXT_WIDTH_SHARE: f32 = 0.5;
const IMAGE_HEIGHT_SHARE: f32 = 0.8;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ImageSide {
    Left,
    Right,
}

pub fn place_image_left(
    frame: &SlideFrame<'_>,
    spec: &ContentSpec,
) -> Result<Placement, LayoutError> {
    match spec {
        ContentSpec::ImageLeft(s) => place(frame, s, ImageSide::Left),
        _ => Err(LayoutError::ArchetypeMismatch {
            expected: "image-left",
        }),
    }
}

pub fn place_image_right(
    frame: &SlideFrame<'_>,
    spec: &ContentSpec,
) -> Result<Placement, LayoutError> {
    match spec {
        ContentSpec::ImageRight(s) => place(frame, s, ImageSide::Right),
        _ => Err(LayoutError::ArchetypeMismatch {
            expected: "image-right",
        }),
    }
}

/// Image takes 45% of the width and 80% of the free height, vertically
/// centered; the text box takes 50% and the full free height on the other side.
fn place(
    frame: &SlideFrame<'_>,
    spec: &ImageTextSpec,
    side: ImageSide,
) -> Result<Placement, LayoutError> {
    let available = frame.require_space(MIN_ROW_HEIGHT)?;
    let area = frame.area();
    let image_width = area.width * IMAGE_WIDTH_SHARE;
    let text_width = area.width * TEXT_WIDTH_SHARE;
    let image_height = available * IMAGE_HEIGHT_SHARE;

    let (image_x, text_x) = match side {
        ImageSide::Left => (area.x, area.right() - text_width),
        ImageSide::Right => (area.right() - image_width, area.x),
    };
    let image_rect = Rect::new(
        image_x,
        frame.cursor + (available - image_height) / 2.0,
        image_width,
        image_height,
    );

    let image = if spec.image.src.trim().is_empty() {
        frame.plain_element(
            ElementContent::Placeholder {
                reason: "image source is empty".to_string(),
            },
            image_rect,
        )
    } else {
        frame.plain_element(ElementContent::Image(spec.image.clone()), image_rect)
    };

    let placement = Placement::empty(frame.cursor).with_element(image);

    let text = spec
        .text
        .iter()
        .chain(spec.bullets.iter())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() {
        return Ok(placement);
    }

    Ok(placement.with_element(frame.text_element(
        ElementContent::Text { text },
        TextRole::Body,
        Rect::new(text_x, frame.cursor, text_width, available),
        Alignment::Left,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculators::test_support::frame;
    use crate::layout::spec::{Archetype, ImageRef};
    use crate::theme::default_theme;

    fn spec(text: Option<&str>) -> ImageTextSpec {
        ImageTextSpec {
            title: "Product".to_string(),
            image: ImageRef {
                src: "hero.png".to_string(),
                alt: Some("Product shot".to_string()),
            },
            text: text.map(str::to_string),
            bullets: vec![],
        }
    }

    #[test]
    fn test_image_left_geometry() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::ImageLeft, &theme);
        let p = place_image_left(&f, &ContentSpec::ImageLeft(spec(Some("Fast and small")))).unwrap();
        assert_eq!(p.elements.len(), 2);
        let image = p.elements[0].position.rect();
        let text = p.elements[1].position.rect();
        assert_eq!(image.x, f.area().x);
        assert!((image.width - 4.05).abs() < 1e-5);
        assert!((text.width - 4.5).abs() < 1e-5);
        assert!((text.right() - f.area().right()).abs() < 1e-5);
        assert!((image.height - f.available_height() * 0.8).abs() < 1e-5);
        assert_eq!(image.intersection_area(&text), 0.0);
    }

    #[test]
    fn test_image_right_mirrors() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::ImageRight, &theme);
        let p =
            place_image_right(&f, &ContentSpec::ImageRight(spec(Some("Fast")))).unwrap();
        let image = p.elements[0].position.rect();
        let text = p.elements[1].position.rect();
        assert!((image.right() - f.area().right()).abs() < 1e-5);
        assert_eq!(text.x, f.area().x);
    }

    #[test]
    fn test_image_without_text_is_single_box() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::ImageLeft, &theme);
        let p = place_image_left(&f, &ContentSpec::ImageLeft(spec(None))).unwrap();
        assert_eq!(p.elements.len(), 1);
        assert!(matches!(p.elements[0].content, ElementContent::Image(_)));
    }

    #[test]
    fn test_empty_src_becomes_placeholder() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::ImageLeft, &theme);
        let mut s = spec(None);
        s.image.src = String::new();
        let p = place_image_left(&f, &ContentSpec::ImageLeft(s)).unwrap();
        assert!(matches!(
            p.elements[0].content,
            ElementContent::Placeholder { .. }
        ));
    }
}
