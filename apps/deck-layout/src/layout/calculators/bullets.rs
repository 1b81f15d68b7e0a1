use crate::errors::LayoutError;
use crate::layout::result::Placement;
use crate::layout::spec::ContentSpec;

use super::{SlideFrame, BULLET_ROW_HEIGHT};

/// One full-width row per bullet, stacked from the cursor. Rows are never
/// squeezed; too many bullets simply run past the content area.
pub fn place_bullets(frame: &SlideFrame<'_>, spec: &ContentSpec) -> Result<Placement, LayoutError> {
    let ContentSpec::Bullets { bullets, .. } = spec else {
        return Err(LayoutError::ArchetypeMismatch { expected: "bullets" });
    };
    let area = frame.area();
    let rows = frame.stack_rows(
        bullets.iter().map(String::as_str),
        area.x,
        area.width,
        frame.cursor,
        BULLET_ROW_HEIGHT,
    );
    Ok(Placement::empty(frame.cursor).with_elements(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculators::test_support::frame;
    use crate::layout::spec::Archetype;
    use crate::theme::default_theme;

    fn spec(n: usize) -> ContentSpec {
        ContentSpec::Bullets {
            title: "Agenda".to_string(),
            bullets: (0..n).map(|i| format!("Point number {i}")).collect(),
        }
    }

    #[test]
    fn test_rows_start_at_cursor_with_fixed_pitch() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::Bullets, &theme);
        let p = place_bullets(&f, &spec(3)).unwrap();
        assert_eq!(p.elements.len(), 3);
        assert!((p.elements[0].position.y - 1.6).abs() < 1e-5);
        assert!((p.elements[2].position.y - 2.6).abs() < 1e-5);
        assert!((p.cursor - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_bullets_leave_cursor() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::Bullets, &theme);
        let p = place_bullets(&f, &spec(0)).unwrap();
        assert!(p.elements.is_empty());
        assert_eq!(p.cursor, f.cursor);
    }
}
