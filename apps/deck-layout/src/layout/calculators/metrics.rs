use crate::errors::LayoutError;
use crate::layout::geometry::{Alignment, Rect, VerticalAlignment};
use crate::layout::result::{ElementContent, Placement};
use crate::layout::spec::ContentSpec;
use crate::typography::TextRole;

use super::SlideFrame;

const CARDS_PER_ROW: usize = 4;
const MAX_CARD_HEIGHT: f32 = 1.6;
const MIN_CARD_HEIGHT: f32 = 0.6;

/// Dashboard of metric cards, up to four per row. Card height shrinks to fit
/// the free space but never below `MIN_CARD_HEIGHT`; past that the rows overflow.
pub fn place_metrics(frame: &SlideFrame<'_>, spec: &ContentSpec) -> Result<Placement, LayoutError> {
    let ContentSpec::Metrics { metrics, .. } = spec else {
        return Err(LayoutError::ArchetypeMismatch { expected: "metrics" });
    };
    if metrics.is_empty() {
        return Ok(Placement::empty(frame.cursor));
    }

    let area = frame.area();
    let gap = frame.theme.spacing.column_gap();
    let per_row = metrics.len().min(CARDS_PER_ROW);
    let rows = metrics.len().div_ceil(CARDS_PER_ROW);

    let card_width = (area.width - gap * (per_row - 1) as f32) / per_row as f32;
    let fit = (frame.available_height() - gap * (rows - 1) as f32) / rows as f32;
    let card_height = fit.min(MAX_CARD_HEIGHT).max(MIN_CARD_HEIGHT);

    let cards = metrics.iter().enumerate().map(|(i, metric)| {
        let (row, col) = (i / CARDS_PER_ROW, i % CARDS_PER_ROW);
        let rect = Rect::new(
            area.x + col as f32 * (card_width + gap),
            frame.cursor + row as f32 * (card_height + gap),
            card_width,
            card_height,
        );
        let mut card = frame.text_element(
            ElementContent::Metric(metric.clone()),
            TextRole::Metric,
            rect,
            Alignment::Center,
        );
        card.position.vertical_alignment = VerticalAlignment::Middle;
        card
    });

    Ok(Placement::empty(frame.cursor).with_elements(cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculators::test_support::frame;
    use crate::layout::spec::{Archetype, MetricSpec, Trend};
    use crate::theme::default_theme;

    fn spec(n: usize) -> ContentSpec {
        ContentSpec::Metrics {
            title: "KPIs".to_string(),
            metrics: (0..n)
                .map(|i| MetricSpec {
                    value: format!("{i}0%"),
                    label: "Growth".to_string(),
                    trend: Some(Trend::Up),
                })
                .collect(),
        }
    }

    #[test]
    fn test_three_cards_share_one_row() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::Metrics, &theme);
        let p = place_metrics(&f, &spec(3)).unwrap();
        assert_eq!(p.elements.len(), 3);
        assert!(p.elements.iter().all(|e| e.position.y == f.cursor));
        let last = p.elements[2].position.rect();
        assert!((last.right() - f.area().right()).abs() < 1e-4);
        assert!((p.elements[0].position.height - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_six_cards_wrap_to_second_row() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::Metrics, &theme);
        let p = place_metrics(&f, &spec(6)).unwrap();
        assert!(p.elements[4].position.y > p.elements[3].position.y);
        assert!(p.cursor <= f.area().bottom() + 1e-4);
    }

    #[test]
    fn test_many_cards_keep_min_height_and_overflow() {
        let theme = default_theme().unwrap();
        let f = frame(Archetype::Metrics, &theme);
        let p = place_metrics(&f, &spec(24)).unwrap();
        assert!(p.elements.iter().all(|e| e.position.height >= 0.6));
        assert!(p.cursor > f.area().bottom());
    }
}
