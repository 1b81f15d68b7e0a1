//! Layout engine: runs the shared skeleton (title box, cursor) and dispatches
//! to the archetype strategy, then derives totals and diagnostics.
//!
//! Nothing here fails. A strategy error turns into `LayoutOutcome::Fallback`
//! holding a title-only layout with the error recorded in `metadata.errors`.

use tracing::{debug, warn};

use crate::errors::LayoutError;
use crate::layout::calculators::{
    place_bullets, place_chart, place_grid, place_image_left, place_image_right, place_metrics,
    place_single_column, place_table, place_title, place_two_column, SlideFrame, Strategy,
};
use crate::layout::geometry::{Alignment, ElementPosition, Rect, VerticalAlignment, EPSILON};
use crate::layout::grid::{create_layout_config, GridConfig};
use crate::layout::result::{
    Diagnostics, ElementContent, LayoutMetadata, LayoutOutcome, LayoutResult, PlacedElement,
    Placement,
};
use crate::layout::spec::{Archetype, ContentSpec};
use crate::theme::ThemeTokens;
use crate::typography::{
    derive_text_style, HeuristicMeasurer, StyleOptions, TextMeasurer, TextRole,
};

const TITLE_SLIDE_TITLE_HEIGHT: f32 = 1.2;
const TITLE_HEIGHT: f32 = 0.8;
/// More content elements than this triggers a "simplify" recommendation.
pub const MAX_COMFORTABLE_ELEMENTS: usize = 5;

/// Strategy table over the closed archetype set.
pub fn strategy(archetype: Archetype) -> Strategy {
    match archetype {
        Archetype::Title => place_title,
        Archetype::Bullets => place_bullets,
        Archetype::TwoColumn => place_two_column,
        Archetype::ImageLeft => place_image_left,
        Archetype::ImageRight => place_image_right,
        Archetype::Chart => place_chart,
        Archetype::ComparisonTable => place_table,
        Archetype::Grid => place_grid,
        Archetype::Metrics => place_metrics,
        Archetype::SingleColumn => place_single_column,
    }
}

/// Lays out one slide with the average-glyph-width measurer.
pub fn calculate_layout(spec: &ContentSpec, theme: &ThemeTokens) -> LayoutOutcome {
    calculate_layout_with(spec, theme, &HeuristicMeasurer)
}

pub fn calculate_layout_with(
    spec: &ContentSpec,
    theme: &ThemeTokens,
    measurer: &dyn TextMeasurer,
) -> LayoutOutcome {
    let frame = slide_frame(spec.archetype(), theme, measurer);
    let title = title_element(&frame, spec);
    let content_warnings = Diagnostics::from_warnings(spec.validate());

    let archetype = spec.archetype();
    debug!(archetype = archetype.name(), "Calculating slide layout");

    match strategy(archetype)(&frame, spec) {
        Ok(placement) => LayoutOutcome::Complete(assemble(&frame, title, placement, content_warnings)),
        Err(cause) => {
            warn!(
                archetype = archetype.name(),
                error = %cause,
                "Layout calculator failed, falling back to title-only layout"
            );
            LayoutOutcome::Fallback {
                result: fallback(&frame, title, content_warnings, &cause),
                cause,
            }
        }
    }
}

/// Title-only outcome for a slide whose calculation never produced a result.
pub fn fallback_layout(spec: &ContentSpec, theme: &ThemeTokens, cause: LayoutError) -> LayoutOutcome {
    let frame = slide_frame(spec.archetype(), theme, &HeuristicMeasurer);
    let title = title_element(&frame, spec);
    let content_warnings = Diagnostics::from_warnings(spec.validate());
    LayoutOutcome::Fallback {
        result: fallback(&frame, title, content_warnings, &cause),
        cause,
    }
}

fn slide_frame<'a>(
    archetype: Archetype,
    theme: &'a ThemeTokens,
    measurer: &'a dyn TextMeasurer,
) -> SlideFrame<'a> {
    let config = create_layout_config(archetype, theme);
    let area = config.content_area;
    let title_height = if archetype.is_title() {
        TITLE_SLIDE_TITLE_HEIGHT
    } else {
        TITLE_HEIGHT
    };
    SlideFrame {
        config,
        grid: GridConfig::new(area, theme),
        theme,
        measurer,
        title_box: Rect::new(area.x, area.y, area.width, title_height.min(area.height)),
        cursor: area.y + title_height + theme.spacing.title_to_content(),
    }
}

fn title_element(frame: &SlideFrame<'_>, spec: &ContentSpec) -> PlacedElement {
    let archetype = frame.config.archetype;
    let (role, alignment) = if archetype.is_title() {
        (TextRole::Hero, Alignment::Center)
    } else {
        (TextRole::Title, Alignment::Left)
    };
    let text = spec.title().trim().to_string();
    let style = derive_text_style(role, frame.theme, &StyleOptions::for_text(&text));
    PlacedElement {
        position: ElementPosition::new(frame.title_box, alignment, VerticalAlignment::Middle),
        content: ElementContent::Title { text },
        style: Some(style),
    }
}

fn assemble(
    frame: &SlideFrame<'_>,
    title: PlacedElement,
    placement: Placement,
    content_warnings: Diagnostics,
) -> LayoutResult {
    let area = frame.area();
    let content: Vec<PlacedElement> = placement
        .elements
        .into_iter()
        .map(|mut element| {
            let r = element.position.rect();
            element.position.overflowing =
                r.bottom() > area.bottom() + EPSILON || r.right() > area.right() + EPSILON;
            element
        })
        .collect();

    let lowest = content
        .iter()
        .map(|e| e.position.bottom())
        .fold(title.position.bottom().max(placement.cursor), f32::max);
    let total_height = lowest - area.y;
    let is_overflowing = total_height > area.height + EPSILON;

    let title_in_content = content
        .iter()
        .any(|e| matches!(e.content, ElementContent::Title { .. }));
    let shapes: Vec<&PlacedElement> = (!title_in_content)
        .then_some(&title)
        .into_iter()
        .chain(content.iter())
        .collect();

    let fit = shapes
        .iter()
        .copied()
        .filter_map(|e| text_fit_warning(frame.measurer, e))
        .fold(Diagnostics::default(), Diagnostics::warning);

    let mut sizing = Diagnostics::default();
    if is_overflowing {
        sizing = sizing.recommendation(format!(
            "Content needs {total_height:.2} units of height but only {:.2} are available; \
             split the slide or trim content",
            area.height
        ));
    }
    if content.len() > MAX_COMFORTABLE_ELEMENTS {
        sizing = sizing.recommendation(format!(
            "Slide has {} content elements; simplify the layout or split it across slides",
            content.len()
        ));
    }

    let diagnostics = content_warnings
        .merge(placement.diagnostics)
        .merge(fit)
        .merge(sizing);

    let (used_text, overflow_text) = shapes.iter().fold((0, 0), |(used, over), e| {
        let n = e.content.char_count();
        if e.position.overflowing {
            (used, over + n)
        } else {
            (used + n, over)
        }
    });
    let shape_count = shapes.len();

    LayoutResult {
        archetype: frame.config.archetype,
        title,
        content,
        background: Some(frame.theme.palette.background.clone()),
        total_height,
        is_overflowing,
        recommendations: diagnostics.recommendations,
        metadata: LayoutMetadata {
            warnings: diagnostics.warnings,
            errors: Vec::new(),
            shape_count,
            used_text,
            overflow_text,
        },
    }
}

/// Warning when the measurer thinks the element's text is taller than its box.
fn text_fit_warning(measurer: &dyn TextMeasurer, element: &PlacedElement) -> Option<String> {
    let style = element.style.as_ref()?;
    if !element.content.is_flowing_text() {
        return None;
    }
    let text = element.content.text()?;
    let needed = measurer.estimate_height(&text, style, element.position.width);
    (needed > element.position.height + EPSILON).then(|| {
        let preview: String = text.chars().take(30).collect();
        format!(
            "Text \"{preview}\" needs about {needed:.2} units but its box is {:.2}",
            element.position.height
        )
    })
}

fn fallback(
    frame: &SlideFrame<'_>,
    title: PlacedElement,
    content_warnings: Diagnostics,
    cause: &LayoutError,
) -> LayoutResult {
    let area = frame.area();
    let chars = title.content.char_count();
    LayoutResult {
        archetype: frame.config.archetype,
        total_height: title.position.bottom() - area.y,
        title,
        content: Vec::new(),
        background: Some(frame.theme.palette.background.clone()),
        is_overflowing: false,
        recommendations: Vec::new(),
        metadata: LayoutMetadata {
            warnings: content_warnings.warnings,
            errors: vec![cause.to_string()],
            shape_count: 1,
            used_text: chars,
            overflow_text: 0,
        },
    }
}
