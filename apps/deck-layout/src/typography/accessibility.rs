//! Typography accessibility check: fixed penalty schedule over a single style.

use serde::{Deserialize, Serialize};

use crate::theme::Rgb;
use crate::typography::style::TextStyle;

pub const MIN_FONT_SIZE_PT: f32 = 12.0;
pub const MIN_LINE_HEIGHT: f32 = 1.2;
/// Light weights are only penalized below this size.
const LIGHT_WEIGHT_SIZE_PT: f32 = 14.0;
const LIGHT_WEIGHT: u16 = 300;
const MAX_LETTER_SPACING_EM: f32 = 0.1;
/// Shadows more opaque than this compete with the glyphs.
const MAX_SHADOW_OPACITY: f32 = 0.6;
const ACCESSIBLE_SCORE: u32 = 75;

pub const PENALTY_FONT_SIZE: u32 = 25;
pub const PENALTY_LINE_HEIGHT: u32 = 15;
pub const PENALTY_LIGHT_WEIGHT: u32 = 10;
pub const PENALTY_LETTER_SPACING: u32 = 5;
pub const PENALTY_SHADOW: u32 = 10;

/// One failed rule, with the points it cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyFinding {
    pub property: String,
    pub expected: String,
    pub actual: String,
    pub message: String,
    pub penalty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyReport {
    pub is_accessible: bool,
    pub issues: Vec<TypographyFinding>,
    pub recommendations: Vec<String>,
    /// 0 – 100.
    pub score: u32,
}

/// Scores `style` against minimum size, line height, weight, tracking and
/// shadow rules. Starts at 100 and subtracts a fixed penalty per failed rule.
pub fn validate_typography_accessibility(style: &TextStyle) -> TypographyReport {
    let mut findings: Vec<(TypographyFinding, &'static str)> = Vec::new();

    if style.font_size < MIN_FONT_SIZE_PT {
        findings.push((
            TypographyFinding {
                property: "fontSize".to_string(),
                expected: format!(">= {MIN_FONT_SIZE_PT}pt"),
                actual: format!("{:.1}pt", style.font_size),
                message: "Font size is below the legible minimum".to_string(),
                penalty: PENALTY_FONT_SIZE,
            },
            "Increase the font size to at least 12pt or shorten the content",
        ));
    }

    if style.line_height < MIN_LINE_HEIGHT {
        findings.push((
            TypographyFinding {
                property: "lineHeight".to_string(),
                expected: format!(">= {MIN_LINE_HEIGHT}"),
                actual: format!("{:.2}", style.line_height),
                message: "Line height is too tight for comfortable reading".to_string(),
                penalty: PENALTY_LINE_HEIGHT,
            },
            "Raise the line height to 1.2 or more",
        ));
    }

    if style.font_weight <= LIGHT_WEIGHT && style.font_size < LIGHT_WEIGHT_SIZE_PT {
        findings.push((
            TypographyFinding {
                property: "fontWeight".to_string(),
                expected: format!("> {LIGHT_WEIGHT} below {LIGHT_WEIGHT_SIZE_PT}pt"),
                actual: style.font_weight.to_string(),
                message: "Light weight at a small size loses stroke contrast".to_string(),
                penalty: PENALTY_LIGHT_WEIGHT,
            },
            "Use a regular or heavier weight for small text",
        ));
    }

    if let Some(spacing) = style.letter_spacing {
        if spacing.abs() > MAX_LETTER_SPACING_EM {
            findings.push((
                TypographyFinding {
                    property: "letterSpacing".to_string(),
                    expected: format!("within ±{MAX_LETTER_SPACING_EM}em"),
                    actual: format!("{spacing:.2}em"),
                    message: "Letter spacing is extreme".to_string(),
                    penalty: PENALTY_LETTER_SPACING,
                },
                "Keep letter spacing between -0.1em and 0.1em",
            ));
        }
    }

    if let Some(shadow) = &style.shadow {
        if shadow.opacity > MAX_SHADOW_OPACITY {
            findings.push((
                TypographyFinding {
                    property: "shadow".to_string(),
                    expected: format!("opacity <= {MAX_SHADOW_OPACITY}"),
                    actual: format!("{:.2}", shadow.opacity),
                    message: "Text shadow is opaque enough to blur glyph edges".to_string(),
                    penalty: PENALTY_SHADOW,
                },
                "Soften the text shadow or remove it",
            ));
        }
    }

    let penalty: u32 = findings.iter().map(|(f, _)| f.penalty).sum();
    let score = 100u32.saturating_sub(penalty);
    let size_ok = style.font_size >= MIN_FONT_SIZE_PT;
    let recommendations = findings.iter().map(|(_, r)| r.to_string()).collect();

    TypographyReport {
        is_accessible: size_ok && score >= ACCESSIBLE_SCORE,
        issues: findings.into_iter().map(|(f, _)| f).collect(),
        recommendations,
        score,
    }
}

/// True when the style's own background (if any) leaves its text legible.
pub fn text_on_own_background_legible(style: &TextStyle) -> Option<bool> {
    let bg: Rgb = style.background.as_deref()?.parse().ok()?;
    let fg: Rgb = style.color.parse().ok()?;
    Some(crate::theme::contrast_ratio(fg, bg) >= crate::theme::color::WCAG_AA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::default_theme;
    use crate::typography::style::{derive_text_style, StyleOptions, TextRole, TextShadow};

    fn body() -> TextStyle {
        derive_text_style(TextRole::Body, &default_theme().unwrap(), &StyleOptions::default())
    }

    #[test]
    fn test_default_body_is_clean() {
        let report = validate_typography_accessibility(&body());
        assert_eq!(report.score, 100);
        assert!(report.is_accessible);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_default_title_is_clean() {
        let title = derive_text_style(
            TextRole::Title,
            &default_theme().unwrap(),
            &StyleOptions::default(),
        );
        let report = validate_typography_accessibility(&title);
        assert_eq!(report.score, 100, "issues: {:?}", report.issues);
    }

    #[test]
    fn test_small_font_penalized_and_inaccessible() {
        let mut style = body();
        style.font_size = 10.0;
        let report = validate_typography_accessibility(&style);
        assert_eq!(report.score, 75);
        assert!(!report.is_accessible);
        assert_eq!(report.issues[0].property, "fontSize");
    }

    #[test]
    fn test_tight_line_height_penalized() {
        let mut style = body();
        style.line_height = 1.0;
        assert_eq!(validate_typography_accessibility(&style).score, 85);
    }

    #[test]
    fn test_light_small_text_penalized() {
        let mut style = body();
        style.font_weight = 300;
        style.font_size = 13.0;
        assert_eq!(validate_typography_accessibility(&style).score, 90);
    }

    #[test]
    fn test_light_large_text_not_penalized() {
        let mut style = body();
        style.font_weight = 300;
        assert_eq!(validate_typography_accessibility(&style).score, 100);
    }

    #[test]
    fn test_extreme_letter_spacing_penalized() {
        let mut style = body();
        style.letter_spacing = Some(-0.2);
        assert_eq!(validate_typography_accessibility(&style).score, 95);
    }

    #[test]
    fn test_opaque_shadow_penalized() {
        let mut style = body();
        style.shadow = Some(TextShadow {
            offset_x: 1.0,
            offset_y: 1.0,
            blur: 2.0,
            color: "#000000".to_string(),
            opacity: 0.9,
        });
        assert_eq!(validate_typography_accessibility(&style).score, 90);
    }

    #[test]
    fn test_penalties_accumulate() {
        let mut style = body();
        style.font_size = 10.0;
        style.line_height = 1.0;
        style.font_weight = 300;
        style.letter_spacing = Some(0.3);
        let report = validate_typography_accessibility(&style);
        assert_eq!(report.score, 100 - 25 - 15 - 10 - 5);
        assert_eq!(report.recommendations.len(), 4);
    }

    #[test]
    fn test_own_background_legibility() {
        let mut style = body();
        assert_eq!(text_on_own_background_legible(&style), None);
        style.background = Some("#1F2937".to_string());
        assert_eq!(text_on_own_background_legible(&style), Some(false));
        style.background = Some("#FFFFFF".to_string());
        assert_eq!(text_on_own_background_legible(&style), Some(true));
    }
}
