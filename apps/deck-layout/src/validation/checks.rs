//! Independent checks. Each one reads the context and produces a sub-score for
//! its category plus the issues that cost points.

use crate::errors::EngineError;
use crate::layout::{LayoutResult, Rect};
use crate::theme::color::{contrast_between, WCAG_AA, WCAG_AA_LARGE};
use crate::theme::{Rgb, ThemeTokens};
use crate::typography::accessibility::{text_on_own_background_legible, MIN_FONT_SIZE_PT};
use crate::typography::{
    derive_text_style, validate_typography_accessibility, StyleOptions, TextRole, TextStyle,
};
use crate::validation::issue::{Category, Issue, Severity};

pub const PENALTY_CONTRAST_PARTIAL: f64 = 40.0;
pub const PENALTY_CONTRAST_POOR: f64 = 55.0;
pub const PENALTY_CONTRAST_FAIL: f64 = 70.0;
pub const PENALTY_SMALL_TEXT: f64 = 25.0;
pub const PENALTY_OVERFLOW: f64 = 40.0;
pub const PENALTY_TOO_MANY_ELEMENTS: f64 = 20.0;
pub const PENALTY_OVERLAP: f64 = 15.0;
pub const MAX_OVERLAP_PENALTY: f64 = 45.0;
pub const PENALTY_SAFE_MARGIN: f64 = 10.0;
pub const MAX_SAFE_MARGIN_PENALTY: f64 = 30.0;
pub const PENALTY_WEAK_ACCENT: f64 = 20.0;
pub const PENALTY_INDISTINCT_BRAND: f64 = 10.0;

const POOR_CONTRAST: f64 = 2.0;
const MAX_ELEMENTS: usize = 5;
/// Primary and secondary this similar read as one color.
const INDISTINCT_SIMILARITY: f64 = 95.0;

/// Colors the checks compare. Built from the theme palette when scoring a
/// computed layout, or from sampled values when verifying a rendered preview.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSample {
    pub background: String,
    /// Text colors to test against the background, with a label for reports.
    pub text: Vec<(String, String)>,
    pub accent: Option<String>,
    pub primary: String,
    pub secondary: String,
}

impl ColorSample {
    pub fn from_theme(theme: &ThemeTokens) -> Self {
        let p = &theme.palette;
        Self {
            background: p.background.clone(),
            text: vec![
                ("textPrimary".to_string(), p.text_primary.clone()),
                ("textSecondary".to_string(), p.text_secondary.clone()),
            ],
            accent: Some(p.accent.clone()),
            primary: p.primary.clone(),
            secondary: p.secondary.clone(),
        }
    }
}

pub struct CheckContext<'a> {
    pub theme: &'a ThemeTokens,
    pub layout: Option<&'a LayoutResult>,
    pub colors: ColorSample,
}

impl CheckContext<'_> {
    /// Distinct text styles on the slide. Without a layout, the theme's
    /// title, subtitle, body and caption styles stand in.
    pub fn text_styles(&self) -> Vec<TextStyle> {
        match self.layout {
            Some(layout) => layout
                .shapes()
                .filter_map(|s| s.style.clone())
                .fold(Vec::new(), |mut acc, style| {
                    if !acc.contains(&style) {
                        acc.push(style);
                    }
                    acc
                }),
            None => [TextRole::Title, TextRole::Subtitle, TextRole::Body, TextRole::Caption]
                .into_iter()
                .map(|role| derive_text_style(role, self.theme, &StyleOptions::default()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub category: Category,
    /// 0 – 100.
    pub score: f64,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
}

impl CheckOutcome {
    fn from_penalty(category: Category, penalty: f64, issues: Vec<Issue>) -> Self {
        let recommendations = issues.iter().filter_map(|i| i.suggestion.clone()).collect();
        Self {
            category,
            score: (100.0 - penalty).clamp(0.0, 100.0),
            issues,
            recommendations,
        }
    }
}

/// One scoring rule. A check that returns `Err` is reported as a zero-scored
/// high-severity issue for its category instead of aborting the pass.
pub trait LayoutCheck: Send + Sync {
    fn name(&self) -> &'static str;
    fn category(&self) -> Category;
    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, EngineError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Typography
// ────────────────────────────────────────────────────────────────────────────

pub struct TypographyCheck;

impl LayoutCheck for TypographyCheck {
    fn name(&self) -> &'static str {
        "typography"
    }

    fn category(&self) -> Category {
        Category::Typography
    }

    /// Runs the typography schedule on every distinct style; the sub-score is
    /// the worst style's score.
    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, EngineError> {
        let styles = ctx.text_styles();
        let mut score = 100.0_f64;
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        for style in &styles {
            let report = validate_typography_accessibility(style);
            score = score.min(report.score as f64);
            issues.extend(report.issues.into_iter().map(|f| {
                let severity = match f.penalty {
                    25.. => Severity::High,
                    10..=24 => Severity::Medium,
                    _ => Severity::Low,
                };
                Issue::new(
                    severity,
                    Category::Typography,
                    f.property,
                    format!("{:?} text: {}", style.role, f.message),
                )
                .expected_actual(f.expected, f.actual)
            }));
            recommendations.extend(report.recommendations);

            if text_on_own_background_legible(style) == Some(false) {
                score = score.min(100.0 - PENALTY_CONTRAST_PARTIAL);
                issues.push(
                    Issue::new(
                        Severity::Medium,
                        Category::Typography,
                        "background",
                        format!("{:?} text is hard to read on its own background", style.role),
                    )
                    .suggest("Pick a text background with at least 4.5:1 contrast"),
                );
            }
        }
        recommendations.dedup();

        Ok(CheckOutcome {
            category: Category::Typography,
            score,
            issues,
            recommendations,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Contrast
// ────────────────────────────────────────────────────────────────────────────

pub struct ContrastCheck;

impl ContrastCheck {
    /// Penalty and severity for one ratio, `None` when it passes AA.
    pub fn grade(ratio: f64) -> Option<(f64, Severity)> {
        if ratio >= WCAG_AA {
            None
        } else if ratio >= WCAG_AA_LARGE {
            Some((PENALTY_CONTRAST_PARTIAL, Severity::Medium))
        } else if ratio >= POOR_CONTRAST {
            Some((PENALTY_CONTRAST_POOR, Severity::High))
        } else {
            Some((PENALTY_CONTRAST_FAIL, Severity::High))
        }
    }
}

impl LayoutCheck for ContrastCheck {
    fn name(&self) -> &'static str {
        "contrast"
    }

    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, EngineError> {
        let bg = &ctx.colors.background;
        let mut penalty = 0.0;
        let mut issues = Vec::new();

        for (label, fg) in &ctx.colors.text {
            let ratio = contrast_between(fg, bg)?;
            if let Some((cost, severity)) = Self::grade(ratio) {
                penalty += cost;
                issues.push(
                    Issue::new(
                        severity,
                        Category::Accessibility,
                        label.clone(),
                        format!("{label} {fg} on {bg} has a contrast ratio of {ratio:.2}:1"),
                    )
                    .expected_actual(format!(">= {WCAG_AA}:1"), format!("{ratio:.2}:1"))
                    .suggest(format!("Darken or lighten {label} until it reaches 4.5:1 against the background")),
                );
            }
        }

        if let Some(small) = ctx
            .layout
            .into_iter()
            .flat_map(|l| l.shapes())
            .filter_map(|s| s.style.as_ref())
            .find(|s| s.font_size < MIN_FONT_SIZE_PT)
        {
            penalty += PENALTY_SMALL_TEXT;
            issues.push(
                Issue::new(
                    Severity::Medium,
                    Category::Accessibility,
                    "fontSize",
                    "Slide contains text below the legible minimum size",
                )
                .expected_actual(format!(">= {MIN_FONT_SIZE_PT}pt"), format!("{:.1}pt", small.font_size))
                .suggest("Shorten content so text can stay at 12pt or larger"),
            );
        }

        Ok(CheckOutcome::from_penalty(Category::Accessibility, penalty, issues))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

pub struct LayoutRulesCheck;

impl LayoutCheck for LayoutRulesCheck {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn category(&self) -> Category {
        Category::Layout
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, EngineError> {
        let Some(layout) = ctx.layout else {
            return Ok(CheckOutcome::from_penalty(Category::Layout, 0.0, Vec::new()));
        };
        let mut penalty = 0.0;
        let mut issues = Vec::new();

        if layout.is_overflowing {
            penalty += PENALTY_OVERFLOW;
            issues.push(
                Issue::new(
                    Severity::High,
                    Category::Layout,
                    "totalHeight",
                    "Content overflows the slide",
                )
                .expected_actual(
                    format!("<= {:.2}", ctx.theme.layout.canvas_height),
                    format!("{:.2}", layout.total_height),
                )
                .suggest("Split the content across two slides"),
            );
        }

        if layout.content.len() > MAX_ELEMENTS {
            penalty += PENALTY_TOO_MANY_ELEMENTS;
            issues.push(
                Issue::new(
                    Severity::Medium,
                    Category::Layout,
                    "elements",
                    format!("{} content elements on one slide", layout.content.len()),
                )
                .expected_actual(format!("<= {MAX_ELEMENTS}"), layout.content.len().to_string())
                .suggest("Simplify the layout"),
            );
        }

        let shapes: Vec<_> = layout.shapes().collect();
        let mut overlaps = 0usize;
        for (i, a) in shapes.iter().enumerate() {
            for b in &shapes[i + 1..] {
                let layered = matches!(
                    (a.position.z_index, b.position.z_index),
                    (Some(za), Some(zb)) if za != zb
                );
                if !layered && a.position.rect().intersection_area(&b.position.rect()) > 0.0 {
                    overlaps += 1;
                }
            }
        }
        if overlaps > 0 {
            penalty += (overlaps as f64 * PENALTY_OVERLAP).min(MAX_OVERLAP_PENALTY);
            issues.push(
                Issue::new(
                    Severity::Medium,
                    Category::Layout,
                    "overlap",
                    format!("{overlaps} pair(s) of elements overlap without explicit layering"),
                )
                .suggest("Separate the boxes or give them distinct z-indexes"),
            );
        }

        let m = ctx.theme.layout.safe_margin;
        let safe = Rect::new(
            0.0,
            0.0,
            ctx.theme.layout.canvas_width,
            ctx.theme.layout.canvas_height,
        )
        .inset(m, m, m, m);
        let outside = shapes
            .iter()
            .filter(|s| !safe.contains(&s.position.rect()))
            .count();
        if outside > 0 {
            penalty += (outside as f64 * PENALTY_SAFE_MARGIN).min(MAX_SAFE_MARGIN_PENALTY);
            issues.push(
                Issue::new(
                    Severity::Medium,
                    Category::Layout,
                    "safeMargin",
                    format!("{outside} element(s) extend into the {m:.2} unit safe margin"),
                )
                .suggest("Keep every box inside the margin-inset canvas"),
            );
        }

        Ok(CheckOutcome::from_penalty(Category::Layout, penalty, issues))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Color harmony
// ────────────────────────────────────────────────────────────────────────────

pub struct ColorHarmonyCheck;

impl LayoutCheck for ColorHarmonyCheck {
    fn name(&self) -> &'static str {
        "color_harmony"
    }

    fn category(&self) -> Category {
        Category::ColorHarmony
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, EngineError> {
        let colors = &ctx.colors;
        let mut penalty = 0.0;
        let mut issues = Vec::new();

        if let Some(accent) = &colors.accent {
            let ratio = contrast_between(accent, &colors.background)?;
            if ratio < WCAG_AA_LARGE {
                penalty += PENALTY_WEAK_ACCENT;
                issues.push(
                    Issue::new(
                        Severity::Low,
                        Category::ColorHarmony,
                        "accent",
                        format!("Accent {accent} barely stands out from the background"),
                    )
                    .expected_actual(format!(">= {WCAG_AA_LARGE}:1"), format!("{ratio:.2}:1"))
                    .suggest("Use a more saturated or darker accent"),
                );
            }
        }

        let primary: Rgb = colors.primary.parse()?;
        let secondary: Rgb = colors.secondary.parse()?;
        let similarity = primary.similarity(secondary);
        if similarity > INDISTINCT_SIMILARITY {
            penalty += PENALTY_INDISTINCT_BRAND;
            issues.push(
                Issue::new(
                    Severity::Low,
                    Category::ColorHarmony,
                    "secondary",
                    "Primary and secondary colors are nearly identical",
                )
                .expected_actual(
                    format!("<= {INDISTINCT_SIMILARITY}% similar"),
                    format!("{similarity:.1}%"),
                )
                .suggest("Choose a secondary color with a distinct hue"),
            );
        }

        Ok(CheckOutcome::from_penalty(Category::ColorHarmony, penalty, issues))
    }
}

/// The checks every scoring pass runs, in report order.
pub fn default_checks() -> Vec<Box<dyn LayoutCheck>> {
    vec![
        Box::new(TypographyCheck),
        Box::new(ContrastCheck),
        Box::new(LayoutRulesCheck),
        Box::new(ColorHarmonyCheck),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{calculate_layout, ContentSpec, ElementContent, PlacedElement};
    use crate::theme::default_theme;

    fn ctx<'a>(theme: &'a ThemeTokens, layout: Option<&'a LayoutResult>) -> CheckContext<'a> {
        CheckContext {
            theme,
            layout,
            colors: ColorSample::from_theme(theme),
        }
    }

    fn bullets(n: usize) -> LayoutResult {
        let theme = default_theme().unwrap();
        let spec = ContentSpec::Bullets {
            title: "Plan".to_string(),
            bullets: (0..n).map(|i| format!("Step {i}")).collect(),
        };
        calculate_layout(&spec, &theme).into_result()
    }

    #[test]
    fn test_contrast_grades() {
        assert_eq!(ContrastCheck::grade(7.0), None);
        assert_eq!(ContrastCheck::grade(3.5), Some((40.0, Severity::Medium)));
        assert_eq!(ContrastCheck::grade(2.5), Some((55.0, Severity::High)));
        assert_eq!(ContrastCheck::grade(1.0), Some((70.0, Severity::High)));
    }

    #[test]
    fn test_default_theme_passes_every_check() {
        let theme = default_theme().unwrap();
        let layout = bullets(3);
        for check in default_checks() {
            let outcome = check.run(&ctx(&theme, Some(&layout))).unwrap();
            assert_eq!(outcome.score, 100.0, "{} scored {}", check.name(), outcome.score);
            assert!(outcome.issues.is_empty(), "{}: {:?}", check.name(), outcome.issues);
        }
    }

    #[test]
    fn test_white_on_white_costs_seventy() {
        let mut theme = default_theme().unwrap();
        theme.palette.text_primary = "#FFFFFF".to_string();
        let outcome = ContrastCheck.run(&ctx(&theme, None)).unwrap();
        assert_eq!(outcome.score, 30.0);
        assert_eq!(outcome.issues[0].severity, Severity::High);
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let mut theme = default_theme().unwrap();
        theme.palette.background = "not-a-color".to_string();
        assert!(ContrastCheck.run(&ctx(&theme, None)).is_err());
    }

    #[test]
    fn test_overflow_and_element_count_penalties() {
        let theme = default_theme().unwrap();
        let layout = bullets(12);
        let outcome = LayoutRulesCheck.run(&ctx(&theme, Some(&layout))).unwrap();
        // overflow −40, >5 elements −20, safe margin capped at −30
        assert_eq!(outcome.score, 10.0);
    }

    #[test]
    fn test_overlap_ignored_when_layered() {
        let theme = default_theme().unwrap();
        let mut layout = bullets(1);
        let mut extra = layout.content[0].clone();
        extra.content = ElementContent::Text {
            text: "over".to_string(),
        };
        layout.content.push(extra.clone());
        let overlapping = LayoutRulesCheck.run(&ctx(&theme, Some(&layout))).unwrap();
        assert_eq!(overlapping.score, 85.0);

        layout.content[0].position = layout.content[0].position.with_z_index(1);
        layout.content[1] = PlacedElement {
            position: extra.position.with_z_index(2),
            ..extra
        };
        let layered = LayoutRulesCheck.run(&ctx(&theme, Some(&layout))).unwrap();
        assert_eq!(layered.score, 100.0);
    }

    #[test]
    fn test_harmony_penalties() {
        let mut theme = default_theme().unwrap();
        theme.palette.accent = "#F5F5F5".to_string();
        theme.palette.secondary = theme.palette.primary.clone();
        let outcome = ColorHarmonyCheck.run(&ctx(&theme, None)).unwrap();
        assert_eq!(outcome.score, 70.0);
        assert_eq!(outcome.issues.len(), 2);
    }

    #[test]
    fn test_theme_styles_used_without_layout() {
        let theme = default_theme().unwrap();
        assert_eq!(ctx(&theme, None).text_styles().len(), 4);
    }

    #[test]
    fn test_small_text_costs_once() {
        let mut theme = default_theme().unwrap();
        theme.typography.scale = 0.5;
        let spec = ContentSpec::Bullets {
            title: "Plan".to_string(),
            bullets: vec!["a".to_string(), "b".to_string()],
        };
        let layout = calculate_layout(&spec, &theme).into_result();
        let outcome = ContrastCheck.run(&ctx(&theme, Some(&layout))).unwrap();
        assert_eq!(outcome.score, 75.0);
    }
}
