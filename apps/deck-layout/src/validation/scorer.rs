//! Combines check outcomes into one weighted [`ValidationResult`].

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::layout::LayoutResult;
use crate::theme::ThemeTokens;
use crate::validation::checks::{default_checks, CheckContext, ColorSample, LayoutCheck};
use crate::validation::issue::{Category, Issue, Severity, ValidationResult};
use crate::validation::live::{sample_colors, ComputedStyleSource, FidelityCheck};

pub const WEIGHT_ACCESSIBILITY: f64 = 0.35;
pub const WEIGHT_TYPOGRAPHY: f64 = 0.25;
pub const WEIGHT_LAYOUT: f64 = 0.30;
pub const WEIGHT_COLOR_HARMONY: f64 = 0.10;

const ACCESSIBLE_MIN_ACCESSIBILITY: f64 = 70.0;
const ACCESSIBLE_MIN_TYPOGRAPHY: f64 = 75.0;

/// What to score: a computed layout, or a rendered preview sampled through
/// its computed styles.
pub enum ScoreTarget<'a> {
    Layout(&'a LayoutResult),
    Live(&'a dyn ComputedStyleSource),
}

pub fn score(target: ScoreTarget<'_>, theme: &ThemeTokens) -> ValidationResult {
    let base = default_checks();
    let mut checks: Vec<&dyn LayoutCheck> = base.iter().map(|c| c.as_ref()).collect();

    match target {
        ScoreTarget::Layout(layout) => {
            let ctx = CheckContext {
                theme,
                layout: Some(layout),
                colors: ColorSample::from_theme(theme),
            };
            run_checks(&checks, &ctx)
        }
        ScoreTarget::Live(source) => {
            let fidelity = FidelityCheck { source };
            checks.push(&fidelity);
            let ctx = CheckContext {
                theme,
                layout: None,
                colors: sample_colors(source, theme),
            };
            run_checks(&checks, &ctx)
        }
    }
}

/// Runs `checks` in order. Each category's sub-score is the lowest score any
/// check reported for it; a failing check zeroes its category.
pub fn run_checks(checks: &[&dyn LayoutCheck], ctx: &CheckContext<'_>) -> ValidationResult {
    let mut scores: BTreeMap<Category, f64> = [
        Category::Typography,
        Category::Accessibility,
        Category::Layout,
        Category::ColorHarmony,
    ]
    .into_iter()
    .map(|c| (c, 100.0))
    .collect();
    let mut issues = Vec::new();
    let mut recommendations: Vec<String> = Vec::new();

    for check in checks {
        let category = check.category();
        match check.run(ctx) {
            Ok(outcome) => {
                debug!(check = check.name(), score = outcome.score, "Check finished");
                let entry = scores.entry(outcome.category).or_insert(100.0);
                *entry = entry.min(outcome.score);
                issues.extend(outcome.issues);
                for r in outcome.recommendations {
                    if !recommendations.contains(&r) {
                        recommendations.push(r);
                    }
                }
            }
            Err(e) => {
                warn!(check = check.name(), error = %e, "Validation check failed");
                scores.insert(category, 0.0);
                issues.push(Issue::new(
                    Severity::High,
                    category,
                    check.name(),
                    format!("The {} check could not be computed: {e}", check.name()),
                ));
            }
        }
    }

    let sub = |c: Category| scores.get(&c).copied().unwrap_or(100.0);
    combine(
        sub(Category::Accessibility),
        sub(Category::Typography),
        sub(Category::Layout),
        sub(Category::ColorHarmony),
        issues,
        recommendations,
    )
}

/// Weighted overall score, rounded and clamped to 0–100.
pub fn overall_score(accessibility: f64, typography: f64, layout: f64, color_harmony: f64) -> u32 {
    let weighted = accessibility * WEIGHT_ACCESSIBILITY
        + typography * WEIGHT_TYPOGRAPHY
        + layout * WEIGHT_LAYOUT
        + color_harmony * WEIGHT_COLOR_HARMONY;
    weighted.round().clamp(0.0, 100.0) as u32
}

pub(crate) fn combine(
    accessibility: f64,
    typography: f64,
    layout: f64,
    color_harmony: f64,
    issues: Vec<Issue>,
    recommendations: Vec<String>,
) -> ValidationResult {
    ValidationResult {
        score: overall_score(accessibility, typography, layout, color_harmony),
        issues,
        recommendations,
        accessibility,
        typography,
        layout,
        color_harmony,
        is_accessible: accessibility >= ACCESSIBLE_MIN_ACCESSIBILITY
            && typography >= ACCESSIBLE_MIN_TYPOGRAPHY,
    }
}
