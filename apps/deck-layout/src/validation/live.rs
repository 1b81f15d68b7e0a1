//! Live verification: compare colors sampled from a rendered preview with the
//! colors the theme asked for.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::theme::{Rgb, ThemeTokens};
use crate::validation::checks::{CheckContext, CheckOutcome, ColorSample, LayoutCheck};
use crate::validation::issue::{Category, Issue, Severity};

/// Preview element whose computed color is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Background,
    Title,
    Body,
    Accent,
}

impl ColorRole {
    pub const ALL: [ColorRole; 4] = [
        ColorRole::Background,
        ColorRole::Title,
        ColorRole::Body,
        ColorRole::Accent,
    ];

    /// Minimum similarity percentage for the sample to count as a match.
    pub fn threshold(self) -> f64 {
        match self {
            ColorRole::Background | ColorRole::Title => 90.0,
            ColorRole::Body | ColorRole::Accent => 80.0,
        }
    }

    /// Accent elements may legitimately be absent, so their failures are advisory.
    pub fn is_fatal(self) -> bool {
        self != ColorRole::Accent
    }

    pub fn expected(self, theme: &ThemeTokens) -> &str {
        let p = &theme.palette;
        match self {
            ColorRole::Background => &p.background,
            ColorRole::Title | ColorRole::Body => &p.text_primary,
            ColorRole::Accent => &p.accent,
        }
    }
}

/// Read-only view of a rendered preview's computed styles.
pub trait ComputedStyleSource: Send + Sync {
    /// Resolved color for `role`, or `None` when no such element is rendered.
    fn computed_color(&self, role: ColorRole) -> Option<String>;
}

/// Style source backed by a fixed map.
#[derive(Debug, Clone, Default)]
pub struct StaticStyleSource {
    colors: BTreeMap<ColorRole, String>,
}

impl StaticStyleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: ColorRole, color: impl Into<String>) -> Self {
        self.colors.insert(role, color.into());
        self
    }

    /// A preview that renders exactly what `theme` asks for.
    pub fn matching(theme: &ThemeTokens) -> Self {
        ColorRole::ALL
            .into_iter()
            .fold(Self::new(), |src, role| src.with(role, role.expected(theme)))
    }
}

impl ComputedStyleSource for StaticStyleSource {
    fn computed_color(&self, role: ColorRole) -> Option<String> {
        self.colors.get(&role).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMatch {
    pub role: ColorRole,
    pub expected: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// 0 – 100; `None` when the role was not rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    pub threshold: f64,
    pub passed: bool,
}

/// Samples every role and compares it with the theme.
///
/// A sampled color that does not parse is an error; a missing role fails for
/// fatal roles and passes for the accent.
pub fn verify_colors(
    source: &dyn ComputedStyleSource,
    theme: &ThemeTokens,
) -> Result<Vec<ColorMatch>, EngineError> {
    ColorRole::ALL
        .into_iter()
        .map(|role| -> Result<ColorMatch, EngineError> {
            let expected = role.expected(theme).to_string();
            let actual = source.computed_color(role);
            let similarity = match &actual {
                Some(a) => {
                    let want: Rgb = expected.parse()?;
                    let got: Rgb = a.parse()?;
                    Some(want.similarity(got))
                }
                None => None,
            };
            let passed = match similarity {
                Some(s) => s >= role.threshold(),
                None => !role.is_fatal(),
            };
            Ok(ColorMatch {
                role,
                expected,
                actual,
                similarity,
                threshold: role.threshold(),
                passed,
            })
        })
        .collect()
}

/// Sampled colors in the shape the contrast and harmony checks expect. Roles
/// that were not rendered fall back to the theme's value.
pub fn sample_colors(source: &dyn ComputedStyleSource, theme: &ThemeTokens) -> ColorSample {
    let sampled = |role: ColorRole| {
        source
            .computed_color(role)
            .unwrap_or_else(|| role.expected(theme).to_string())
    };
    ColorSample {
        background: sampled(ColorRole::Background),
        text: vec![
            ("title".to_string(), sampled(ColorRole::Title)),
            ("body".to_string(), sampled(ColorRole::Body)),
        ],
        accent: source.computed_color(ColorRole::Accent),
        primary: theme.palette.primary.clone(),
        secondary: theme.palette.secondary.clone(),
    }
}

pub const PENALTY_FIDELITY: f64 = 30.0;
pub const PENALTY_ACCENT_FIDELITY: f64 = 10.0;

/// Counts mismatched preview colors against color harmony.
pub struct FidelityCheck<'s> {
    pub source: &'s dyn ComputedStyleSource,
}

impl LayoutCheck for FidelityCheck<'_> {
    fn name(&self) -> &'static str {
        "live_fidelity"
    }

    fn category(&self) -> Category {
        Category::ColorHarmony
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, EngineError> {
        let matches = verify_colors(self.source, ctx.theme)?;
        let mut penalty = 0.0;
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        for m in matches.iter().filter(|m| !m.passed || m.actual.is_none()) {
            let fatal = m.role.is_fatal();
            if !m.passed {
                penalty += if fatal {
                    PENALTY_FIDELITY
                } else {
                    PENALTY_ACCENT_FIDELITY
                };
            }
            let (severity, message) = match (&m.actual, m.similarity) {
                (Some(actual), Some(s)) => (
                    if fatal { Severity::High } else { Severity::Low },
                    format!(
                        "Rendered {:?} color {actual} is {s:.1}% similar to {}",
                        m.role, m.expected
                    ),
                ),
                _ if fatal => (
                    Severity::High,
                    format!("No rendered {:?} element to sample", m.role),
                ),
                _ => (
                    Severity::Low,
                    "No accent element rendered; accent color not verified".to_string(),
                ),
            };
            let property = format!("{:?}", m.role).to_lowercase();
            let mut issue = Issue::new(severity, Category::ColorHarmony, property, message)
                .expected_actual(
                    format!(">= {:.0}% similar to {}", m.threshold, m.expected),
                    m.actual.clone().unwrap_or_else(|| "absent".to_string()),
                );
            if !m.passed {
                let hint = format!("Check that the preview applies the theme's {:?} color", m.role)
                    .to_lowercase();
                recommendations.push(hint.clone());
                issue = issue.suggest(hint);
            }
            issues.push(issue);
        }

        Ok(CheckOutcome {
            category: Category::ColorHarmony,
            score: (100.0 - penalty).clamp(0.0, 100.0),
            issues,
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::default_theme;

    fn ctx(theme: &ThemeTokens) -> CheckContext<'_> {
        CheckContext {
            theme,
            layout: None,
            colors: ColorSample::from_theme(theme),
        }
    }

    #[test]
    fn test_matching_preview_passes() {
        let theme = default_theme().unwrap();
        let source = StaticStyleSource::matching(&theme);
        let matches = verify_colors(&source, &theme).unwrap();
        assert!(matches.iter().all(|m| m.passed));
        assert!(matches.iter().all(|m| m.similarity == Some(100.0)));
        let outcome = FidelityCheck { source: &source }.run(&ctx(&theme)).unwrap();
        assert_eq!(outcome.score, 100.0);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_wrong_background_fails() {
        let theme = default_theme().unwrap();
        let source = StaticStyleSource::matching(&theme).with(ColorRole::Background, "#000000");
        let matches = verify_colors(&source, &theme).unwrap();
        let bg = &matches[0];
        assert!(!bg.passed);
        assert!(bg.similarity.unwrap() < 1.0);
        let outcome = FidelityCheck { source: &source }.run(&ctx(&theme)).unwrap();
        assert_eq!(outcome.score, 70.0);
        assert_eq!(outcome.issues[0].severity, Severity::High);
    }

    #[test]
    fn test_absent_accent_is_not_fatal() {
        let theme = default_theme().unwrap();
        let source = StaticStyleSource::new()
            .with(ColorRole::Background, "#FFFFFF")
            .with(ColorRole::Title, "#1F2937")
            .with(ColorRole::Body, "rgb(31, 41, 55)");
        let matches = verify_colors(&source, &theme).unwrap();
        assert!(matches.iter().all(|m| m.passed));
        let outcome = FidelityCheck { source: &source }.run(&ctx(&theme)).unwrap();
        assert_eq!(outcome.score, 100.0);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].severity, Severity::Low);
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let theme = default_theme().unwrap();
        let source = StaticStyleSource::new().with(ColorRole::Background, "#FFFFFF");
        let matches = verify_colors(&source, &theme).unwrap();
        assert!(!matches[1].passed);
        assert!(!matches[2].passed);
    }

    #[test]
    fn test_body_threshold_is_looser() {
        let theme = default_theme().unwrap();
        // ~85% similar to #1F2937
        let source = StaticStyleSource::matching(&theme).with(ColorRole::Body, "#454F5D");
        let matches = verify_colors(&source, &theme).unwrap();
        let body = matches.iter().find(|m| m.role == ColorRole::Body).unwrap();
        let s = body.similarity.unwrap();
        assert!(s > 80.0 && s < 90.0, "similarity {s}");
        assert!(body.passed);
    }

    #[test]
    fn test_unparseable_sample_is_error() {
        let theme = default_theme().unwrap();
        let source = StaticStyleSource::matching(&theme).with(ColorRole::Title, "blurple");
        assert!(verify_colors(&source, &theme).is_err());
    }

    #[test]
    fn test_sample_colors_fall_back_to_theme() {
        let theme = default_theme().unwrap();
        let sample = sample_colors(&StaticStyleSource::new(), &theme);
        assert_eq!(sample.background, theme.palette.background);
        assert_eq!(sample.accent, None);
    }
}
