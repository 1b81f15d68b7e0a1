//! Deck-level scoring: per-slide results plus a consistency rule across slides.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::layout::{Archetype, LayoutResult};
use crate::theme::ThemeTokens;
use crate::validation::issue::{Category, Issue, Severity, ValidationResult};
use crate::validation::scorer::{combine, score, ScoreTarget};

/// A deck mixing more layout archetypes than this reads as inconsistent.
pub const MAX_DISTINCT_ARCHETYPES: usize = 6;
pub const PENALTY_INCONSISTENT_DECK: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckReport {
    pub slides: Vec<ValidationResult>,
    pub distinct_archetypes: usize,
    /// Mean of the slide sub-scores, with deck-level penalties applied.
    pub summary: ValidationResult,
}

pub fn score_deck(layouts: &[LayoutResult], theme: &ThemeTokens) -> DeckReport {
    let slides: Vec<ValidationResult> = layouts
        .iter()
        .map(|layout| score(ScoreTarget::Layout(layout), theme))
        .collect();

    let archetypes: BTreeSet<Archetype> = layouts.iter().map(|l| l.archetype).collect();
    let distinct = archetypes.len();

    let mean = |f: fn(&ValidationResult) -> f64| {
        if slides.is_empty() {
            100.0
        } else {
            slides.iter().map(f).sum::<f64>() / slides.len() as f64
        }
    };
    let accessibility = mean(|s| s.accessibility);
    let typography = mean(|s| s.typography);
    let mut layout = mean(|s| s.layout);
    let color_harmony = mean(|s| s.color_harmony);

    let mut issues = Vec::new();
    if distinct > MAX_DISTINCT_ARCHETYPES {
        layout = (layout - PENALTY_INCONSISTENT_DECK).max(0.0);
        let names: Vec<&str> = archetypes.iter().map(|a| a.name()).collect();
        issues.push(
            Issue::new(
                Severity::Medium,
                Category::Layout,
                "archetypes",
                format!("Deck uses {distinct} different layouts: {}", names.join(", ")),
            )
            .expected_actual(format!("<= {MAX_DISTINCT_ARCHETYPES}"), distinct.to_string())
            .suggest("Reuse a smaller set of layouts so the deck feels consistent"),
        );
    }

    let recommendations = issues.iter().filter_map(|i| i.suggestion.clone()).collect();
    let mut summary = combine(
        accessibility,
        typography,
        layout,
        color_harmony,
        issues,
        recommendations,
    );
    summary.is_accessible &= slides.iter().all(|s| s.is_accessible);

    DeckReport {
        slides,
        distinct_archetypes: distinct,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{calculate_layout, ContentSpec};
    use crate::theme::default_theme;
    use serde_json::json;

    fn deck(layouts: &[&str]) -> Vec<LayoutResult> {
        let theme = default_theme().unwrap();
        layouts
            .iter()
            .map(|layout| {
                let spec = ContentSpec::from_value(json!({
                    "layout": layout,
                    "title": "Slide",
                    "bullets": ["one"],
                    "paragraph": "text",
                    "metrics": [{"value": "1", "label": "x"}],
                }))
                .unwrap();
                calculate_layout(&spec, &theme).into_result()
            })
            .collect()
    }

    #[test]
    fn test_consistent_deck_has_no_deck_issues() {
        let theme = default_theme().unwrap();
        let report = score_deck(&deck(&["title", "bullets", "bullets", "metrics"]), &theme);
        assert_eq!(report.slides.len(), 4);
        assert_eq!(report.distinct_archetypes, 3);
        assert!(report.summary.issues.is_empty());
    }

    #[test]
    fn test_too_many_archetypes_costs_ten() {
        let theme = default_theme().unwrap();
        let names = ["title", "bullets", "metrics", "single-column", "two-column", "chart", "grid"];
        let layouts: Vec<LayoutResult> = names
            .iter()
            .map(|n| {
                let mut r = deck(&["bullets"]).remove(0);
                r.archetype = Archetype::from_name(n);
                r
            })
            .collect();
        let report = score_deck(&layouts, &theme);
        assert_eq!(report.distinct_archetypes, 7);
        assert_eq!(report.summary.layout, 90.0);
        assert_eq!(report.summary.issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_empty_deck_is_clean() {
        let theme = default_theme().unwrap();
        let report = score_deck(&[], &theme);
        assert_eq!(report.summary.score, 100);
    }
}
