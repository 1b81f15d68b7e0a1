use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Sub-score an issue counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Typography,
    Accessibility,
    Layout,
    ColorHarmony,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: Category,
    pub property: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn new(
        severity: Severity,
        category: Category,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            property: property.into(),
            expected: None,
            actual: None,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn expected_actual(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Scores are 0–100; a clean slide scores 100 everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub score: u32,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    pub accessibility: f64,
    pub typography: f64,
    pub layout: f64,
    pub color_harmony: f64,
    pub is_accessible: bool,
}

impl ValidationResult {
    pub fn has_high_severity(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::High)
    }

    pub fn issues_in(&self, category: Category) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.category == category)
    }
}
