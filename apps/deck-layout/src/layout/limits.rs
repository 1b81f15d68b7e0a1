//! Recommended content limits. Exceeding one is a warning, never an error.

use crate::layout::spec::{ColumnSpec, ContentSpec};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentLimits {
    pub max_title_chars: usize,
    pub max_bullets: usize,
    pub max_bullet_chars: usize,
    pub max_paragraph_chars: usize,
    pub max_metrics: usize,
    pub max_table_rows: usize,
    pub max_table_columns: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 60,
            max_bullets: 6,
            max_bullet_chars: 120,
            max_paragraph_chars: 600,
            max_metrics: 8,
            max_table_rows: 10,
            max_table_columns: 6,
        }
    }
}

impl ContentLimits {
    /// Non-fatal findings for `spec`, in reading order.
    pub fn check(&self, spec: &ContentSpec) -> Vec<String> {
        let mut warnings = self.check_title(spec.title());

        let body = match spec {
            ContentSpec::Title { .. } => Vec::new(),
            ContentSpec::Bullets { bullets, .. } => {
                if bullets.iter().all(|b| b.trim().is_empty()) {
                    vec!["Bullets slide has no bullet items".to_string()]
                } else {
                    self.check_bullets(bullets)
                }
            }
            ContentSpec::TwoColumn { left, right, .. } => {
                let present: Vec<&ColumnSpec> = left
                    .iter()
                    .chain(right.iter())
                    .filter(|c| !c.is_empty())
                    .collect();
                if present.is_empty() {
                    vec!["Two-column slide has no column content".to_string()]
                } else {
                    present
                        .into_iter()
                        .flat_map(|c| {
                            let mut w = self.check_bullets(&c.bullets);
                            w.extend(self.check_paragraph(c.paragraph.as_deref()));
                            w
                        })
                        .collect()
                }
            }
            ContentSpec::ImageLeft(s) | ContentSpec::ImageRight(s) => {
                let mut w = Vec::new();
                if s.image.src.trim().is_empty() {
                    w.push("Image slide has an empty image source".to_string());
                }
                if s.image.alt.as_deref().map_or(true, |a| a.trim().is_empty()) {
                    w.push("Image has no alt text".to_string());
                }
                w.extend(self.check_paragraph(s.text.as_deref()));
                w.extend(self.check_bullets(&s.bullets));
                w
            }
            ContentSpec::Chart { chart, .. } => {
                if chart.has_data() {
                    Vec::new()
                } else {
                    vec!["Chart has no data series".to_string()]
                }
            }
            ContentSpec::ComparisonTable { table, .. } => {
                let mut w = Vec::new();
                if table.rows.len() > self.max_table_rows {
                    w.push(format!(
                        "Table has {} rows; more than {} is hard to read",
                        table.rows.len(),
                        self.max_table_rows
                    ));
                }
                if table.headers.len() > self.max_table_columns {
                    w.push(format!(
                        "Table has {} columns; consider at most {}",
                        table.headers.len(),
                        self.max_table_columns
                    ));
                }
                w
            }
            ContentSpec::Grid { grid, .. } => {
                if grid.cells.is_empty() {
                    vec!["Grid declares no cells".to_string()]
                } else {
                    Vec::new()
                }
            }
            ContentSpec::Metrics { metrics, .. } => {
                if metrics.is_empty() {
                    vec!["Metrics slide has no metrics".to_string()]
                } else if metrics.len() > self.max_metrics {
                    vec![format!(
                        "{} metrics exceed the recommended {}",
                        metrics.len(),
                        self.max_metrics
                    )]
                } else {
                    Vec::new()
                }
            }
            ContentSpec::SingleColumn {
                paragraph, bullets, ..
            } => {
                let mut w = self.check_paragraph(paragraph.as_deref());
                w.extend(self.check_bullets(bullets));
                w
            }
        };

        warnings.extend(body);
        warnings
    }

    fn check_title(&self, title: &str) -> Vec<String> {
        let len = title.trim().chars().count();
        if len == 0 {
            vec!["Slide has no title".to_string()]
        } else if len > self.max_title_chars {
            vec![format!(
                "Title is {len} characters; keep it under {}",
                self.max_title_chars
            )]
        } else {
            Vec::new()
        }
    }

    fn check_bullets(&self, bullets: &[String]) -> Vec<String> {
        let mut warnings = Vec::new();
        if bullets.len() > self.max_bullets {
            warnings.push(format!(
                "{} bullets exceed the recommended {}",
                bullets.len(),
                self.max_bullets
            ));
        }
        warnings.extend(bullets.iter().enumerate().filter_map(|(i, b)| {
            let len = b.chars().count();
            (len > self.max_bullet_chars).then(|| {
                format!(
                    "Bullet {} is {len} characters; keep bullets under {}",
                    i + 1,
                    self.max_bullet_chars
                )
            })
        }));
        warnings
    }

    fn check_paragraph(&self, paragraph: Option<&str>) -> Vec<String> {
        match paragraph {
            Some(p) if p.chars().count() > self.max_paragraph_chars => vec![format!(
                "Paragraph is {} characters; consider splitting it",
                p.chars().count()
            )],
            _ => Vec::new(),
        }
    }
}

impl ContentSpec {
    /// Warnings against the default [`ContentLimits`].
    pub fn validate(&self) -> Vec<String> {
        ContentLimits::default().check(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullets(n: usize) -> ContentSpec {
        ContentSpec::Bullets {
            title: "Agenda".to_string(),
            bullets: (0..n).map(|i| format!("Point {i}")).collect(),
        }
    }

    #[test]
    fn test_plain_title_slide_is_clean() {
        let spec = ContentSpec::Title {
            title: "Quarterly Results".to_string(),
            subtitle: None,
        };
        assert!(spec.validate().is_empty());
    }

    #[test]
    fn test_too_many_bullets_warns_once() {
        let w = bullets(8).validate();
        assert_eq!(w.len(), 1, "{w:?}");
        assert!(w[0].contains("8 bullets"));
        assert!(bullets(6).validate().is_empty());
    }

    #[test]
    fn test_long_title_and_bullet() {
        let spec = ContentSpec::Bullets {
            title: "T".repeat(80),
            bullets: vec!["b".repeat(130)],
        };
        let w = spec.validate();
        assert_eq!(w.len(), 2, "{w:?}");
        assert!(w[0].starts_with("Title is 80"));
        assert!(w[1].starts_with("Bullet 1"));
    }

    #[test]
    fn test_degenerate_slides() {
        assert!(!bullets(0).validate().is_empty());
        let spec = ContentSpec::TwoColumn {
            title: "Compare".to_string(),
            left: Some(ColumnSpec::default()),
            right: None,
        };
        assert_eq!(spec.validate(), vec!["Two-column slide has no column content"]);
    }

    #[test]
    fn test_custom_limits() {
        let limits = ContentLimits {
            max_bullets: 2,
            ..Default::default()
        };
        assert_eq!(limits.check(&bullets(3)).len(), 1);
    }
}
