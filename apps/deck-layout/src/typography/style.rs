//! Text style derivation: theme + semantic role + content length → concrete style.

use serde::{Deserialize, Serialize};

use crate::theme::ThemeTokens;

// ────────────────────────────────────────────────────────────────────────────
// Roles and options
// ────────────────────────────────────────────────────────────────────────────

/// Semantic role of a text block. Decides which theme scale entries apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Hero,
    Title,
    Subtitle,
    Heading,
    Body,
    Bullet,
    Caption,
    /// Large figure on a metric card.
    Metric,
}

/// Line-height category a role draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineCategory {
    Title,
    Heading,
    Body,
    Caption,
}

impl TextRole {
    fn line_category(self) -> LineCategory {
        match self {
            TextRole::Hero | TextRole::Title | TextRole::Metric => LineCategory::Title,
            TextRole::Subtitle | TextRole::Heading => LineCategory::Heading,
            TextRole::Body | TextRole::Bullet => LineCategory::Body,
            TextRole::Caption => LineCategory::Caption,
        }
    }

    /// Lowest responsive factor the role may shrink to.
    fn min_scale(self) -> f32 {
        match self {
            TextRole::Hero
            | TextRole::Title
            | TextRole::Subtitle
            | TextRole::Metric
            | TextRole::Caption => 0.9,
            TextRole::Heading | TextRole::Body | TextRole::Bullet => 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Subtle,
    #[default]
    Normal,
    Strong,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOptions {
    /// Overrides the role's palette color.
    pub color: Option<String>,
    /// `Some(true)` forces the bold weight, `Some(false)` the regular weight.
    pub bold: Option<bool>,
    pub italic: bool,
    /// Character count of the text the style will be applied to.
    pub content_length: Option<usize>,
    pub emphasis: Emphasis,
}

impl StyleOptions {
    pub fn for_text(text: &str) -> Self {
        Self {
            content_length: Some(text.chars().count()),
            ..Self::default()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    Uppercase,
    Lowercase,
    Capitalize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub color: String,
    /// 0.0 (invisible) – 1.0 (solid).
    pub opacity: f32,
}

/// Fully resolved text style. Sizes in points, letter spacing in em.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub role: TextRole,
    pub font_size: f32,
    pub font_family: String,
    pub font_weight: u16,
    pub line_height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    pub color: String,
    #[serde(default)]
    pub italic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<TextTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<TextShadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl TextStyle {
    /// Height of one line in points.
    pub fn line_pitch_pt(&self) -> f32 {
        self.font_size * self.line_height
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Derivation
// ────────────────────────────────────────────────────────────────────────────

const LARGE_FONT_PT: f32 = 24.0;
const SMALL_FONT_PT: f32 = 12.0;

/// Shrink factor for long content: full size under 150 characters, then
/// ×0.95 under 300, ×0.9 under 500, ×0.85 beyond.
pub fn responsive_scale(content_length: usize) -> f32 {
    match content_length {
        0..=149 => 1.0,
        150..=299 => 0.95,
        300..=499 => 0.9,
        _ => 0.85,
    }
}

/// Derives the concrete style for `role` under `theme`.
pub fn derive_text_style(role: TextRole, theme: &ThemeTokens, opts: &StyleOptions) -> TextStyle {
    let typo = &theme.typography;
    let palette = &theme.palette;
    let sizes = &typo.sizes;
    let weights = &typo.weights;
    let spacing = &typo.letter_spacing;

    let (base_size, family, weight, letter_spacing, color) = match role {
        TextRole::Hero => (
            sizes.hero,
            &typo.heading_family,
            weights.bold,
            spacing.tight,
            &palette.text_primary,
        ),
        TextRole::Title => (
            sizes.title,
            &typo.heading_family,
            weights.bold,
            spacing.tight,
            &palette.text_primary,
        ),
        TextRole::Subtitle => (
            sizes.subtitle,
            &typo.heading_family,
            weights.regular,
            spacing.normal,
            &palette.text_secondary,
        ),
        TextRole::Heading => (
            sizes.heading,
            &typo.heading_family,
            weights.semibold,
            spacing.normal,
            &palette.text_primary,
        ),
        TextRole::Body | TextRole::Bullet => (
            sizes.body,
            &typo.body_family,
            weights.regular,
            spacing.normal,
            &palette.text_primary,
        ),
        TextRole::Caption => (
            sizes.caption,
            &typo.body_family,
            weights.regular,
            spacing.wide,
            &palette.text_secondary,
        ),
        TextRole::Metric => (
            sizes.title,
            &typo.heading_family,
            weights.bold,
            spacing.tight,
            &palette.primary,
        ),
    };

    let responsive = opts
        .content_length
        .map(responsive_scale)
        .unwrap_or(1.0)
        .max(role.min_scale());

    let (emphasis_scale, weight_shift) = match opts.emphasis {
        Emphasis::Subtle => (1.0, -1),
        Emphasis::Normal => (1.0, 0),
        Emphasis::Strong => (1.05, 1),
    };

    let font_size = round_to_tenth(base_size * typo.scale * responsive * emphasis_scale);

    let mut font_weight = match opts.bold {
        Some(true) => weights.bold,
        Some(false) => weights.regular,
        None => weight,
    };
    font_weight = weights.shift(font_weight, weight_shift);

    let line_heights = &typo.line_heights;
    let mut line_height = match role.line_category() {
        LineCategory::Title => line_heights.title,
        LineCategory::Heading => line_heights.heading,
        LineCategory::Body => line_heights.body,
        LineCategory::Caption => line_heights.caption,
    };
    if font_size >= LARGE_FONT_PT {
        line_height *= 0.9;
    } else if font_size <= SMALL_FONT_PT {
        line_height *= 1.1;
    }

    TextStyle {
        role,
        font_size,
        font_family: family.clone(),
        font_weight,
        line_height,
        letter_spacing: (letter_spacing != 0.0).then_some(letter_spacing),
        color: opts.color.clone().unwrap_or_else(|| color.clone()),
        italic: opts.italic,
        text_transform: None,
        shadow: None,
        background: None,
    }
}

fn round_to_tenth(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::default_theme;

    fn theme() -> ThemeTokens {
        default_theme().unwrap()
    }

    #[test]
    fn test_responsive_scale_steps() {
        assert_eq!(responsive_scale(0), 1.0);
        assert_eq!(responsive_scale(149), 1.0);
        assert_eq!(responsive_scale(150), 0.95);
        assert_eq!(responsive_scale(299), 0.95);
        assert_eq!(responsive_scale(300), 0.9);
        assert_eq!(responsive_scale(500), 0.85);
    }

    #[test]
    fn test_title_uses_theme_scale() {
        let style = derive_text_style(TextRole::Title, &theme(), &StyleOptions::default());
        assert_eq!(style.font_size, 32.0);
        assert_eq!(style.font_weight, 700);
        assert_eq!(style.font_family, "Inter");
        assert_eq!(style.color, "#1F2937");
    }

    #[test]
    fn test_long_body_shrinks_to_085() {
        let opts = StyleOptions {
            content_length: Some(800),
            ..Default::default()
        };
        let style = derive_text_style(TextRole::Body, &theme(), &opts);
        assert!((style.font_size - 13.6).abs() < 1e-4, "got {}", style.font_size);
    }

    #[test]
    fn test_long_title_never_below_090() {
        let opts = StyleOptions {
            content_length: Some(800),
            ..Default::default()
        };
        let style = derive_text_style(TextRole::Title, &theme(), &opts);
        assert!((style.font_size - 28.8).abs() < 1e-4, "got {}", style.font_size);
    }

    #[test]
    fn test_caption_floor_is_090() {
        let opts = StyleOptions {
            content_length: Some(1000),
            ..Default::default()
        };
        let style = derive_text_style(TextRole::Caption, &theme(), &opts);
        assert!((style.font_size - 10.8).abs() < 1e-4, "got {}", style.font_size);
    }

    #[test]
    fn test_large_font_tightens_line_height() {
        let style = derive_text_style(TextRole::Title, &theme(), &StyleOptions::default());
        assert!((style.line_height - 1.35 * 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_small_font_loosens_line_height() {
        let style = derive_text_style(TextRole::Caption, &theme(), &StyleOptions::default());
        assert!((style.line_height - 1.4 * 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_body_line_height_untouched() {
        let style = derive_text_style(TextRole::Body, &theme(), &StyleOptions::default());
        assert_eq!(style.line_height, 1.5);
    }

    #[test]
    fn test_strong_emphasis_bumps_size_and_weight() {
        let opts = StyleOptions {
            emphasis: Emphasis::Strong,
            ..Default::default()
        };
        let style = derive_text_style(TextRole::Body, &theme(), &opts);
        assert!((style.font_size - 16.8).abs() < 1e-4);
        assert_eq!(style.font_weight, 500);
    }

    #[test]
    fn test_subtle_emphasis_drops_weight() {
        let opts = StyleOptions {
            emphasis: Emphasis::Subtle,
            ..Default::default()
        };
        let style = derive_text_style(TextRole::Body, &theme(), &opts);
        assert_eq!(style.font_weight, 300);
    }

    #[test]
    fn test_color_and_bold_overrides() {
        let opts = StyleOptions {
            color: Some("#FF0000".to_string()),
            bold: Some(true),
            italic: true,
            ..Default::default()
        };
        let style = derive_text_style(TextRole::Body, &theme(), &opts);
        assert_eq!(style.color, "#FF0000");
        assert_eq!(style.font_weight, 700);
        assert!(style.italic);
    }

    #[test]
    fn test_theme_scale_multiplies_sizes() {
        let mut t = theme();
        t.typography.scale = 1.5;
        let style = derive_text_style(TextRole::Body, &t, &StyleOptions::default());
        assert_eq!(style.font_size, 24.0);
    }

    #[test]
    fn test_zero_letter_spacing_is_omitted() {
        let style = derive_text_style(TextRole::Body, &theme(), &StyleOptions::default());
        assert_eq!(style.letter_spacing, None);
        let title = derive_text_style(TextRole::Title, &theme(), &StyleOptions::default());
        assert_eq!(title.letter_spacing, Some(-0.02));
    }
}
