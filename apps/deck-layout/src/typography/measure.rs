//! Text measurement providers: estimate how many lines, and how much height,
//! a block of text needs at a given width.
//!
//! Neither provider shapes text. `HeuristicMeasurer` assumes every glyph is
//! `0.6em` wide; `GlyphTableMeasurer` sums per-character widths from a static
//! table and word-wraps greedily. Both are approximations: there is no
//! per-family metric data beyond a width class, so cross-family accuracy is
//! unverified. Calculators only see the `TextMeasurer` trait, so real font
//! metrics can be plugged in without touching layout code.

use crate::theme::POINTS_PER_UNIT;
use crate::typography::style::TextStyle;

/// Average glyph width as a fraction of the font size.
pub const AVERAGE_GLYPH_EM: f32 = 0.6;

pub trait TextMeasurer: Send + Sync {
    /// Number of lines `text` wraps to inside `max_width` canvas units.
    /// Empty or whitespace-only text occupies zero lines.
    fn line_count(&self, text: &str, style: &TextStyle, max_width: f32) -> u32;

    /// Estimated rendered height in canvas units.
    fn estimate_height(&self, text: &str, style: &TextStyle, max_width: f32) -> f32 {
        let lines = self.line_count(text, style, max_width) as f32;
        lines * style.line_pitch_pt() / POINTS_PER_UNIT
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Average-width heuristic
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasurer;

impl HeuristicMeasurer {
    /// Characters that fit on one line, never less than one.
    pub fn chars_per_line(style: &TextStyle, max_width: f32) -> usize {
        let glyph_pt = style.font_size * AVERAGE_GLYPH_EM;
        if glyph_pt <= 0.0 {
            return 1;
        }
        // The epsilon keeps exact fits (e.g. 288pt / 9.6pt) from rounding down.
        ((max_width * POINTS_PER_UNIT / glyph_pt + 1e-3).floor() as usize).max(1)
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn line_count(&self, text: &str, style: &TextStyle, max_width: f32) -> u32 {
        let len = text.trim().chars().count();
        if len == 0 {
            return 0;
        }
        len.div_ceil(Self::chars_per_line(style, max_width)) as u32
    }
}

/// Heuristic height estimate: `ceil(len / chars_per_line) × font_size × line_height`.
pub fn estimate_text_height(content: &str, style: &TextStyle, max_width: f32) -> f32 {
    HeuristicMeasurer.estimate_height(content, style, max_width)
}

// ────────────────────────────────────────────────────────────────────────────
// Glyph-table measurer
// ────────────────────────────────────────────────────────────────────────────

/// Coarse width class of a font family, relative to the reference sans table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Sans,
    /// Humanist sans that runs slightly wider (Lato and similar).
    WideSans,
    Serif,
    Condensed,
}

impl WidthClass {
    pub fn from_family(family: &str) -> Self {
        let f = family.to_ascii_lowercase();
        if ["oswald", "condensed", "narrow", "compressed"]
            .iter()
            .any(|k| f.contains(k))
        {
            WidthClass::Condensed
        } else if ["garamond", "serif", "times", "georgia", "computer modern"]
            .iter()
            .any(|k| f.contains(k))
            && !f.contains("sans")
        {
            WidthClass::Serif
        } else if f.contains("lato") {
            WidthClass::WideSans
        } else {
            WidthClass::Sans
        }
    }

    fn factor(self) -> f32 {
        match self {
            WidthClass::Sans => 1.0,
            WidthClass::WideSans => 1.05,
            WidthClass::Serif => 0.85,
            WidthClass::Condensed => 0.68,
        }
    }
}

/// Reference sans-serif advance widths in em, ASCII 0x20..=0x7E.
#[rustfmt::skip]
static SANS_WIDTHS: [f32; 95] = [
    // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
    0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
    // 0-9
    0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
    // :     ;     <     =     >     ?     @
    0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
    // A-M
    0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
    // N-Z
    0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
    // [     \     ]     ^     _     `
    0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
    // a-m
    0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
    // n-z
    0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
    // {     |     }     ~
    0.33, 0.26, 0.33, 0.59,
];

const SANS_FALLBACK_WIDTH: f32 = 0.52;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphTableMeasurer;

impl GlyphTableMeasurer {
    /// Width of `s` in em for the given width class, excluding letter spacing.
    pub fn measure_em(s: &str, class: WidthClass) -> f32 {
        let raw: f32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    SANS_WIDTHS[code - 32]
                } else {
                    SANS_FALLBACK_WIDTH
                }
            })
            .sum();
        raw * class.factor()
    }

    /// Greedy word wrap of one paragraph. Returns the number of lines (≥ 1 for
    /// non-empty input). A word wider than the line still takes one line.
    fn wrap_paragraph(paragraph: &str, class: WidthClass, tracking: f32, line_em: f32) -> u32 {
        let word_width = |w: &str| Self::measure_em(w, class) + tracking * w.chars().count() as f32;
        let space = Self::measure_em(" ", class) + tracking;

        let mut lines = 0u32;
        let mut current = 0.0_f32;
        for word in paragraph.split_whitespace() {
            let w = word_width(word);
            if lines == 0 {
                lines = 1;
                current = w;
            } else if current + space + w > line_em {
                lines += 1;
                current = w;
            } else {
                current += space + w;
            }
        }
        lines
    }
}

impl TextMeasurer for GlyphTableMeasurer {
    fn line_count(&self, text: &str, style: &TextStyle, max_width: f32) -> u32 {
        if style.font_size <= 0.0 {
            return 0;
        }
        let class = WidthClass::from_family(&style.font_family);
        let tracking = style.letter_spacing.unwrap_or(0.0);
        let line_em = max_width * POINTS_PER_UNIT / style.font_size;
        text.lines()
            .map(|p| Self::wrap_paragraph(p, class, tracking, line_em))
            .sum()
    }
}
