//! Color parsing and comparison: WCAG contrast and RGB similarity.
//!
//! Theme palettes and computed preview styles both arrive as strings. Everything
//! is normalized to 8-bit sRGB before comparison; alpha is parsed and dropped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// WCAG AA threshold for normal-size body text.
pub const WCAG_AA: f64 = 4.5;
/// WCAG AA threshold for large text and graphical objects.
pub const WCAG_AA_LARGE: f64 = 3.0;

/// Largest possible Euclidean distance between two sRGB colors.
const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// WCAG 2.x relative luminance.
    pub fn relative_luminance(self) -> f64 {
        let r = srgb_to_linear(self.r as f64 / 255.0);
        let g = srgb_to_linear(self.g as f64 / 255.0);
        let b = srgb_to_linear(self.b as f64 / 255.0);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    pub fn distance(self, other: Rgb) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Similarity percentage in `0.0..=100.0`; identical colors score 100.
    pub fn similarity(self, other: Rgb) -> f64 {
        ((1.0 - self.distance(other) / MAX_RGB_DISTANCE) * 100.0).clamp(0.0, 100.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = EngineError;

    /// Accepts `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || EngineError::InvalidColor(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let lower = trimmed.to_ascii_lowercase();
        let inner = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(invalid());
        }
        let channel = |p: &str| -> Result<u8, EngineError> {
            let value: f64 = p.parse().map_err(|_| invalid())?;
            if !(0.0..=255.0).contains(&value) {
                return Err(invalid());
            }
            Ok(value.round() as u8)
        };
        Ok(Rgb::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
        ))
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Rgb::new(digits.next()??, digits.next()??, digits.next()??))
        }
        6 | 8 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG contrast ratio between two colors, in `1.0..=21.0`. Symmetric.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Parses both strings and returns their contrast ratio.
pub fn contrast_between(fg: &str, bg: &str) -> Result<f64, EngineError> {
    Ok(contrast_ratio(fg.parse()?, bg.parse()?))
}
