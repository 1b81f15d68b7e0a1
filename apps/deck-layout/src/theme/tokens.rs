//! Theme tokens: immutable bundles of palette, typography, spacing and canvas values.
//!
//! All lengths are canvas units (inches on the default 10 × 5.625 slide);
//! all font sizes are points.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Canvas constants
// ────────────────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 10.0;
pub const CANVAS_HEIGHT: f32 = 5.625;
/// Points per canvas unit. Font sizes are points, geometry is canvas units.
pub const POINTS_PER_UNIT: f32 = 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Token bundle
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTokens {
    pub id: String,
    pub name: String,
    pub palette: Palette,
    pub typography: TypographyTokens,
    #[serde(default)]
    pub spacing: SpacingScale,
    #[serde(default)]
    pub layout: LayoutTokens,
}

/// Color roles as CSS-style color strings (`#RRGGBB` or `rgb(...)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub text_on_primary: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyTokens {
    pub heading_family: String,
    pub body_family: String,
    #[serde(default)]
    pub weights: WeightScale,
    #[serde(default)]
    pub sizes: SizeScale,
    #[serde(default)]
    pub line_heights: LineHeightScale,
    #[serde(default)]
    pub letter_spacing: LetterSpacingScale,
    /// Global multiplier applied to every size in `sizes`.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightScale {
    pub light: u16,
    pub regular: u16,
    pub medium: u16,
    pub semibold: u16,
    pub bold: u16,
}

impl Default for WeightScale {
    fn default() -> Self {
        Self {
            light: 300,
            regular: 400,
            medium: 500,
            semibold: 600,
            bold: 700,
        }
    }
}

impl WeightScale {
    /// Ordered steps, lightest first.
    pub fn steps(&self) -> [u16; 5] {
        [self.light, self.regular, self.medium, self.semibold, self.bold]
    }

    /// Moves `weight` by `delta` steps along the scale, saturating at either end.
    pub fn shift(&self, weight: u16, delta: i32) -> u16 {
        let steps = self.steps();
        let idx = steps
            .iter()
            .position(|&w| w >= weight)
            .unwrap_or(steps.len() - 1) as i32;
        let target = (idx + delta).clamp(0, steps.len() as i32 - 1);
        steps[target as usize]
    }
}

/// Font sizes in points per semantic role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeScale {
    pub hero: f32,
    pub title: f32,
    pub subtitle: f32,
    pub heading: f32,
    pub body: f32,
    pub caption: f32,
}

impl Default for SizeScale {
    fn default() -> Self {
        Self {
            hero: 44.0,
            title: 32.0,
            subtitle: 24.0,
            heading: 20.0,
            body: 16.0,
            caption: 12.0,
        }
    }
}

/// Unitless line-height multipliers per content category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineHeightScale {
    pub title: f32,
    pub heading: f32,
    pub body: f32,
    pub caption: f32,
}

impl Default for LineHeightScale {
    fn default() -> Self {
        Self {
            title: 1.35,
            heading: 1.35,
            body: 1.5,
            caption: 1.4,
        }
    }
}

/// Letter spacing in em.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterSpacingScale {
    pub tight: f32,
    pub normal: f32,
    pub wide: f32,
}

impl Default for LetterSpacingScale {
    fn default() -> Self {
        Self {
            tight: -0.02,
            normal: 0.0,
            wide: 0.05,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Spacing
// ────────────────────────────────────────────────────────────────────────────

/// Named spacing steps in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingScale {
    pub xs: f32,
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
    pub xxl: f32,
    pub xxxl: f32,
}

impl Default for SpacingScale {
    fn default() -> Self {
        Self {
            xs: 0.05,
            sm: 0.1,
            md: 0.2,
            lg: 0.3,
            xl: 0.4,
            xxl: 0.6,
            xxxl: 0.8,
        }
    }
}

/// Gap between grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingPreset {
    Tight,
    #[default]
    Normal,
    Spacious,
}

impl SpacingScale {
    /// Gap between the title box and the first content box.
    pub fn title_to_content(&self) -> f32 {
        self.lg
    }

    /// Gap between side-by-side content columns.
    pub fn column_gap(&self) -> f32 {
        self.xl
    }

    /// Gutter of the 12-column grid.
    pub fn grid_gutter(&self) -> f32 {
        self.md
    }

    pub fn cell_gap(&self, preset: SpacingPreset) -> f32 {
        match preset {
            SpacingPreset::Tight => self.sm,
            SpacingPreset::Normal => self.md,
            SpacingPreset::Spacious => self.lg,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTokens {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Inset from every canvas edge that placed boxes must respect.
    pub safe_margin: f32,
}

impl Default for LayoutTokens {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            safe_margin: 0.4,
        }
    }
}
