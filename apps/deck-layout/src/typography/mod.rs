// Typography Calculator
// Derives concrete text styles from theme tokens and estimates rendered text height.

pub mod accessibility;
pub mod measure;
pub mod style;

pub use accessibility::{validate_typography_accessibility, TypographyFinding, TypographyReport};
pub use measure::{
    estimate_text_height, GlyphTableMeasurer, HeuristicMeasurer, TextMeasurer, WidthClass,
};
pub use style::{
    derive_text_style, responsive_scale, Emphasis, StyleOptions, TextRole, TextShadow, TextStyle,
    TextTransform,
};
