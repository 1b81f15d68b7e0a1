//! Slide layout and validation engine.
//!
//! Given a theme and a structured description of slide content, computes where
//! every element goes on a fixed 16:9 canvas, how its text is styled, and how
//! well the result holds up against typography, contrast and layout rules.

pub mod config;
pub mod deck;
pub mod errors;
pub mod layout;
pub mod theme;
pub mod typography;
pub mod validation;

pub use deck::layout_deck;
pub use errors::{EngineError, LayoutError};
pub use layout::{calculate_layout, ContentSpec, LayoutOutcome, LayoutResult};
pub use theme::{ThemeStore, ThemeTokens};
pub use validation::{score, score_deck, ScoreTarget, ValidationResult};
