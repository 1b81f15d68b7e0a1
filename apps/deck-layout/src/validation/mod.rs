// Validation & Scoring Engine
// Independent checks over a computed layout or a rendered preview, combined into
// one weighted score. Never fails: a check that cannot run zeroes its category.

pub mod checks;
pub mod consistency;
pub mod issue;
pub mod live;
pub mod scorer;

pub use checks::{default_checks, CheckContext, CheckOutcome, ColorSample, LayoutCheck};
pub use consistency::{score_deck, DeckReport};
pub use issue::{Category, Issue, Severity, ValidationResult};
pub use live::{verify_colors, ColorMatch, ColorRole, ComputedStyleSource, StaticStyleSource};
pub use scorer::{overall_score, run_checks, score, ScoreTarget};
