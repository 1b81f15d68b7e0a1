use serde::Serialize;
use thiserror::Error;

/// Engine-level error type.
///
/// Nothing in the layout or scoring path propagates these past an archetype or
/// check boundary; they surface as diagnostics on the returned result instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Malformed content: {0}")]
    MalformedContent(String),

    #[error("Theme error: {0}")]
    Theme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raised by a layout calculator while constructing boxes for one slide.
///
/// The engine converts every variant into a title-only fallback layout, so the
/// `Display` text is what ends up in `metadata.errors`.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutError {
    #[error("table row {row} has {found} cells, expected {expected}")]
    MalformedTable {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("table has no header columns")]
    EmptyTable,

    #[error("grid must have between 1 and {max} rows and columns, got {columns}x{rows}")]
    InvalidGrid {
        columns: u32,
        rows: u32,
        max: u32,
    },

    #[error("no vertical space left for content ({available:.2} units)")]
    NoSpace { available: f32 },

    #[error("content does not match the {expected} archetype")]
    ArchetypeMismatch { expected: &'static str },

    #[error("calculator panicked: {message}")]
    Panicked { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_table_message_names_row() {
        let err = LayoutError::MalformedTable {
            row: 2,
            expected: 3,
            found: 1,
        };
        assert_eq!(err.to_string(), "table row 2 has 1 cells, expected 3");
    }

    #[test]
    fn test_invalid_color_message() {
        let err = EngineError::InvalidColor("#zzz".to_string());
        assert!(err.to_string().contains("#zzz"));
    }
}
