//! Theme Token Store: named, immutable token bundles with an explicit default.
//!
//! Built-in themes are embedded JSON files; extra themes can be loaded from a
//! directory at startup. After construction the store is read-only, and themes
//! are handed out as `Arc<ThemeTokens>` so concurrent slide workers can share them.

pub mod color;
pub mod tokens;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::EngineError;

pub use color::{contrast_ratio, Rgb};
pub use tokens::{
    LayoutTokens, Palette, SpacingPreset, SpacingScale, ThemeTokens, TypographyTokens,
    CANVAS_HEIGHT, CANVAS_WIDTH, POINTS_PER_UNIT,
};

pub const DEFAULT_THEME_ID: &str = "default";

const DEFAULT_JSON: &str = include_str!("../../themes/default.json");
const MIDNIGHT_JSON: &str = include_str!("../../themes/midnight.json");
const CORPORATE_JSON: &str = include_str!("../../themes/corporate.json");
const HIGH_CONTRAST_JSON: &str = include_str!("../../themes/high-contrast.json");

/// Parses a single theme from its JSON form.
pub fn load_theme_from_str(content: &str) -> Result<ThemeTokens, EngineError> {
    let theme: ThemeTokens = serde_json::from_str(content)?;
    if theme.id.trim().is_empty() {
        return Err(EngineError::Theme("theme id must not be empty".to_string()));
    }
    Ok(theme)
}

/// Theme lookup table.
///
/// The default theme is part of the store's state rather than a global: whoever
/// builds the store decides which id unresolved lookups fall back to.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    themes: BTreeMap<String, Arc<ThemeTokens>>,
    default_id: String,
}

impl ThemeStore {
    /// Creates a store holding only `default_theme`.
    pub fn new(default_theme: ThemeTokens) -> Self {
        let default_id = default_theme.id.clone();
        let mut themes = BTreeMap::new();
        themes.insert(default_id.clone(), Arc::new(default_theme));
        Self { themes, default_id }
    }

    /// The embedded theme set: `default`, `midnight`, `corporate`, `high-contrast`.
    pub fn builtin() -> Result<Self, EngineError> {
        let mut store = Self::new(load_theme_from_str(DEFAULT_JSON)?);
        for json in [MIDNIGHT_JSON, CORPORATE_JSON, HIGH_CONTRAST_JSON] {
            store.register(load_theme_from_str(json)?);
        }
        Ok(store)
    }

    /// Registers every `*.json` theme in `dir` on top of the current set.
    ///
    /// Files that fail to read or parse are skipped with a warning; a missing
    /// directory is not an error.
    pub fn load_from_dir(mut self, dir: &Path) -> Result<Self, EngineError> {
        if !dir.exists() {
            debug!(path = %dir.display(), "Theme directory does not exist, skipping");
            return Ok(self);
        }

        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|e| e == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let parsed = fs::read_to_string(&path)
                .map_err(EngineError::from)
                .and_then(|content| load_theme_from_str(&content));
            match parsed {
                Ok(theme) => {
                    debug!(id = %theme.id, path = %path.display(), "Loaded theme");
                    self.register(theme);
                }
                Err(e) => warn!(path = %path.display(), "Skipping theme file: {e}"),
            }
        }
        Ok(self)
    }

    /// Adds or replaces a theme. Replacing the default theme keeps it the default.
    pub fn register(&mut self, theme: ThemeTokens) {
        self.themes.insert(theme.id.clone(), Arc::new(theme));
    }

    /// Switches the fallback theme. Fails if `id` is not registered.
    pub fn with_default(mut self, id: &str) -> Result<Self, EngineError> {
        if !self.themes.contains_key(id) {
            return Err(EngineError::Theme(format!("unknown default theme '{id}'")));
        }
        self.default_id = id.to_string();
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Option<Arc<ThemeTokens>> {
        self.themes.get(id).cloned()
    }

    /// Looks up `id`, falling back to the default theme when it is unknown.
    pub fn resolve(&self, id: &str) -> Arc<ThemeTokens> {
        match self.themes.get(id) {
            Some(theme) => Arc::clone(theme),
            None => {
                debug!(requested = id, fallback = %self.default_id, "Unknown theme id, using default");
                self.default_theme()
            }
        }
    }

    pub fn default_theme(&self) -> Arc<ThemeTokens> {
        // `default_id` is only ever set to a key present in `themes`, and themes
        // are never removed.
        Arc::clone(&self.themes[&self.default_id])
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Theme ids in sorted order.
    pub fn list(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }
}

/// The built-in default theme on its own, for callers that do not need a store.
pub fn default_theme() -> Result<ThemeTokens, EngineError> {
    load_theme_from_str(DEFAULT_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_themes_parse() {
        let store = ThemeStore::builtin().unwrap();
        assert_eq!(
            store.list(),
            vec!["corporate", "default", "high-contrast", "midnight"]
        );
        assert_eq!(store.default_id(), DEFAULT_THEME_ID);
    }

    #[test]
    fn test_builtin_palettes_are_valid_colors() {
        let store = ThemeStore::builtin().unwrap();
        for id in store.list() {
            let theme = store.get(id).unwrap();
            let p = &theme.palette;
            for c in [
                &p.primary,
                &p.secondary,
                &p.accent,
                &p.background,
                &p.surface,
                &p.text_primary,
                &p.text_secondary,
                &p.text_on_primary,
            ] {
                assert!(c.parse::<Rgb>().is_ok(), "theme {id} has bad color {c}");
            }
        }
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_default() {
        let store = ThemeStore::builtin().unwrap();
        let theme = store.resolve("does-not-exist");
        assert_eq!(theme.id, "default");
    }

    #[test]
    fn test_resolve_known_theme() {
        let store = ThemeStore::builtin().unwrap();
        assert_eq!(store.resolve("midnight").id, "midnight");
    }

    #[test]
    fn test_with_default_switches_fallback() {
        let store = ThemeStore::builtin()
            .unwrap()
            .with_default("corporate")
            .unwrap();
        assert_eq!(store.resolve("nope").id, "corporate");
    }

    #[test]
    fn test_with_default_rejects_unknown_id() {
        assert!(ThemeStore::builtin().unwrap().with_default("nope").is_err());
    }

    #[test]
    fn test_omitted_sections_use_defaults() {
        let theme = default_theme().unwrap();
        assert_eq!(theme.layout.canvas_width, CANVAS_WIDTH);
        assert_eq!(theme.layout.canvas_height, CANVAS_HEIGHT);
        assert_eq!(theme.typography.sizes.title, 32.0);
        assert_eq!(theme.spacing.title_to_content(), 0.3);
    }

    #[test]
    fn test_empty_id_rejected() {
        let json = DEFAULT_JSON.replacen("\"default\"", "\"\"", 1);
        assert!(load_theme_from_str(&json).is_err());
    }

    #[test]
    fn test_load_from_dir_registers_json_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let ocean = DEFAULT_JSON
            .replacen("\"default\"", "\"ocean\"", 1)
            .replacen("\"Default\"", "\"Ocean\"", 1);
        std::fs::write(dir.path().join("ocean.json"), ocean).unwrap();
        let mut broken = std::fs::File::create(dir.path().join("broken.json")).unwrap();
        writeln!(broken, "{{ not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = ThemeStore::builtin()
            .unwrap()
            .load_from_dir(dir.path())
            .unwrap();
        assert_eq!(store.resolve("ocean").name, "Ocean");
        assert_eq!(store.list().len(), 5);
    }

    #[test]
    fn test_load_from_missing_dir_is_noop() {
        let store = ThemeStore::builtin()
            .unwrap()
            .load_from_dir(Path::new("/definitely/not/here"))
            .unwrap();
        assert_eq!(store.list().len(), 4);
    }
}
