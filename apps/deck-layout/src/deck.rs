//! Deck fan-out: every slide is laid out on the blocking pool.
//!
//! # spawn_blocking pattern
//! Layout is pure and CPU-bound. Each slide gets its own `spawn_blocking` task
//! holding owned data (`ContentSpec` plus a shared `Arc<ThemeTokens>`), so the
//! tokio scheduler stays free. Handles are awaited in input order, which keeps
//! the output aligned with the input regardless of completion order.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::errors::{EngineError, LayoutError};
use crate::layout::{calculate_layout, fallback_layout, ContentSpec, LayoutOutcome};
use crate::theme::ThemeTokens;

type SlideLayout = fn(&ContentSpec, &ThemeTokens) -> LayoutOutcome;

/// Lays out every slide concurrently. Output order matches `slides`.
///
/// A worker that panics becomes a title-only `Fallback` for its slide; the
/// other slides are unaffected.
pub async fn layout_deck(slides: Vec<ContentSpec>, theme: Arc<ThemeTokens>) -> Vec<LayoutOutcome> {
    layout_deck_with(slides, theme, calculate_layout).await
}

pub(crate) async fn layout_deck_with(
    slides: Vec<ContentSpec>,
    theme: Arc<ThemeTokens>,
    layout: SlideLayout,
) -> Vec<LayoutOutcome> {
    debug!(slides = slides.len(), theme = %theme.id, "Laying out deck");

    let handles: Vec<_> = slides
        .into_iter()
        .map(|spec| {
            let worker_spec = spec.clone();
            let worker_theme = Arc::clone(&theme);
            let handle =
                tokio::task::spawn_blocking(move || layout(&worker_spec, &worker_theme));
            (spec, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (index, (spec, handle)) in handles.into_iter().enumerate() {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = join_error_message(e);
                warn!(slide = index, error = %message, "Layout worker failed, using title-only layout");
                fallback_layout(&spec, &theme, LayoutError::Panicked { message })
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}

/// Parses a deck file: either a bare array of slide specs or an object with a
/// `slides` array.
pub fn parse_deck(json: &str) -> Result<Vec<ContentSpec>, EngineError> {
    let slides = match serde_json::from_str::<Value>(json)? {
        Value::Array(slides) => slides,
        Value::Object(mut obj) => match obj.remove("slides") {
            Some(Value::Array(slides)) => slides,
            _ => {
                return Err(EngineError::MalformedContent(
                    "deck object must hold a `slides` array".to_string(),
                ))
            }
        },
        _ => {
            return Err(EngineError::MalformedContent(
                "deck must be an array of slides".to_string(),
            ))
        }
    };

    slides
        .into_iter()
        .enumerate()
        .map(|(i, slide)| {
            ContentSpec::from_value(slide)
                .map_err(|e| EngineError::MalformedContent(format!("slide {i}: {e}")))
        })
        .collect()
}

fn join_error_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    panic_message(err.into_panic())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(s) => *s,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(s) => (*s).to_string(),
            Err(_) => "unknown panic payload".to_string(),
        },
    }
}
