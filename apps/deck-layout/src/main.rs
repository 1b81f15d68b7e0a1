use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deck_layout::config::Config;
use deck_layout::deck::{layout_deck, parse_deck};
use deck_layout::layout::LayoutOutcome;
use deck_layout::theme::ThemeStore;
use deck_layout::validation::{score_deck, DeckReport};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckOutput {
    theme: String,
    layouts: Vec<LayoutOutcome>,
    report: DeckReport,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting deck-layout v{}", env!("CARGO_PKG_VERSION"));

    let mut store = ThemeStore::builtin().context("built-in themes failed to load")?;
    if let Some(dir) = &config.themes_dir {
        store = store
            .load_from_dir(dir)
            .with_context(|| format!("failed to read theme directory {}", dir.display()))?;
    }
    if store.get(&config.theme).is_none() {
        warn!(requested = %config.theme, fallback = store.default_id(), "Unknown theme, using default");
    }
    let theme = store.resolve(&config.theme);
    info!("Theme: {} ({} available)", theme.id, store.list().len());

    let input = fs::read_to_string(&config.input)
        .with_context(|| format!("failed to read deck file {}", config.input.display()))?;
    let slides = parse_deck(&input)?;
    info!("Laying out {} slides", slides.len());

    let layouts = layout_deck(slides, theme.clone()).await;
    let degraded = layouts.iter().filter(|o| o.is_degraded()).count();
    if degraded > 0 {
        warn!(degraded, "Some slides fell back to title-only layouts");
    }

    let results: Vec<_> = layouts.iter().map(|o| o.result().clone()).collect();
    let report = score_deck(&results, &theme);
    info!(
        "Deck score {} (accessible: {})",
        report.summary.score, report.summary.is_accessible
    );

    let output = DeckOutput {
        theme: theme.id.clone(),
        layouts,
        report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
