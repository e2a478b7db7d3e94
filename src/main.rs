//! ActivityPanel — paginated activity dashboard.
//!
//! Thin binary entry point. All logic lives in the `activitypanel-core`
//! and `activitypanel-gui` crates.

use activitypanel_core::PanelConfig;
use clap::Parser;
use std::path::PathBuf;

/// Open a paginated activity panel served at URL.
#[derive(Debug, Parser)]
#[command(name = "activitypanel", version, about)]
struct Args {
    /// Page that renders the initial panel fragment.
    url: String,

    /// JSON config file (durations, locale, palettes).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    tracing::info!("ActivityPanel starting");

    let config = match &args.config {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };

    // Load the first page *before* opening the window so counters start
    // animating on the first rendered frame.
    let state = activitypanel_gui::AppState::new(args.url, config)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("ActivityPanel")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ActivityPanel",
        options,
        Box::new(|cc| {
            Ok(Box::new(activitypanel_gui::ActivityPanelApp::with_state(
                cc, state,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
