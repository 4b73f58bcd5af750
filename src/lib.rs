#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod render;
pub mod utils;
pub mod widgets;

// The engine
pub mod engine;

// Re-export commonly used types
pub use data::{HttpFetcher, SnapshotSource};
pub use domain::{Side, Snapshot};
pub use engine::DeckEngine;
pub use error::FetchError;
pub use render::{ConsoleSurface, RenderSurface};
pub use widgets::{WidgetPatch, WidgetState, WidgetTree};

use std::time::Duration;

// CLI argument parsing
use clap::Parser;

use crate::config::TUNING;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Snapshot endpoint to poll
    #[arg(long, default_value_t = TUNING.refresh.endpoint.to_string())]
    pub endpoint: String,

    /// Seconds between cycle completions
    #[arg(long, default_value_t = TUNING.refresh.period_secs)]
    pub period_secs: u64,

    /// Run a single cycle and exit
    #[arg(long, default_value_t = false)]
    pub once: bool,
}

/// Wire the HTTP source to the console surface and run the loop.
/// This is the public API for the binary to call.
pub async fn run_deck(args: &Cli) {
    let source = HttpFetcher::new(args.endpoint.clone());
    let surface = ConsoleSurface::new();
    let mut engine = DeckEngine::new(source, surface, Duration::from_secs(args.period_secs));

    log::info!("Polling {} every {}s", args.endpoint, args.period_secs);
    engine.run(args.once).await;
}
