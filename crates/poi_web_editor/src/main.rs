// SPDX-License-Identifier: MIT OR Apache-2.0
//! `POI Web` - editor-time tool for point-of-interest node webs.
//!
//! Authors a node web asset on disk one command at a time:
//! - Create webs and remember the last one opened
//! - Add, duplicate and remove nodes and bridges
//! - Connect, link and re-weight connections
//! - Query distances, routes and the nearest point of interest
//!
//! ## Architecture
//!
//! All session state (the open web, the preferences file) is created here
//! and passed down explicitly. The web is saved after every successful edit.

mod cli;
mod commands;
mod preferences;
mod session;

use clap::Parser;
use cli::Cli;
use preferences::Preferences;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("poi_web_editor={level},poi_web_graph={level}")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Starting POI Web v{}", env!("CARGO_PKG_VERSION"));

    let loaded = Preferences::load_or_default(&cli.prefs);
    let mut prefs = loaded.clone();
    let result = commands::execute(&cli.command, cli.web.as_deref(), &mut prefs);

    if let Err(e) = prefs.save_if_changed(&loaded, &cli.prefs) {
        tracing::warn!("Failed to save preferences to {}: {}", cli.prefs.display(), e);
    }

    match result {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report.data) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        tracing::error!("Failed to encode output: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", report.message);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
