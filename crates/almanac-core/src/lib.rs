pub mod binding;
pub mod cli;
pub mod commands;
pub mod config;
pub mod datetime;
pub mod event;
pub mod grid;
pub mod label;
pub mod layout;
pub mod picker;
pub mod render;
pub mod store;
pub mod view;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(verbose = cli.verbose, quiet = cli.quiet, "starting almanac CLI");

    let cfg = config::AlmanacConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?;

    let mut store = store::EventStore::new();
    if let Some(path) = cli.events.as_deref() {
        let events = commands::load_events_jsonl(path)
            .with_context(|| format!("failed to seed events from {}", path.display()))?;
        debug!(count = events.len(), "seeding event store");
        store.load_all(events);
    }

    let mut renderer = render::Renderer::new(&cfg);
    let today = chrono::Local::now().date_naive();

    commands::dispatch(&mut store, &cfg, &mut renderer, cli.command, today)?;

    info!("done");
    Ok(())
}
