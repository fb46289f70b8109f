use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "almanac",
    version,
    about = "Almanac: calendar grids and event layout in the terminal",
    arg_required_else_help = false
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Config file path (otherwise ALMANAC_CONFIG or the platform
    /// config dir).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// JSONL file of events to seed the in-memory store with.
    #[arg(long = "events")]
    pub events: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render a calendar view around a reference date.
    Show {
        /// month, week or day; unknown tags fall back to the configured
        /// default view.
        view: Option<String>,

        /// Reference date expression (today, 2024-03-01, friday, +3d).
        #[arg(long = "date", default_value = "today")]
        date: String,
    },

    /// Print week-grid coordinates (column, row, span) for the week
    /// around a reference date.
    Agenda {
        #[arg(long = "date", default_value = "today")]
        date: String,
    },

    /// Add an event to the in-memory store and render its day.
    Add {
        title: String,

        /// Start expression (2024-03-01T09:00, "friday 3:30pm").
        #[arg(long = "from")]
        from: String,

        /// End expression.
        #[arg(long = "to")]
        to: String,

        #[arg(long = "color")]
        color: Option<String>,
    },

    /// List the seeded events as a table.
    Events,

    /// Print the seeded events as JSON.
    Export,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
