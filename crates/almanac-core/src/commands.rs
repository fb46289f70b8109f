use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::cli::Command;
use crate::config::AlmanacConfig;
use crate::datetime::{parse_date_expr, parse_datetime_expr, start_of_week};
use crate::event::{CalendarEvent, EventDraft};
use crate::grid::{build_month_grid, build_week_grid};
use crate::label::EnglishLabels;
use crate::layout::{project_day_events, project_week_events};
use crate::render::Renderer;
use crate::store::EventStore;
use crate::view::CalendarView;

#[instrument(skip(store, cfg, renderer, command))]
pub fn dispatch(
    store: &mut EventStore,
    cfg: &AlmanacConfig,
    renderer: &mut Renderer,
    command: Option<Command>,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let command = command.unwrap_or(Command::Show {
        view: None,
        date: "today".to_string(),
    });

    match command {
        Command::Show { view, date } => cmd_show(store, cfg, renderer, view, &date, today),
        Command::Agenda { date } => cmd_agenda(store, renderer, &date, today),
        Command::Add {
            title,
            from,
            to,
            color,
        } => cmd_add(store, cfg, renderer, title, &from, &to, color, today),
        Command::Events => renderer.print_event_table(&store.all_events(), &EnglishLabels),
        Command::Export => cmd_export(store),
    }
}

#[instrument(skip(store, cfg, renderer, view_key, today))]
fn cmd_show(
    store: &EventStore,
    cfg: &AlmanacConfig,
    renderer: &mut Renderer,
    view_key: Option<String>,
    date_expr: &str,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command show");

    let view = match view_key.as_deref() {
        None => cfg.default_view(),
        Some(key) => match CalendarView::from_key(key) {
            Some(view) => view,
            None => {
                warn!(key, "unknown view tag; keeping configured view");
                cfg.default_view()
            }
        },
    };
    let reference = parse_date_expr(date_expr, today).context("invalid --date expression")?;

    match view {
        CalendarView::Month => {
            let grouped = store.events_for_month_grouped_by_day(reference);
            let cells = build_month_grid(reference, today, None, Some(&grouped));
            renderer.print_month_view(reference, &cells, &EnglishLabels)
        }
        CalendarView::Week => {
            let week_start = start_of_week(reference);
            let days = build_week_grid(week_start, today);
            let projected = project_week_events(&store.events_for_week(week_start));
            renderer.print_week_view(&days, &projected, &EnglishLabels)
        }
        CalendarView::Day => {
            let projected = project_day_events(&store.events_for_day(reference));
            let window = (cfg.day_view.hour_start, cfg.day_view.hour_end);
            renderer.print_day_view(reference, &projected, window, &EnglishLabels)
        }
    }
}

#[instrument(skip(store, renderer, today))]
fn cmd_agenda(
    store: &EventStore,
    renderer: &mut Renderer,
    date_expr: &str,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command agenda");

    let reference = parse_date_expr(date_expr, today).context("invalid --date expression")?;
    let week_start = start_of_week(reference);
    let projected = project_week_events(&store.events_for_week(week_start));
    renderer.print_week_projection_table(&projected)
}

#[instrument(skip(store, cfg, renderer, title, color, today))]
#[allow(clippy::too_many_arguments)]
fn cmd_add(
    store: &mut EventStore,
    cfg: &AlmanacConfig,
    renderer: &mut Renderer,
    title: String,
    from_expr: &str,
    to_expr: &str,
    color: Option<String>,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command add");

    let start = parse_datetime_expr(from_expr, today).context("invalid --from expression")?;
    let end = parse_datetime_expr(to_expr, today).context("invalid --to expression")?;

    let id = store.add(EventDraft {
        title,
        start,
        end,
        color,
    });
    println!("Created event {id}.");

    let projected = project_day_events(&store.events_for_day(start.date()));
    let window = (cfg.day_view.hour_start, cfg.day_view.hour_end);
    renderer.print_day_view(start.date(), &projected, window, &EnglishLabels)
}

#[instrument(skip(store))]
fn cmd_export(store: &EventStore) -> anyhow::Result<()> {
    info!("command export");

    let out = serde_json::to_string(&store.all_events())?;
    println!("{out}");
    Ok(())
}

/// Reads a JSONL seed file, one event per line. Blank lines are
/// skipped; a malformed line is an error naming the line number.
#[instrument(skip(path))]
pub fn load_events_jsonl(path: &Path) -> anyhow::Result<Vec<CalendarEvent>> {
    debug!(file = %path.display(), "loading events jsonl");
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let event: CalendarEvent = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {} line {}", path.display(), idx + 1))?;
        out.push(event);
    }

    debug!(count = out.len(), "loaded events from jsonl");
    Ok(out)
}
