use std::io::{self, IsTerminal, Write};

use chrono::{NaiveDate, Timelike};
use unicode_width::UnicodeWidthStr;

use crate::config::AlmanacConfig;
use crate::event::CalendarEvent;
use crate::grid::{DayCell, MONTH_GRID_CELLS, WeekDay};
use crate::label::LocaleLabels;
use crate::layout::{ProjectedDayEvent, ProjectedWeekEvent};

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &AlmanacConfig) -> Self {
        Self {
            color: cfg.color_enabled(),
        }
    }

    /// Prints the 6x7 month grid: day numbers, a trailing `*` on days
    /// with events, today painted, adjacent-month padding dimmed.
    #[tracing::instrument(skip(self, cells, labels))]
    pub fn print_month_view(
        &mut self,
        reference: NaiveDate,
        cells: &[DayCell],
        labels: &dyn LocaleLabels,
    ) -> anyhow::Result<()> {
        debug_assert_eq!(cells.len(), MONTH_GRID_CELLS);
        let mut out = io::stdout().lock();

        writeln!(out, "{}", labels.month_year_label(reference))?;
        for label in labels.weekday_labels() {
            write!(out, "{label:>4}")?;
        }
        writeln!(out)?;

        for row in cells.chunks(7) {
            for cell in row {
                let marker = if cell.events.is_empty() { " " } else { "*" };
                let text = format!("{:>3}{marker}", cell.day_number);
                let painted = if cell.is_today {
                    self.paint(&text, "7")
                } else if cell.is_selected {
                    self.paint(&text, "4")
                } else if !cell.is_current_month {
                    self.paint(&text, "2")
                } else {
                    text
                };
                write!(out, "{painted}")?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    /// One section per week day, events listed with their start times
    /// and grid coordinates.
    #[tracing::instrument(skip(self, days, events, labels))]
    pub fn print_week_view(
        &mut self,
        days: &[WeekDay],
        events: &[ProjectedWeekEvent],
        labels: &dyn LocaleLabels,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        for (idx, day) in days.iter().enumerate() {
            let column = idx as u32 + 1;
            let header = labels.weekday_label(day.date);
            let header = if day.is_today {
                self.paint(&header, "7")
            } else {
                header
            };
            writeln!(out, "{header}")?;

            for projected in events.iter().filter(|p| p.column == column) {
                writeln!(
                    out,
                    "  {} {} (rows {}-{})",
                    projected.event.start.format("%H:%M"),
                    projected.event.title,
                    projected.row_start,
                    projected.row_start + projected.row_span.max(1) - 1,
                )?;
            }
        }

        Ok(())
    }

    /// Hour-by-hour agenda for a single day, windowed to the configured
    /// hour range.
    #[tracing::instrument(skip(self, events, labels))]
    pub fn print_day_view(
        &mut self,
        date: NaiveDate,
        events: &[ProjectedDayEvent],
        hour_window: (u32, u32),
        labels: &dyn LocaleLabels,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let (hour_start, hour_end) = hour_window;

        writeln!(out, "{}", labels.long_date_label(date))?;
        for hour in hour_start..=hour_end {
            writeln!(out, "{hour:>2}:00")?;
            for projected in events.iter().filter(|p| p.event.start.hour() == hour) {
                let line = format!(
                    "      {}-{} {}",
                    projected.event.start.format("%H:%M"),
                    projected.event.end.format("%H:%M"),
                    projected.event.title,
                );
                writeln!(out, "{}", self.paint(&line, "36"))?;
            }
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, events, labels))]
    pub fn print_event_table(
        &mut self,
        events: &[CalendarEvent],
        labels: &dyn LocaleLabels,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let headers = vec![
            "ID".to_string(),
            "Date".to_string(),
            "Start".to_string(),
            "End".to_string(),
            "Title".to_string(),
        ];

        let mut rows = Vec::with_capacity(events.len());
        for event in events {
            rows.push(vec![
                self.paint(&event.id.to_string(), "33"),
                labels.short_date_label(event.start.date()),
                event.start.format("%H:%M").to_string(),
                event.end.format("%H:%M").to_string(),
                event.title.clone(),
            ]);
        }

        write_table(&mut out, headers, rows)
    }

    /// Raw projection coordinates, one row per event.
    #[tracing::instrument(skip(self, events))]
    pub fn print_week_projection_table(
        &mut self,
        events: &[ProjectedWeekEvent],
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let headers = vec![
            "ID".to_string(),
            "Title".to_string(),
            "Col".to_string(),
            "Row".to_string(),
            "Span".to_string(),
        ];

        let mut rows = Vec::with_capacity(events.len());
        for projected in events {
            rows.push(vec![
                self.paint(&projected.event.id.to_string(), "33"),
                projected.event.title.clone(),
                projected.column.to_string(),
                projected.row_start.to_string(),
                projected.row_span.to_string(),
            ]);
        }

        write_table(&mut out, headers, rows)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
