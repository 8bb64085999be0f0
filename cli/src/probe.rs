//! Availability probing without a browser.
//!
//! Runs the same engine the page uses against a fetched response, so a click
//! position can be resolved to a table from the command line.

#[cfg(test)]
#[path = "probe_test.rs"]
mod probe_test;

use tablemap::camera::Point;
use tablemap::engine::{Action, EngineCore, Notice};
use tablemap::error::LoadError;
use tablemap::panel::SelectionSummary;
use tablemap::table::{AvailabilityQuery, AvailabilityResponse, Table};

/// Result of resolving a click against one availability response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Selected(SelectionSummary),
    Miss,
    NoTables(String),
    Failed(String),
}

/// Canvas the click is resolved against, in CSS pixels.
#[derive(Debug, Clone, Copy)]
pub struct PickCanvas {
    pub width: f64,
    pub height: f64,
}

/// Join the base URL and endpoint path with exactly one slash.
#[must_use]
pub fn availability_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
}

/// One line per table for terminal output.
#[must_use]
pub fn table_row(table: &Table) -> String {
    format!(
        "{:>6}  {:<12} {:<8} ({}, {})",
        table.id,
        table.label(),
        table.section.label(),
        table.coordinates_x,
        table.coordinates_y
    )
}

#[must_use]
pub fn summary_line(table_count: usize, guests: u32) -> String {
    let tables = if table_count == 1 { "table" } else { "tables" };
    let people = if guests == 1 { "guest" } else { "guests" };
    format!("{table_count} {tables} available for {guests} {people}")
}

/// Load `result` into a fresh engine and click at `point`.
#[must_use]
pub fn pick(
    query: AvailabilityQuery,
    result: Result<AvailabilityResponse, LoadError>,
    canvas: PickCanvas,
    point: Point,
) -> PickOutcome {
    let mut core = EngineCore::default();
    core.set_viewport(canvas.width, canvas.height, 1.0);
    let (ticket, _) = core.begin_load(query);

    for action in core.finish_load(&ticket, result) {
        if let Action::ShowMessage(notice) = action {
            return match notice {
                Notice::NoTables(text) => PickOutcome::NoTables(text),
                Notice::Error(text) => PickOutcome::Failed(text),
            };
        }
    }

    let selection = core.on_click(point).into_iter().find_map(|action| match action {
        Action::SelectionChanged(summary) => Some(summary),
        _ => None,
    });
    match selection.flatten() {
        Some(summary) => PickOutcome::Selected(summary),
        None => PickOutcome::Miss,
    }
}
