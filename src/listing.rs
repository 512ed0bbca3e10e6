//! Text and JSON output for the `list` command

use crate::catalog::{Catalog, FormEntry, FormResponse, ListKind, SyncJob, TableEntry};
use crate::formatting::{format_thousands, format_timestamp, render_text_table};
use crate::table::{PageView, Record, TableQuery};
use serde::Serialize;

/// Widest a cell may grow before it is truncated
const MAX_CELL_WIDTH: usize = 40;

/// Page buttons shown under a list
const MAX_PAGE_BUTTONS: usize = 5;

/// A record that can be shown as one row of a list view
pub trait ListRow: Record + Serialize {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl ListRow for TableEntry {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Source", "Records", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.source.clone(),
            self.records.map_or_else(|| "-".to_string(), format_thousands),
            self.status_badge(),
        ]
    }
}

impl ListRow for FormEntry {
    const HEADERS: &'static [&'static str] =
        &["ID", "Name", "Type", "Responses", "Status", "Last Converted"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.form_type.to_string(),
            format_thousands(self.responses),
            self.kg_status.label().to_string(),
            format_timestamp(self.last_converted),
        ]
    }
}

impl ListRow for SyncJob {
    const HEADERS: &'static [&'static str] =
        &["ID", "Name", "Type", "Source", "Status", "Last Run", "Nodes"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.job_type.to_string(),
            self.source_collection.clone(),
            self.status.to_string(),
            format_timestamp(self.last_activity()),
            self.metrics
                .map_or_else(|| "-".to_string(), |m| format_thousands(m.nodes_upserted)),
        ]
    }
}

impl ListRow for FormResponse {
    const HEADERS: &'static [&'static str] =
        &["ID", "Submitted By", "Submitted At", "Location", "Answers"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.submitted_by.clone(),
            format_timestamp(Some(self.submitted_at)),
            self.location.clone(),
            self.answers.len().to_string(),
        ]
    }
}

/// Renders one page as a text table with a "Showing a to b of n" footer and
/// the page button row.
pub fn render_page<R: ListRow>(view: &PageView<'_, R>) -> String {
    let rows: Vec<Vec<String>> = view.items.iter().map(|r| r.cells()).collect();
    let mut out = render_text_table(R::HEADERS, &rows, MAX_CELL_WIDTH);
    out.push('\n');

    match view.showing_range() {
        Some((first, last)) => {
            out.push_str(&format!(
                "\nShowing {first} to {last} of {}",
                format_thousands(view.total_count as u64)
            ));
        }
        None if view.total_count == 0 => out.push_str("\nNo matching records"),
        None if view.page == 0 => out.push_str(&format!(
            "\nPage 0 is before the first page ({} pages)",
            view.total_pages
        )),
        None => out.push_str(&format!(
            "\nPage {} is past the end ({} pages)",
            view.page, view.total_pages
        )),
    }

    if view.total_pages > 1 {
        let buttons: Vec<String> = view
            .page_buttons(MAX_PAGE_BUTTONS)
            .map(|p| {
                if p == view.page {
                    format!("[{p}]")
                } else {
                    p.to_string()
                }
            })
            .collect();
        let prev = if view.has_previous() { "<" } else { " " };
        let next = if view.has_next() { ">" } else { " " };
        out.push_str(&format!("\n{prev} {} {next}", buttons.join(" ")));
    }
    out
}

fn render<R: ListRow>(records: &[R], query: &TableQuery, json: bool) -> serde_json::Result<String> {
    let view = query.apply(records);
    if json {
        serde_json::to_string_pretty(&view)
    } else {
        Ok(render_page(&view))
    }
}

/// Runs `query` over one catalog collection and renders the resulting page.
///
/// # Errors
///
/// Returns `Err` only if JSON output was requested and serialization failed.
pub fn list_catalog(
    catalog: &Catalog,
    kind: ListKind,
    query: &TableQuery,
    json: bool,
) -> serde_json::Result<String> {
    match kind {
        ListKind::Tables => render(&catalog.tables, query, json),
        ListKind::Forms => render(&catalog.forms, query, json),
        ListKind::Jobs => render(&catalog.sync_jobs, query, json),
        ListKind::Responses => render(&catalog.responses, query, json),
    }
}
