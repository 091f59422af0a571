//! Text rendering of the inventory list and the entry form.
//!
//! Supports a fixed-width table for the terminal and pretty JSON for
//! scripting.

use library_core::BookRecord;

use crate::form::BookForm;

/// Column headings of the inventory list.
const HEADINGS: [&str; 5] = ["Book Name", "Book ID", "Author", "Status", "Card ID"];

/// Output format for a one-shot listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text table.
    Table,
    /// Pretty-printed JSON array.
    Json,
}

/// Formats the records in the requested output format.
pub fn format_records(records: &[BookRecord], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Table => Ok(render_table(records, None)),
        OutputFormat::Json => serde_json::to_string_pretty(records)
            .map_err(|e| format!("JSON serialization failed: {e}")),
    }
}

/// Renders the list as a table with 1-based row numbers.
///
/// The row whose id equals `selected` is marked with `*`.
pub fn render_table(records: &[BookRecord], selected: Option<&str>) -> String {
    if records.is_empty() {
        return "(no records)\n".to_string();
    }

    let rows: Vec<[&str; 5]> = records
        .iter()
        .map(|r| {
            [
                r.name.as_str(),
                r.id.as_str(),
                r.author.as_str(),
                r.status.kind().as_str(),
                r.card_id(),
            ]
        })
        .collect();

    let mut widths = HEADINGS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let number_width = records.len().to_string().len().max(1);

    let mut out = String::new();
    push_line(&mut out, "  ", &" ".repeat(number_width), &HEADINGS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, "  ", &"-".repeat(number_width), &rule, &widths);

    for (index, (row, record)) in rows.iter().zip(records).enumerate() {
        let marker = if selected == Some(record.id.as_str()) { "* " } else { "  " };
        push_line(
            &mut out,
            marker,
            &format!("{:>number_width$}", index + 1),
            row,
            &widths,
        );
    }
    out
}

fn push_line(out: &mut String, marker: &str, number: &str, cells: &[&str], widths: &[usize]) {
    out.push_str(marker);
    out.push_str(number);
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(" | ");
        out.push_str(cell);
        out.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
    }
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}

/// Renders the form fields, one per line.
pub fn render_form(form: &BookForm) -> String {
    let id_note = if form.is_id_locked() { " (locked)" } else { "" };
    format!(
        "Book Name:   {}\nBook ID:     {}{}\nAuthor Name: {}\nStatus:      {}\n",
        form.name,
        form.id(),
        id_note,
        form.author,
        form.status
    )
}
