//! Plain-text result table summarising every batch of a run

use crate::algorithm::executor::BatchSummary;
use std::fmt;

/// Column headings, in display order
pub const COLUMNS: [&str; 8] = [
    "Vertex number",
    "Method",
    "Found",
    "Found time (s)",
    "Not found",
    "Not found time (s)",
    "Limit exceeded",
    "Skipped",
];

/// Rows of batch summaries rendered as an aligned text table
#[derive(Clone, Debug, Default)]
pub struct ResultTable {
    rows: Vec<[String; 8]>,
}

fn format_seconds(seconds: Option<f64>) -> String {
    seconds.map_or_else(|| "-".to_string(), |s| format!("{s:.4}"))
}

impl ResultTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append the row for one batch
    pub fn push(&mut self, summary: &BatchSummary) {
        let limit = if summary.was_cut_short() {
            format!("{} (+{} not started)", summary.limit_exceeded, summary.not_started)
        } else {
            summary.limit_exceeded.to_string()
        };
        self.rows.push([
            summary.label.clone(),
            summary.method.title(),
            summary.found.to_string(),
            format_seconds(summary.mean_found_seconds()),
            summary.not_found.to_string(),
            format_seconds(summary.mean_not_found_seconds()),
            limit,
            summary.skipped.to_string(),
        ]);
    }

    /// Number of rows
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Test if no rows were added
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one row
    pub fn row(&self, index: usize) -> Option<&[String; 8]> {
        self.rows.get(index)
    }

    fn column_widths(&self) -> [usize; 8] {
        let mut widths = COLUMNS.map(str::len);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

fn write_separator(f: &mut fmt::Formatter<'_>, widths: &[usize; 8]) -> fmt::Result {
    for width in widths {
        write!(f, "+{}", "-".repeat(width + 2))?;
    }
    writeln!(f, "+")
}

fn write_row<'c>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize; 8],
    cells: impl IntoIterator<Item = &'c str>,
) -> fmt::Result {
    for (&width, cell) in widths.iter().zip(cells) {
        write!(f, "| {cell:>width$} ")?;
    }
    writeln!(f, "|")
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        write_separator(f, &widths)?;
        write_row(f, &widths, COLUMNS)?;
        write_separator(f, &widths)?;
        for row in &self.rows {
            write_row(f, &widths, row.iter().map(String::as_str))?;
        }
        write_separator(f, &widths)
    }
}
