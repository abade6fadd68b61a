//! Report renderers: plain list, CSV line, JSON object.

pub mod csv;
pub mod json;
pub mod list;

use crate::models::{EmailMap, ReportFormat};

/// Trait for rendering the ID → email mapping to an output format.
pub trait ReportRenderer {
    /// Render the complete report, including its trailing newline.
    fn render(&self, emails: &EmailMap) -> String;
}

/// Render `emails` with the renderer for `format`.
pub fn render(format: ReportFormat, emails: &EmailMap) -> String {
    match format {
        ReportFormat::List => list::ListRenderer.render(emails),
        ReportFormat::Csv => csv::CsvRenderer.render(emails),
        ReportFormat::Json => json::JsonRenderer.render(emails),
    }
}

/// Email values in ascending lexicographic order. Duplicates are kept.
pub(crate) fn sorted_emails(emails: &EmailMap) -> Vec<&str> {
    let mut values: Vec<&str> = emails.values().map(String::as_str).collect();
    values.sort_unstable();
    values
}
