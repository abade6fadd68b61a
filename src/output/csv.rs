//! CSV renderer.
//!
//! Emits a single line of sorted emails joined with `", "`.

use crate::models::EmailMap;
use crate::output::{ReportRenderer, sorted_emails};

const SEPARATOR: &str = ", ";

pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn render(&self, emails: &EmailMap) -> String {
        let mut line = sorted_emails(emails).join(SEPARATOR);
        line.push('\n');
        line
    }
}
