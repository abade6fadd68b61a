//! Plain list renderer: one email per line, sorted.

use crate::models::EmailMap;
use crate::output::{ReportRenderer, sorted_emails};

pub struct ListRenderer;

impl ReportRenderer for ListRenderer {
    fn render(&self, emails: &EmailMap) -> String {
        let mut out = String::new();
        for email in sorted_emails(emails) {
            out.push_str(email);
            out.push('\n');
        }
        out
    }
}
