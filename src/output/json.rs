//! JSON output renderer.
//!
//! Outputs `{"<id>": "<email>", ...}` with keys in ascending numeric
//! order and four-space indentation.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::models::EmailMap;
use crate::output::ReportRenderer;

const INDENT: &[u8] = b"    ";

/// JSON output renderer.
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, emails: &EmailMap) -> String {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));

        let mut out = match emails.serialize(&mut serializer) {
            Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| "{}".to_string()),
            Err(_) => "{}".to_string(),
        };
        out.push('\n');
        out
    }
}
