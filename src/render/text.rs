#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use super::fields::{DETAIL_HEADER, detail_fields, header_fields};
use crate::model::ScoreRecord;

/// Renders one record as a plain-text block, ending in a newline.
///
/// * `position`: zero-based index of the record within its collection, used
///   for the "Subject N" placeholder.
pub fn render_record(record: &ScoreRecord, position: usize) -> String {
    let mut lines: Vec<String> = header_fields(record, position)
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();

    if !record.details.is_empty() {
        lines.push(String::new());
        lines.push(DETAIL_HEADER.to_string());
        for (index, detail) in record.details.iter().enumerate() {
            for (label, value) in detail_fields(detail, index) {
                lines.push(format!("{label}: {value}"));
            }
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Renders a whole collection, one block per record with a blank line
/// between blocks. An empty collection falls back to the raw text.
pub fn render_all(records: &[ScoreRecord], raw_fallback: &str) -> String {
    if records.is_empty() {
        return render_raw(raw_fallback);
    }
    records
        .iter()
        .enumerate()
        .map(|(position, record)| render_record(record, position))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Raw-text passthrough, normalized to end in exactly one newline.
pub fn render_raw(raw: &str) -> String {
    let mut text = raw.trim_end().to_string();
    text.push('\n');
    text
}
