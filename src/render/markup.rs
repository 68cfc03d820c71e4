#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use super::fields::{DETAIL_HEADER, detail_fields, header_fields};
use crate::{
    extract::{CONTENT_MARKER, DESIGN_MARKER},
    model::{ScoreRecord, Section},
};

/// Heading for the content half of a split evaluation section.
const CONTENT_HEADING: &str = "Content Evaluation";
/// Heading for the visual-design half of a split evaluation section.
const DESIGN_HEADING: &str = "Visual Design Evaluation";

/// Escapes `&`, `<`, and `>` before user-supplied text is embedded in
/// HTML-bearing output. `&` must go first.
pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders one record as a markup block.
///
/// Field values and order are identical to the plain-text renderer; only
/// the wrapper syntax differs.
pub fn render_record(record: &ScoreRecord, position: usize) -> String {
    let mut parts: Vec<String> = vec!["<div class=\"record\">".to_string()];

    for (label, value) in header_fields(record, position) {
        parts.push(format!("<p><strong>{label}:</strong> {}</p>", escape_html(&value)));
    }

    if !record.details.is_empty() {
        parts.push(format!("<h3>{DETAIL_HEADER}</h3>"));
        for (index, detail) in record.details.iter().enumerate() {
            parts.push("<div class=\"question\">".to_string());
            for (label, value) in detail_fields(detail, index) {
                parts.push(format!(
                    "<p><strong>{}:</strong> {}</p>",
                    escape_html(&label),
                    escape_html(&value)
                ));
            }
            parts.push("</div>".to_string());
        }
    }

    parts.push("</div>".to_string());
    parts.join("\n")
}

/// Renders a whole collection by concatenating per-record blocks. An empty
/// collection falls back to escaped raw-text rendering.
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

/// Raw-text fallback: escaped, with line breaks converted to explicit
/// line-break markup.
pub fn render_raw(raw: &str) -> String {
    format!("<p>{}</p>", escape_html(raw.trim_end()).replace('\n', "<br>\n"))
}

/// Renders one raw evaluation section.
///
/// When the section contains both the content and the visual-design
/// marker, it is split at the first occurrence of each into two labeled
/// sub-blocks; otherwise the whole section renders as one undivided block.
pub fn render_section(section: &Section) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(file_name) = &section.file_name {
        parts.push(format!("<h2>{}</h2>", escape_html(file_name)));
    }

    let text = section.text.as_str();
    match (text.find(CONTENT_MARKER), text.find(DESIGN_MARKER)) {
        (Some(content_at), Some(design_at)) if content_at < design_at => {
            parts.push(format!("<h3>{CONTENT_HEADING}</h3>"));
            parts.push(render_raw(&text[..design_at]));
            parts.push(format!("<h3>{DESIGN_HEADING}</h3>"));
            parts.push(render_raw(&text[design_at..]));
        }
        _ => parts.push(render_raw(text)),
    }

    parts.join("\n")
}

/// Renders every section in order, concatenating their blocks.
pub fn render_sections(sections: &[Section]) -> String {
    sections.iter().map(render_section).collect::<Vec<_>>().join("\n")
}

/// Wraps a rendered body in the self-contained document container.
///
/// Both the print export and the word-processor export use this function
/// on the same body, so the two payloads are byte-identical and differ
/// only in media type.
pub fn document(title: &str, body: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\nbody {{ font-family: Arial, sans-serif; margin: 2em; line-height: 1.5; }}\n\
         h1 {{ border-bottom: 2px solid #366092; padding-bottom: 0.3em; }}\n\
         h2 {{ color: #1F4E78; }}\n\
         h3 {{ color: #366092; }}\n\
         .record {{ margin-bottom: 1.5em; }}\n\
         .question {{ margin: 0.5em 0 0.5em 1.5em; }}\n\
         </style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}
