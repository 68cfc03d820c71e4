//! # scorecard
//!
//! A report synthesis library that turns free-form grading output into
//! structured, exportable reports: plain text, print-ready markup, a
//! word-processor document, and a styled spreadsheet with computed
//! aggregate statistics.
//!
//! The pipeline is pure and synchronous: raw grading text is segmented
//! into per-subject sections, scores and feedback are recovered by
//! pattern matching with graceful fallback, and the resulting records are
//! rendered into whichever export form the caller asks for. When the
//! grading backend already returns structured data, ingestion bypasses
//! the heuristics entirely.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Environment-backed configuration for export destinations
pub mod config;
/// Export orchestration and payload assembly
pub mod export;
/// Heuristic segmentation and score extraction for raw grading text
pub mod extract;
/// Structured grading-response ingestion
pub mod ingest;
/// Canonical structured representations of graded subjects
pub mod model;
/// Renderers for every supported export form
pub mod render;

pub use export::{
    DEFAULT_TITLE, ExportError, ExportFormat, ExportPayload, ExportRequest, export,
    overview_table,
};
pub use extract::{extract_records, split_sections};
pub use ingest::{GradingResponse, parse_response, reconcile_names};
pub use model::{QuestionDetail, ScoreRecord, Section};

/// Derives score records from a raw backend reply, whatever its shape.
///
/// A structured reply with at least one score entry wins; anything else
/// goes through the section splitter and score extractor. The returned
/// summary is only present for structured replies.
pub fn load_records(raw: &str) -> (Vec<ScoreRecord>, Option<String>) {
    if let Some(response) = parse_response(raw) {
        if !response.scores.is_empty() {
            tracing::info!(
                count = response.scores.len(),
                "using structured scores from the grading reply"
            );
            return (response.scores, response.summary);
        }
    }

    let sections = split_sections(raw);
    tracing::debug!(sections = sections.len(), "falling back to heuristic extraction");
    (extract_records(&sections), None)
}
