#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Export orchestration: turns a score collection (or raw grading text)
//! into a fully formed payload for one of the supported formats, plus a
//! ranked terminal overview for interactive use.

use std::str::FromStr;

use chrono::Local;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};
use tracing::info;
use typed_builder::TypedBuilder;

use crate::{
    extract::split_sections,
    model::ScoreRecord,
    render::{markup, naming, text, workbook},
};

/// Title fallback when neither the current nor the last used title
/// resolves to a non-blank value.
pub const DEFAULT_TITLE: &str = "Report";

/// An error produced while assembling an export payload.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// The requested format name is not one of the supported four.
    #[error("Unknown export format `{0}` (expected txt, html, doc, or xlsx)")]
    UnknownFormat(String),
    /// The spreadsheet layer failed to assemble the workbook.
    #[error("Could not assemble the workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    /// Unknown error.
    #[error("Unknown error: {0}")]
    Unknown(#[from] anyhow::Error),
}

/// The supported export forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain-text report (`.txt`).
    Text,
    /// Print-ready markup document (`.html`).
    Print,
    /// Word-processor document (`.doc`); same bytes as [`Self::Print`],
    /// different media type.
    Document,
    /// Styled spreadsheet with the computed summary block (`.xlsx`).
    Workbook,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Print => "html",
            Self::Document => "doc",
            Self::Workbook => "xlsx",
        }
    }

    /// Media type label handed to the download collaborator.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Print => "text/html",
            Self::Document => "application/msword",
            Self::Workbook => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "html" | "print" => Ok(Self::Print),
            "doc" => Ok(Self::Document),
            "xlsx" | "workbook" => Ok(Self::Workbook),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// A fully formed export, ready for the download collaborator.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    /// Sanitized (and, for repeatable exports, timestamped) filename.
    pub file_name:  String,
    /// Media type label for the payload.
    pub media_type: &'static str,
    /// The finished document bytes.
    pub bytes:      Vec<u8>,
}

/// Everything one export call needs, builder-constructed.
///
/// `records` is preferred when non-empty; `raw_text` is the fallback body
/// for the degraded rendering paths and the emptiness check.
#[derive(Debug, Clone, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[builder(doc)]
pub struct ExportRequest {
    /// Structured records to render, possibly empty.
    pub records:         Vec<ScoreRecord>,
    /// Raw grading text used when no structured records are available.
    pub raw_text:        String,
    /// Current report title.
    pub title:           String,
    /// Title of the previous export, preferred over `title` when set.
    pub last_used_title: String,
}

impl ExportRequest {
    /// True when there is nothing at all to export.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.raw_text.trim().is_empty()
    }

    /// Convenience wrapper around [`export`].
    pub fn export(&self, format: ExportFormat) -> Result<Option<ExportPayload>, ExportError> {
        export(self, format)
    }
}

/// Builds the export payload for one format.
///
/// Returns `Ok(None)` when the request carries no usable data: producing
/// no output and no side effect is the documented way of signaling
/// "nothing to export". Text and workbook exports carry a timestamp;
/// print and document exports use the plain `<title>.<ext>` form.
pub fn export(
    request: &ExportRequest,
    format: ExportFormat,
) -> Result<Option<ExportPayload>, ExportError> {
    if request.is_empty() {
        info!("nothing to export; skipping");
        return Ok(None);
    }

    let title = naming::resolve_title(&request.last_used_title, &request.title, DEFAULT_TITLE);

    let (file_name, bytes) = match format {
        ExportFormat::Text => {
            let content = text::render_all(&request.records, &request.raw_text);
            // A single-subject export carries the subject in its filename.
            let subject = match request.records.as_slice() {
                [only] => Some(only.display_name(0)),
                _ => None,
            };
            let file_name = naming::timestamped_file_name(
                title,
                subject.as_deref(),
                format.extension(),
                Local::now(),
            );
            (file_name, content.into_bytes())
        }
        ExportFormat::Print | ExportFormat::Document => {
            let body = if request.records.is_empty() {
                markup::render_sections(&split_sections(&request.raw_text))
            } else {
                markup::render_all(&request.records, &request.raw_text)
            };
            let document = markup::document(title, &body);
            (naming::plain_file_name(title, format.extension()), document.into_bytes())
        }
        ExportFormat::Workbook => {
            let bytes = workbook::build_workbook(&request.records, title)?;
            let file_name =
                naming::timestamped_file_name(title, None, format.extension(), Local::now());
            (file_name, bytes)
        }
    };

    info!(file = file_name.as_str(), media_type = format.media_type(), "export ready");
    Ok(Some(ExportPayload {
        file_name,
        media_type: format.media_type(),
        bytes,
    }))
}

/// One row of the terminal overview table.
#[derive(Tabled)]
struct OverviewRow {
    /// Resolved subject display name.
    #[tabled(rename = "Subject")]
    name:   String,
    /// Two-decimal score or the unscored literal.
    #[tabled(rename = "Score")]
    score:  String,
    /// Grading summary for the subject.
    #[tabled(rename = "Reason")]
    reason: String,
}

/// Renders the ranked overview table shown in the terminal, with the
/// collection average in the footer.
pub fn overview_table(records: &[ScoreRecord]) -> String {
    let summary = workbook::summarize(records);

    let rows: Vec<OverviewRow> = summary
        .ranked
        .iter()
        .enumerate()
        .map(|(position, record)| OverviewRow {
            name:   record.display_name(position),
            score:  record.formatted_score(),
            reason: record.reasoning.clone(),
        })
        .collect();

    let average = match summary.average {
        Some(average) => format!("{average:.2}"),
        None => workbook::NO_AVERAGE.to_string(),
    };

    Table::new(&rows)
        .with(Panel::header("Evaluation Overview"))
        .with(Panel::footer(format!("Average: {average}")))
        .with(Modify::new(Rows::new(1..)).with(Width::wrap(40).keep_words(true)))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(
            Modify::new(Rows::last())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern())
        .to_string()
}
