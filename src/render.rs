#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Deterministic rendering of score records into every supported export
//! form.
//!
//! All renderers share one formatting contract ([`fields`]) so a plain-text
//! export and the corresponding print/document export can never disagree on
//! content, only on wrapper syntax.

/// The shared field contract consumed by the textual renderers.
pub mod fields;
/// Markup rendering, escaping, and the shared document container.
pub mod markup;
/// Title resolution, filename sanitization, and export file naming.
pub mod naming;
/// Plain-text rendering.
pub mod text;
/// The styled spreadsheet builder.
pub mod workbook;

pub use naming::{plain_file_name, resolve_title, sanitize_fragment, timestamped_file_name};
pub use workbook::{TIE_TOLERANCE, WorkbookSummary, build_workbook, summarize};
