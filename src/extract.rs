#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Heuristic recovery of structured score data from raw grading text.
//!
//! The grading backend concatenates free-form evaluation output for every
//! uploaded file into one blob with no machine-parseable delimiter. This
//! module segments that blob into per-subject [`Section`]s and scans each
//! section for numeric scores and feedback, degrading to coarser output
//! instead of failing when the text does not match the expected shape.
//!
//! [`Section`]: crate::model::Section

/// Score and feedback recovery from one section's text.
pub mod scores;
/// Raw-text segmentation into per-subject sections.
pub mod sections;

pub use scores::{extract_record, extract_records};
pub use sections::{CONTENT_MARKER, DESIGN_MARKER, split_sections};
