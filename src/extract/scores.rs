#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::sections::first_file_name;
use crate::model::{ScoreRecord, Section};

/// The three score markers the producer may emit, scanned independently.
static SCORE_MARKERS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?m)^[ \t]*Content Quality Score:[ \t]*(\d+)[ \t]*/[ \t]*100").unwrap(),
        Regex::new(r"(?m)^[ \t]*Structure Score:[ \t]*(\d+)[ \t]*/[ \t]*100").unwrap(),
        Regex::new(r"(?m)^[ \t]*Alignment Score:[ \t]*(\d+)[ \t]*/[ \t]*100").unwrap(),
    ]
});

/// Matches a `Feedback:` line and captures the text after the marker.
static FEEDBACK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*Feedback:[ \t]*(.*)$").unwrap());

/// Matches any line that opens a new score marker, e.g. `Structure Score:`.
static SCORE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*[A-Za-z][A-Za-z ]*Score:").unwrap());

/// Matches a line that opens a `File:` marker.
static FILE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \t]*File:").unwrap());

/// Subject name used when a section carries no `File:` marker at all.
pub const UNKNOWN_SUBJECT: &str = "Unknown";

/// Reasoning fallback when score evidence exists but no feedback line does,
/// so downstream consumers never see an empty reasoning field.
pub const FALLBACK_REASONING: &str = "Evaluation completed";

/// Separator between captured feedback entries in the reasoning string.
const FEEDBACK_SEPARATOR: &str = "; ";

/// Best-effort numeric score for one section's text: the arithmetic mean of
/// whichever of the three score markers are present, or `None` when none
/// match. Never defaults to 0 or 100.
fn extract_score(text: &str) -> Option<f64> {
    let values: Vec<f64> = SCORE_MARKERS
        .iter()
        .filter_map(|marker| marker.captures(text))
        .filter_map(|captures| captures[1].parse::<f64>().ok())
        .collect();

    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Collects every `Feedback:` entry in `text`, each extended by its
/// continuation lines. A continuation run is paragraph-scoped: it ends at
/// a blank line or at the next line that opens a `Feedback:`,
/// `<Label> Score:`, or `File:` marker.
fn collect_feedback(text: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    /// Pushes the entry being built onto `entries` if it has any content.
    fn flush(current: &mut Option<String>, entries: &mut Vec<String>) {
        if let Some(entry) = current.take() {
            let entry = entry.trim().to_string();
            if !entry.is_empty() {
                entries.push(entry);
            }
        }
    }

    for line in text.lines() {
        if let Some(captures) = FEEDBACK_LINE.captures(line) {
            flush(&mut current, &mut entries);
            current = Some(captures[1].trim().to_string());
        } else if line.trim().is_empty() || SCORE_LINE.is_match(line) || FILE_LINE.is_match(line)
        {
            flush(&mut current, &mut entries);
        } else if let Some(entry) = current.as_mut() {
            let continuation = line.trim();
            if !entry.is_empty() {
                entry.push(' ');
            }
            entry.push_str(continuation);
        }
    }
    flush(&mut current, &mut entries);

    entries
}

/// Derives a [`ScoreRecord`] from one section, or `None` when the section
/// carries neither a resolvable score nor any feedback line. Such sections
/// are producer output deemed non-evaluative, not an error.
pub fn extract_record(section: &Section) -> Option<ScoreRecord> {
    let score = extract_score(&section.text);
    let feedback = collect_feedback(&section.text);

    if score.is_none() && feedback.is_empty() {
        debug!(
            file = section.file_name.as_deref().unwrap_or(UNKNOWN_SUBJECT),
            "section has no score and no feedback; skipping"
        );
        return None;
    }

    let name = section
        .file_name
        .clone()
        .or_else(|| first_file_name(&section.text))
        .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string());

    let reasoning = if feedback.is_empty() {
        FALLBACK_REASONING.to_string()
    } else {
        feedback.join(FEEDBACK_SEPARATOR)
    };

    Some(ScoreRecord {
        name,
        score_percent: score,
        reasoning,
        details: Vec::new(),
    })
}

/// Derives score records from an ordered sequence of sections, silently
/// excluding the non-evaluative ones.
pub fn extract_records(sections: &[Section]) -> Vec<ScoreRecord> {
    sections.iter().filter_map(extract_record).collect()
}
