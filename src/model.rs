#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder rendered for an absent question field.
pub const FIELD_PLACEHOLDER: &str = "-";

/// Returns the owned placeholder for serde field defaults.
fn placeholder() -> String {
    FIELD_PLACEHOLDER.to_string()
}

/// One evaluated question or criterion within a [`ScoreRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDetail {
    /// The question text, or a concise label when the question is long.
    #[serde(default = "placeholder")]
    pub question:       String,
    /// The answer the student gave, as recovered by the grader.
    #[serde(default = "placeholder")]
    pub student_answer: String,
    /// The correct answer, taken from the key or inferred by the grader.
    #[serde(default = "placeholder")]
    pub correct_answer: String,
    /// Whether the grader judged the answer correct. Anything other than a
    /// strict `true` on the wire renders as "Incorrect".
    #[serde(default)]
    pub is_correct:     bool,
    /// Optional per-question feedback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback:       Option<String>,
}

impl Default for QuestionDetail {
    fn default() -> Self {
        Self {
            question:       placeholder(),
            student_answer: placeholder(),
            correct_answer: placeholder(),
            is_correct:     false,
            feedback:       None,
        }
    }
}

impl QuestionDetail {
    /// Evaluation result literal: "Correct" iff the grader said so.
    pub fn result_label(&self) -> &'static str {
        if self.is_correct { "Correct" } else { "Incorrect" }
    }

    /// The feedback text, if present and not blank.
    pub fn feedback_text(&self) -> Option<&str> {
        self.feedback
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }
}

/// The structured evaluation result for one graded subject (a student or an
/// uploaded file).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Subject display name. May be empty on the wire; use
    /// [`ScoreRecord::display_name`] for rendering.
    #[serde(default)]
    pub name:          String,
    /// Score in `[0, 100]` when known. `None` is the unscored sentinel; it is
    /// propagated as-is and never coerced to zero.
    #[serde(default, deserialize_with = "lenient_score")]
    pub score_percent: Option<f64>,
    /// Free-text grading summary; may be empty.
    #[serde(default)]
    pub reasoning:     String,
    /// Per-question evaluations in the order the grader emitted them. The
    /// order establishes the "Q1, Q2, ..." numbering.
    #[serde(default)]
    pub details:       Vec<QuestionDetail>,
}

impl ScoreRecord {
    /// Display name for this record, falling back to a positional
    /// "Subject N" placeholder when the name is empty.
    ///
    /// * `position`: zero-based index of the record within its collection.
    pub fn display_name(&self, position: usize) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("Subject {}", position + 1)
        } else {
            trimmed.to_string()
        }
    }

    /// Two-decimal score text, or the unscored literal "-".
    ///
    /// Every renderer goes through this so a TXT export and the
    /// corresponding DOC or XLSX export can never disagree on the value.
    pub fn formatted_score(&self) -> String {
        match self.score_percent {
            Some(score) => format!("{score:.2}"),
            None => FIELD_PLACEHOLDER.to_string(),
        }
    }

    /// The "Need to improve" field: the literal "None" when the score is
    /// present and at least 100, the reasoning text otherwise.
    pub fn needs_improvement(&self) -> String {
        match self.score_percent {
            Some(score) if score >= 100.0 => "None".to_string(),
            _ => self.reasoning.clone(),
        }
    }

    /// Feedback column value for tabular exports: every detail's feedback,
    /// prefixed with its 1-based question label and joined with " | ", or
    /// "-" when no detail carries feedback.
    pub fn feedback_summary(&self) -> String {
        let parts: Vec<String> = self
            .details
            .iter()
            .enumerate()
            .filter_map(|(i, detail)| {
                detail
                    .feedback_text()
                    .map(|feedback| format!("Q{}: {}", i + 1, feedback))
            })
            .collect();

        if parts.is_empty() {
            FIELD_PLACEHOLDER.to_string()
        } else {
            parts.join(" | ")
        }
    }
}

/// One contiguous run of raw grading text attributed to a single subject,
/// before structured extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Filename captured from the section's `File:` header, when derivable.
    pub file_name: Option<String>,
    /// The section's text, candidate blocks rejoined with their blank-line
    /// separator.
    pub text:      String,
}

/// Deserializes `score_percent` leniently: accepts a JSON number, a numeric
/// string, or null/absent. Anything unparseable becomes `None` rather than
/// an error, so a sloppy grading backend cannot fail the whole reply.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_f64(),
        Some(serde_json::Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}
