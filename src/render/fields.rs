#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::model::{QuestionDetail, ScoreRecord};

/// Heading emitted above the per-question block, in every renderer.
pub const DETAIL_HEADER: &str = "Per-question evaluation";

/// The header block for one record as ordered `(label, value)` pairs.
///
/// Field order is stable across every export form: `Student name`, `Score`,
/// `Reason`, `Need to improve`.
pub fn header_fields(record: &ScoreRecord, position: usize) -> Vec<(&'static str, String)> {
    vec![
        ("Student name", record.display_name(position)),
        ("Score", record.formatted_score()),
        ("Reason", record.reasoning.clone()),
        ("Need to improve", record.needs_improvement()),
    ]
}

/// One detail's record as ordered `(label, value)` pairs: the 1-based
/// question label, student answer, correct answer, evaluation result, and a
/// trailing feedback pair only when feedback is non-empty.
pub fn detail_fields(detail: &QuestionDetail, index: usize) -> Vec<(String, String)> {
    let mut fields = vec![
        (format!("Q{}", index + 1), detail.question.clone()),
        ("Student answer".to_string(), detail.student_answer.clone()),
        ("Correct answer".to_string(), detail.correct_answer.clone()),
        ("Result".to_string(), detail.result_label().to_string()),
    ];
    if let Some(feedback) = detail.feedback_text() {
        fields.push(("Feedback".to_string(), feedback.to_string()));
    }
    fields
}
