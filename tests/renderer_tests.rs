use chrono::TimeZone;
use scorecard::{
    QuestionDetail, ScoreRecord, Section,
    render::{
        markup, naming,
        text::{self, render_record},
    },
};

/// A record with two question details, one carrying feedback.
fn detailed_record() -> ScoreRecord {
    ScoreRecord {
        name:          "alice.docx".to_string(),
        score_percent: Some(50.0),
        reasoning:     "one of two correct".to_string(),
        details:       vec![
            QuestionDetail {
                question:       "What is 2 + 2?".to_string(),
                student_answer: "4".to_string(),
                correct_answer: "4".to_string(),
                is_correct:     true,
                feedback:       Some("well done".to_string()),
            },
            QuestionDetail {
                question:       "Name a noble gas".to_string(),
                student_answer: "oxygen".to_string(),
                correct_answer: "argon".to_string(),
                is_correct:     false,
                feedback:       None,
            },
        ],
    }
}

/// Positions at which each of `values` occurs in `haystack`, in order.
///
/// Panics when a value is missing, which is the assertion failure we want.
fn ordered_positions(haystack: &str, values: &[&str]) -> Vec<usize> {
    let mut from = 0;
    values
        .iter()
        .map(|value| {
            let at = haystack[from..]
                .find(value)
                .unwrap_or_else(|| panic!("`{value}` missing or out of order"));
            from += at + value.len();
            from
        })
        .collect()
}

#[test]
fn header_fields_render_in_stable_order() {
    let rendered = render_record(&detailed_record(), 0);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "Student name: alice.docx");
    assert_eq!(lines[1], "Score: 50.00");
    assert_eq!(lines[2], "Reason: one of two correct");
    assert_eq!(lines[3], "Need to improve: one of two correct");
}

#[test]
fn need_to_improve_is_none_only_at_full_marks() {
    let mut record = detailed_record();
    record.score_percent = Some(100.0);
    assert!(render_record(&record, 0).contains("Need to improve: None"));

    record.score_percent = Some(99.99);
    assert!(!render_record(&record, 0).contains("Need to improve: None"));

    record.score_percent = None;
    assert!(!render_record(&record, 0).contains("Need to improve: None"));
}

#[test]
fn unscored_record_renders_dash_score() {
    let mut record = detailed_record();
    record.score_percent = None;
    assert!(render_record(&record, 0).contains("Score: -"));
}

#[test]
fn empty_name_uses_positional_placeholder() {
    let mut record = detailed_record();
    record.name = "  ".to_string();
    assert!(render_record(&record, 2).contains("Student name: Subject 3"));
}

#[test]
fn detail_block_renders_each_question_with_result() {
    let rendered = render_record(&detailed_record(), 0);

    assert!(rendered.contains("Per-question evaluation"));
    ordered_positions(&rendered, &[
        "Q1: What is 2 + 2?",
        "Student answer: 4",
        "Correct answer: 4",
        "Result: Correct",
        "Feedback: well done",
        "Q2: Name a noble gas",
        "Student answer: oxygen",
        "Correct answer: argon",
        "Result: Incorrect",
    ]);
    // No feedback line for Q2.
    let q2_block = rendered.split("Q2:").nth(1).expect("Q2 present");
    assert!(!q2_block.contains("Feedback:"));
}

#[test]
fn detail_block_is_omitted_without_details() {
    let mut record = detailed_record();
    record.details.clear();
    assert!(!render_record(&record, 0).contains("Per-question evaluation"));
}

#[test]
fn text_and_markup_agree_on_values_and_order() {
    let record = detailed_record();
    let values = [
        "alice.docx",
        "50.00",
        "one of two correct",
        "What is 2 + 2?",
        "Correct",
        "well done",
        "Name a noble gas",
        "argon",
        "Incorrect",
    ];

    ordered_positions(&render_record(&record, 0), &values);
    ordered_positions(&markup::render_record(&record, 0), &values);

    // The agreement holds for a record with no details at all.
    let mut bare = record.clone();
    bare.details.clear();
    let bare_values = ["alice.docx", "50.00", "one of two correct"];
    ordered_positions(&render_record(&bare, 0), &bare_values);
    ordered_positions(&markup::render_record(&bare, 0), &bare_values);
}

#[test]
fn markup_escapes_user_supplied_text() {
    let mut record = detailed_record();
    record.name = "a<b>&c".to_string();
    record.reasoning = "1 < 2 && 3 > 2".to_string();

    let rendered = markup::render_record(&record, 0);
    assert!(rendered.contains("a&lt;b&gt;&amp;c"));
    assert!(rendered.contains("1 &lt; 2 &amp;&amp; 3 &gt; 2"));
    assert!(!rendered.contains("<b>"));
}

#[test]
fn raw_markup_converts_line_breaks() {
    let rendered = markup::render_raw("line one\nline two");
    assert!(rendered.contains("line one<br>\nline two"));
}

#[test]
fn empty_collection_falls_back_to_escaped_raw_text() {
    let rendered = markup::render_all(&[], "score < 60");
    assert!(rendered.contains("score &lt; 60"));

    let rendered = text::render_all(&[], "plain fallback");
    assert_eq!(rendered, "plain fallback\n");
}

#[test]
fn section_with_both_markers_splits_into_labeled_blocks() {
    let section = Section {
        file_name: Some("deck.pptx".to_string()),
        text:      "File: deck.pptx\nTotal Slides: 4\n\nCONTENT EVALUATION\ngood \
                    content\n\nVISUAL DESIGN EVALUATION\nbusy slides"
            .to_string(),
    };
    let rendered = markup::render_section(&section);

    ordered_positions(&rendered, &[
        "<h2>deck.pptx</h2>",
        "<h3>Content Evaluation</h3>",
        "good content",
        "<h3>Visual Design Evaluation</h3>",
        "busy slides",
    ]);
    // The design half is not duplicated into the content half.
    let content_half = rendered
        .split("<h3>Visual Design Evaluation</h3>")
        .next()
        .expect("content half");
    assert!(!content_half.contains("busy slides"));
}

#[test]
fn section_with_one_marker_renders_undivided() {
    let section = Section {
        file_name: None,
        text:      "CONTENT EVALUATION\njust content".to_string(),
    };
    let rendered = markup::render_section(&section);

    assert!(!rendered.contains("<h3>"));
    assert!(rendered.contains("just content"));
}

#[test]
fn title_resolution_falls_through_blank_levels() {
    assert_eq!(naming::resolve_title("Last", "Current", "Report"), "Last");
    assert_eq!(naming::resolve_title("  ", "Current", "Report"), "Current");
    assert_eq!(naming::resolve_title("", "  ", "Report"), "Report");
    assert_eq!(naming::resolve_title(" padded ", "", "Report"), "padded");
}

#[test]
fn sanitization_matches_documented_example() {
    assert_eq!(naming::sanitize_fragment("Mid-Term: Essay #1!"), "Mid-Term_Essay_1");
    assert_eq!(naming::sanitize_fragment("a   b\tc"), "a_b_c");
    assert_eq!(naming::sanitize_fragment("!!!"), "");
}

#[test]
fn filenames_embed_sanitized_title_and_timestamp() {
    let at = chrono::Local
        .with_ymd_and_hms(2026, 8, 6, 14, 5, 0)
        .single()
        .expect("valid local time");

    assert_eq!(
        naming::timestamped_file_name("Mid-Term: Essay #1!", None, "txt", at),
        "Mid-Term_Essay_1_06-08-2026_14-05.txt"
    );
    assert_eq!(
        naming::timestamped_file_name("Quiz", Some("alice.docx"), "txt", at),
        "Quiz_alicedocx_06-08-2026_14-05.txt"
    );
    assert_eq!(naming::plain_file_name("Quiz 1", "doc"), "Quiz_1.doc");
    assert_eq!(naming::plain_file_name("!!!", "doc"), "output.doc");
}
