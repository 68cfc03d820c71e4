use scorecard::{
    extract::scores::{FALLBACK_REASONING, UNKNOWN_SUBJECT, extract_record},
    extract_records, split_sections,
};

/// Runs the full raw-text pipeline and returns the derived records.
fn pipeline(raw: &str) -> Vec<scorecard::ScoreRecord> {
    extract_records(&split_sections(raw))
}

#[test]
fn spec_example_yields_mean_score_and_feedback() {
    let raw = "File: quiz1.pptx\nTotal Slides: 10\n\nCONTENT EVALUATION\nContent Quality Score: \
               80/100\nFeedback: Good structure\n\nVISUAL DESIGN EVALUATION\nStructure Score: \
               60/100";
    let records = pipeline(raw);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "quiz1.pptx");
    assert_eq!(records[0].score_percent, Some(70.0));
    assert_eq!(records[0].reasoning, "Good structure");
}

#[test]
fn single_marker_scores_as_itself() {
    let records = pipeline("File: a.pptx\nTotal Slides: 3\n\nAlignment Score: 45/100");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score_percent, Some(45.0));
    assert_eq!(records[0].reasoning, FALLBACK_REASONING);
}

#[test]
fn all_three_markers_average() {
    let raw = "File: a.pptx\nTotal Slides: 3\n\nContent Quality Score: 90/100\nStructure Score: \
               60/100\nAlignment Score: 30/100";
    let records = pipeline(raw);

    assert_eq!(records[0].score_percent, Some(60.0));
}

#[test]
fn missing_markers_leave_record_unscored_when_feedback_exists() {
    let records = pipeline("File: a.pptx\nTotal Slides: 3\n\nFeedback: needs sources");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score_percent, None);
    assert_eq!(records[0].reasoning, "needs sources");
}

#[test]
fn section_without_score_or_feedback_is_excluded() {
    let records = pipeline("File: a.pptx\nTotal Slides: 3\n\nNothing evaluative here.");

    assert!(records.is_empty());
}

#[test]
fn feedback_continuation_lines_are_captured() {
    let raw = "File: a.pptx\nTotal Slides: 3\n\nContent Quality Score: 70/100\nFeedback: solid \
               opening\nbut the middle drags\nStructure Score: 50/100";
    let records = pipeline(raw);

    assert_eq!(records[0].reasoning, "solid opening but the middle drags");
    assert_eq!(records[0].score_percent, Some(60.0));
}

#[test]
fn multiple_feedback_entries_join_with_semicolons() {
    let raw = "File: a.pptx\nTotal Slides: 3\n\nContent Quality Score: 70/100\nFeedback: good \
               flow\n\nStructure Score: 50/100\nFeedback: weak transitions";
    let records = pipeline(raw);

    assert_eq!(records[0].reasoning, "good flow; weak transitions");
}

#[test]
fn feedback_capture_ends_at_a_blank_line() {
    let raw = "File: a.pptx\nTotal Slides: 3\n\nContent Quality Score: 70/100\nFeedback: good \
               flow\n\nStrengths:\n  - concise\n  - well sourced";
    let records = pipeline(raw);

    assert_eq!(records[0].reasoning, "good flow");
}

#[test]
fn section_without_file_marker_is_named_unknown() {
    let section = scorecard::Section {
        file_name: None,
        text:      "Content Quality Score: 40/100".to_string(),
    };
    let record = extract_record(&section).expect("score evidence present");

    assert_eq!(record.name, UNKNOWN_SUBJECT);
    assert_eq!(record.score_percent, Some(40.0));
}

#[test]
fn filename_recovered_from_section_text_when_label_missing() {
    let section = scorecard::Section {
        file_name: None,
        text:      "File: late.pptx\nTotal Slides: 2\nContent Quality Score: 55/100".to_string(),
    };
    let record = extract_record(&section).expect("score evidence present");

    assert_eq!(record.name, "late.pptx");
}

#[test]
fn malformed_score_text_degrades_to_unscored() {
    // `Score:` lines that do not match the `<n>/100` shape contribute nothing.
    let records = pipeline(
        "File: a.pptx\nTotal Slides: 3\n\nContent Quality Score: great/100\nFeedback: fine",
    );

    assert_eq!(records[0].score_percent, None);
    assert_eq!(records[0].reasoning, "fine");
}
