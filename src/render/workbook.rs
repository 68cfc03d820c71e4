#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::cmp::Ordering;

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::model::ScoreRecord;

/// Absolute tolerance within which scores count as tied at an extreme.
pub const TIE_TOLERANCE: f64 = 0.01;

/// Literal shown for the average when no record carries a numeric score.
pub const NO_AVERAGE: &str = "N/A";

/// Column headers, fixed order.
const COLUMNS: [&str; 4] = ["Subject Name", "Score (%)", "Reasoning", "Feedback"];

/// Column widths in characters, matching [`COLUMNS`].
const COLUMN_WIDTHS: [f64; 4] = [40.0, 15.0, 60.0, 70.0];

/// Summary banner background.
const SUMMARY_BANNER_BG: Color = Color::RGB(0x1F4E78);
/// Average row background.
const AVERAGE_ROW_BG: Color = Color::RGB(0xD9E1F2);
/// Highest-performers banner background.
const HIGHEST_BANNER_BG: Color = Color::RGB(0x70AD47);
/// Highest-performers row background.
const HIGHEST_ROW_BG: Color = Color::RGB(0xE2EFDA);
/// Lowest-performers banner background.
const LOWEST_BANNER_BG: Color = Color::RGB(0xC55A11);
/// Lowest-performers row background.
const LOWEST_ROW_BG: Color = Color::RGB(0xFCE4D6);
/// Complete-list banner background.
const LIST_BANNER_BG: Color = Color::RGB(0x4472C4);
/// Even zebra row background in the complete list.
const ZEBRA_EVEN_BG: Color = Color::RGB(0xFFFFFF);
/// Odd zebra row background in the complete list.
const ZEBRA_ODD_BG: Color = Color::RGB(0xF2F2F2);
/// Feedback data-cell background in the complete list.
const FEEDBACK_CELL_BG: Color = Color::RGB(0xE7E6F7);
/// Feedback header-cell background.
const FEEDBACK_HEADER_BG: Color = Color::RGB(0x7C6BC8);
/// Global header row background.
const HEADER_ROW_BG: Color = Color::RGB(0x366092);

/// The computed statistics block backing the workbook layout.
///
/// Exposed separately from the byte output so the statistics can be
/// asserted without unpacking a finished workbook.
#[derive(Debug, Clone)]
pub struct WorkbookSummary {
    /// Arithmetic mean of the scored records, `None` when none are scored.
    pub average: Option<f64>,
    /// All records within [`TIE_TOLERANCE`] of the maximum score.
    pub highest: Vec<ScoreRecord>,
    /// All records within [`TIE_TOLERANCE`] of the minimum score.
    pub lowest:  Vec<ScoreRecord>,
    /// Every record, scored ones first in descending score order, unscored
    /// ones after, input order preserved among equals.
    pub ranked:  Vec<ScoreRecord>,
}

/// Orders two records for the ranked listing: numeric score descending,
/// with unscored records after all scored ones.
fn rank_order(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    match (a.score_percent, b.score_percent) {
        (Some(left), Some(right)) => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Computes the statistics header for a record collection.
///
/// Unscored records are excluded from the average and from the tie groups
/// but still appear in the ranked listing, after every scored record.
pub fn summarize(records: &[ScoreRecord]) -> WorkbookSummary {
    let scored: Vec<f64> = records.iter().filter_map(|r| r.score_percent).collect();

    let average =
        (!scored.is_empty()).then(|| scored.iter().sum::<f64>() / scored.len() as f64);

    let tied_at = |extreme: f64| -> Vec<ScoreRecord> {
        records
            .iter()
            .filter(|r| {
                r.score_percent
                    .is_some_and(|score| (score - extreme).abs() <= TIE_TOLERANCE)
            })
            .cloned()
            .collect()
    };

    let maximum = scored.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let minimum = scored.iter().copied().fold(f64::INFINITY, f64::min);
    let highest = if scored.is_empty() { Vec::new() } else { tied_at(maximum) };
    let lowest = if scored.is_empty() { Vec::new() } else { tied_at(minimum) };

    let mut ranked = records.to_vec();
    ranked.sort_by(rank_order);

    WorkbookSummary {
        average,
        highest,
        lowest,
        ranked,
    }
}

/// Bold white-on-color banner format, centered.
fn banner_format(background: Color) -> Format {
    Format::new()
        .set_bold()
        .set_background_color(background)
        .set_font_color(Color::White)
        .set_align(FormatAlign::Center)
}

/// Wrapped text cell on a colored background.
fn cell_format(background: Color) -> Format {
    Format::new().set_background_color(background).set_text_wrap()
}

/// Two-decimal numeric cell on a colored background.
fn score_format(background: Color) -> Format {
    Format::new()
        .set_background_color(background)
        .set_num_format("0.00")
        .set_align(FormatAlign::Center)
}

/// Builds the styled single-sheet workbook for a record collection and
/// returns the finished `.xlsx` bytes.
///
/// Layout, colors, and column widths follow the documented export
/// contract: summary banner, average row, tie-aware highest and lowest
/// groups, then the complete ranked listing under a global header row.
pub fn build_workbook(records: &[ScoreRecord], title: &str) -> Result<Vec<u8>, XlsxError> {
    let summary = summarize(records);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Evaluation Results")?;

    for (column, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(column as u16, *width)?;
    }

    let mut row: u32 = 0;

    // Summary banner and average row.
    worksheet.merge_range(row, 0, row, 3, title, &banner_format(SUMMARY_BANNER_BG))?;
    row += 1;
    let average_cell = cell_format(AVERAGE_ROW_BG);
    worksheet.write_string_with_format(row, 0, "Average Score", &average_cell)?;
    match summary.average {
        Some(average) => {
            worksheet.write_number_with_format(row, 1, average, &score_format(AVERAGE_ROW_BG))?;
        }
        None => {
            worksheet.write_string_with_format(row, 1, NO_AVERAGE, &average_cell)?;
        }
    }
    worksheet.write_blank(row, 2, &average_cell)?;
    worksheet.write_blank(row, 3, &average_cell)?;
    row += 2;

    // Highest performers.
    worksheet.merge_range(
        row,
        0,
        row,
        3,
        "Highest Performer(s)",
        &banner_format(HIGHEST_BANNER_BG),
    )?;
    row += 1;
    for (position, record) in summary.highest.iter().enumerate() {
        write_record_row(worksheet, row, record, position, HIGHEST_ROW_BG, HIGHEST_ROW_BG)?;
        row += 1;
    }
    row += 1;

    // Lowest performers.
    worksheet.merge_range(
        row,
        0,
        row,
        3,
        "Lowest Performer(s)",
        &banner_format(LOWEST_BANNER_BG),
    )?;
    row += 1;
    for (position, record) in summary.lowest.iter().enumerate() {
        write_record_row(worksheet, row, record, position, LOWEST_ROW_BG, LOWEST_ROW_BG)?;
        row += 1;
    }
    row += 1;

    // Complete ranked listing under the global header row.
    worksheet.merge_range(row, 0, row, 3, "Complete List", &banner_format(LIST_BANNER_BG))?;
    row += 1;
    let header = banner_format(HEADER_ROW_BG);
    let feedback_header = banner_format(FEEDBACK_HEADER_BG);
    for (column, label) in COLUMNS.iter().enumerate() {
        let format = if column == 3 { &feedback_header } else { &header };
        worksheet.write_string_with_format(row, column as u16, *label, format)?;
    }
    row += 1;
    for (position, record) in summary.ranked.iter().enumerate() {
        let zebra = if position % 2 == 0 { ZEBRA_EVEN_BG } else { ZEBRA_ODD_BG };
        write_record_row(worksheet, row, record, position, zebra, FEEDBACK_CELL_BG)?;
        row += 1;
    }

    workbook.save_to_buffer()
}

/// Writes one four-column record row.
///
/// * `background`: fill for the name, score, and reasoning cells.
/// * `feedback_background`: fill for the feedback cell, which the complete
///   list highlights independently of the zebra banding.
fn write_record_row(
    worksheet: &mut Worksheet,
    row: u32,
    record: &ScoreRecord,
    position: usize,
    background: Color,
    feedback_background: Color,
) -> Result<(), XlsxError> {
    let text = cell_format(background);
    let feedback = cell_format(feedback_background);

    worksheet.write_string_with_format(row, 0, record.display_name(position), &text)?;
    match record.score_percent {
        Some(score) => {
            worksheet.write_number_with_format(row, 1, score, &score_format(background))?;
        }
        None => {
            worksheet.write_string_with_format(row, 1, record.formatted_score(), &text)?;
        }
    }
    worksheet.write_string_with_format(row, 2, record.reasoning.as_str(), &text)?;
    worksheet.write_string_with_format(row, 3, record.feedback_summary(), &feedback)?;
    Ok(())
}
