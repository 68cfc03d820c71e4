#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use chrono::{DateTime, Local};
use itertools::Itertools;

/// Stem used when sanitization strips a title down to nothing.
const EMPTY_STEM: &str = "output";

/// Timestamp layout embedded in export filenames: day-month-year and
/// hour-minute granularity.
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y_%H-%M";

/// Resolves the title every renderer shares: the caller-supplied last used
/// title wins over the current title, which wins over the literal
/// fallback. A blank or whitespace-only value at any level falls through
/// to the next.
pub fn resolve_title<'a>(last_used: &'a str, current: &'a str, fallback: &'a str) -> &'a str {
    for candidate in [last_used, current, fallback] {
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            return trimmed;
        }
    }
    fallback
}

/// Sanitizes a title or subject for use in a filename: characters other
/// than alphanumerics, dashes, underscores, and whitespace are stripped,
/// then whitespace runs collapse to single underscores.
///
/// `"Mid-Term: Essay #1!"` becomes `"Mid-Term_Essay_1"`.
pub fn sanitize_fragment(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_') || c.is_whitespace())
        .collect();
    kept.split_whitespace().join("_")
}

/// Sanitizes a fragment, substituting the empty-stem literal when nothing
/// survives.
fn sanitize_or_default(raw: &str) -> String {
    let fragment = sanitize_fragment(raw);
    if fragment.is_empty() {
        EMPTY_STEM.to_string()
    } else {
        fragment
    }
}

/// Assembles a timestamped export filename:
/// `<title>[_<subject>]_<DD-MM-YYYY>_<HH-MM>.<extension>`.
///
/// The instant is a parameter so callers own the clock and naming stays a
/// pure function.
pub fn timestamped_file_name(
    title: &str,
    subject: Option<&str>,
    extension: &str,
    at: DateTime<Local>,
) -> String {
    let mut stem = sanitize_or_default(title);
    if let Some(subject) = subject {
        stem.push('_');
        stem.push_str(&sanitize_or_default(subject));
    }
    format!("{stem}_{}.{extension}", at.format(TIMESTAMP_FORMAT))
}

/// Assembles the untimestamped `<title>.<extension>` filename used by
/// single-document exports.
pub fn plain_file_name(title: &str, extension: &str) -> String {
    format!("{}.{extension}", sanitize_or_default(title))
}
