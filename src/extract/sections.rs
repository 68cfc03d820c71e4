#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::model::Section;

/// Matches a `File: <name>` marker at the start of a line.
static FILE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*File:[ \t]*(.+?)[ \t]*$").unwrap());

/// Matches a `Total Slides:` marker at the start of a line.
static SLIDES_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*Total Slides:").unwrap());

/// Splits a blob into candidate blocks on runs of two or more line breaks.
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap());

/// Marker opening the content-evaluation half of a combined report.
pub const CONTENT_MARKER: &str = "CONTENT EVALUATION";
/// Marker opening the visual-design half of a combined report.
pub const DESIGN_MARKER: &str = "VISUAL DESIGN EVALUATION";

/// Separator the producer used between candidate blocks; sections are
/// reassembled with it so their internal structure survives for later
/// evaluation-type splitting in the renderers.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Verdict for one candidate block.
///
/// The header-detection heuristic is fragile against producer drift, so all
/// of its conditions live in this one classifier; ambiguous blocks are
/// conservatively treated as continuations rather than spurious new
/// sections.
#[derive(Debug, PartialEq, Eq)]
enum BlockVerdict {
    /// The block opens a new per-file section; carries the captured name.
    NewHeader(String),
    /// The block continues whatever section is accumulating.
    Continuation,
}

/// Classifies one candidate block as a new-file header or a continuation.
///
/// A block is a header only when ALL of the following hold:
/// * it contains a `File: <name>` line,
/// * a `Total Slides:` line follows that marker,
/// * both markers occur strictly before any evaluation marker in the block
///   (or the block contains no evaluation marker at all).
///
/// A quoted `File:` reference without `Total Slides:` is never a header.
fn classify_block(block: &str) -> BlockVerdict {
    let Some(captures) = FILE_MARKER.captures(block) else {
        return BlockVerdict::Continuation;
    };
    let file_at = captures.get(0).map_or(0, |m| m.start());

    let slides_at = match SLIDES_MARKER.find(block) {
        Some(found) if found.start() > file_at => found.start(),
        _ => return BlockVerdict::Continuation,
    };

    let first_eval = [CONTENT_MARKER, DESIGN_MARKER]
        .into_iter()
        .filter_map(|marker| block.find(marker))
        .min();
    if first_eval.is_some_and(|eval_at| eval_at < slides_at) {
        return BlockVerdict::Continuation;
    }

    BlockVerdict::NewHeader(captures[1].trim().to_string())
}

/// A section being accumulated while scanning candidate blocks.
struct Accumulating<'a> {
    /// Filename captured from the header that opened this section.
    file_name: Option<String>,
    /// Candidate blocks collected so far, in order.
    blocks:    Vec<&'a str>,
}

impl Accumulating<'_> {
    /// Reassembles the collected blocks into a finished [`Section`].
    fn finish(self) -> Section {
        Section {
            file_name: self.file_name,
            text:      self.blocks.join(BLOCK_SEPARATOR),
        }
    }
}

/// Segments one raw grading blob into ordered per-file [`Section`]s.
///
/// Empty input yields an empty sequence. Non-empty input always yields at
/// least one section: when no file header is ever recognized the entire
/// blob becomes the sole section, so no producer output is silently lost.
/// A repeated header for the filename already accumulating is treated as a
/// continuation, which prevents accidental double-starts.
pub fn split_sections(raw: &str) -> Vec<Section> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Accumulating> = None;
    let mut saw_header = false;

    for block in BLANK_RUN.split(raw) {
        if block.trim().is_empty() {
            continue;
        }

        match classify_block(block) {
            BlockVerdict::NewHeader(file_name) => {
                let continues_current = current
                    .as_ref()
                    .is_some_and(|acc| acc.file_name.as_deref() == Some(file_name.as_str()));
                if continues_current {
                    if let Some(acc) = current.as_mut() {
                        acc.blocks.push(block);
                    }
                } else {
                    if let Some(done) = current.take() {
                        sections.push(done.finish());
                    }
                    saw_header = true;
                    current = Some(Accumulating {
                        file_name: Some(file_name),
                        blocks:    vec![block],
                    });
                }
            }
            BlockVerdict::Continuation => {
                let orphan_context = current.as_ref().is_none_or(|acc| acc.file_name.is_none());
                if orphan_context
                    && (block.contains(CONTENT_MARKER) || block.contains(DESIGN_MARKER))
                {
                    warn!(
                        first_line = block.lines().next().unwrap_or_default(),
                        "evaluation marker with no preceding file header; continuing the \
                         implicit leading section"
                    );
                }
                match current.as_mut() {
                    Some(acc) => acc.blocks.push(block),
                    None => {
                        current = Some(Accumulating {
                            file_name: None,
                            blocks:    vec![block],
                        });
                    }
                }
            }
        }
    }

    if !saw_header {
        // Heuristics found no boundary; the whole input is one section.
        return vec![Section {
            file_name: None,
            text:      raw.to_string(),
        }];
    }

    if let Some(done) = current.take() {
        sections.push(done.finish());
    }

    sections
}

/// Returns the name captured by the first `File:` marker in `text`, trimmed.
pub(crate) fn first_file_name(text: &str) -> Option<String> {
    FILE_MARKER
        .captures(text)
        .map(|captures| captures[1].trim().to_string())
}
