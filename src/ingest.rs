#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Ingestion of the grading backend's structured reply.
//!
//! When the backend already returns structured score data, the heuristic
//! text pipeline in [`crate::extract`] is bypassed entirely. The reply is
//! not always clean JSON: some models wrap it in prose, so parsing is
//! tolerant, and the set of returned records does not always line up with
//! the uploaded files, so names are reconciled positionally as a last
//! resort.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::model::ScoreRecord;

/// Matches the outermost `{ ... }` span in a prose-wrapped reply.
static JSON_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

/// Reasoning attached to a placeholder record for a file the backend
/// returned no result for.
pub const MISSING_RESULT_REASONING: &str =
    "No result returned by the grading backend for this file (possibly truncated or a model \
     error).";

/// The grading backend's structured reply: an overall summary plus one
/// score entry per graded subject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradingResponse {
    /// Overall summary across all graded subjects, when the backend
    /// produced one.
    #[serde(default)]
    pub summary: Option<String>,
    /// One entry per graded subject, in upload order.
    #[serde(default)]
    pub scores:  Vec<ScoreRecord>,
}

/// Parses a backend reply into a [`GradingResponse`].
///
/// The whole string is tried as JSON first; on failure the first `{ ... }`
/// span is tried, which recovers replies wrapped in prose or markdown
/// fences. Returns `None` when neither parses, in which case the caller
/// falls back to the raw-text pipeline.
pub fn parse_response(raw: &str) -> Option<GradingResponse> {
    if let Ok(response) = serde_json::from_str::<GradingResponse>(raw) {
        return Some(response);
    }

    let span = JSON_SPAN.find(raw)?;
    match serde_json::from_str::<GradingResponse>(span.as_str()) {
        Ok(response) => {
            debug!("recovered structured reply from a prose-wrapped payload");
            Some(response)
        }
        Err(error) => {
            debug!(%error, "reply is not a structured grading response");
            None
        }
    }
}

/// Aligns backend score entries with the uploaded-file basenames, producing
/// exactly one record per expected name in original order.
///
/// Each expected name claims a result at most once: by exact name match
/// first, then case-insensitively, then by position. Names left without a
/// result receive an unscored placeholder record so no uploaded file
/// silently disappears from the report. An empty `expected` list returns
/// the scores untouched (no reconciliation context).
pub fn reconcile_names(scores: Vec<ScoreRecord>, expected: &[String]) -> Vec<ScoreRecord> {
    if expected.is_empty() {
        return scores;
    }

    let mut used = vec![false; scores.len()];
    let mut reconciled = Vec::with_capacity(expected.len());

    for (position, base) in expected.iter().enumerate() {
        let exact = scores
            .iter()
            .enumerate()
            .position(|(i, record)| !used[i] && record.name == *base);
        let matched = exact
            .or_else(|| {
                scores.iter().enumerate().position(|(i, record)| {
                    !used[i] && record.name.eq_ignore_ascii_case(base)
                })
            })
            .or_else(|| (position < scores.len() && !used[position]).then_some(position));

        match matched {
            Some(index) => {
                used[index] = true;
                let mut record = scores[index].clone();
                if !base.trim().is_empty() {
                    record.name = base.clone();
                }
                reconciled.push(record);
            }
            None => {
                info!(file = base.as_str(), "no backend result; emitting placeholder record");
                reconciled.push(ScoreRecord {
                    name:          base.clone(),
                    score_percent: None,
                    reasoning:     MISSING_RESULT_REASONING.to_string(),
                    details:       Vec::new(),
                });
            }
        }
    }

    reconciled
}
