//! Evaluation response parser.
//!
//! Converts the raw text of a scoring-service response into a structured
//! [`EvaluationResult`]. The service emits one free-text section per
//! criterion, terminated by a `<final>N.N<final>` sentinel; this parser
//! splits on those sentinels, recognizes each section by its header phrase,
//! and pulls out the band score plus the surrounding feedback.
//!
//! Parsing is a pure function of the input text and never fails: malformed
//! input degrades to an `"N/A"` score or a partial (possibly empty) result.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Criterion, CriterionResult, EvaluationResult, SCORE_NOT_AVAILABLE};

/// Sentinel separating scored sections: `<final>` around a decimal number.
/// Used strictly as a chunk delimiter; the bracketed number is discarded.
static DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<final>\d+\.\d+<final>").expect("delimiter pattern is valid"));

/// First unsigned integer or decimal token inside a chunk.
static SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(\.\d+)?").expect("score pattern is valid"));

/// Parse one evaluator response into per-criterion scores and feedback.
///
/// Criteria whose marker phrase never appears are absent from the result.
/// If the same marker appears in more than one chunk, the last chunk wins.
pub fn parse_evaluation(text: &str) -> EvaluationResult {
    let mut result = EvaluationResult::default();

    for chunk in DELIMITER.split(text) {
        let Some(criterion) = match_criterion(chunk) else {
            continue;
        };
        let extracted = extract_score_and_feedback(chunk);
        tracing::debug!(%criterion, score = %extracted.score, "matched response section");
        result.set(criterion, extracted);
    }

    result
}

/// First criterion (in priority order) whose marker phrase occurs in `chunk`.
fn match_criterion(chunk: &str) -> Option<Criterion> {
    Criterion::ALL
        .iter()
        .copied()
        .find(|c| chunk.contains(c.marker()))
}

/// Pull the first numeric token out of a chunk as the score, and return the
/// rest as feedback.
///
/// Only the first numeric substring is removed; any later digits stay in the
/// feedback text verbatim. A chunk with no numeric token scores `"N/A"` and
/// keeps its full text (whitespace-trimmed) as feedback.
fn extract_score_and_feedback(chunk: &str) -> CriterionResult {
    match SCORE.find(chunk) {
        Some(m) => {
            tracing::trace!(token = m.as_str(), start = m.start(), "score token");
            let mut feedback = String::with_capacity(chunk.len() - m.len());
            feedback.push_str(&chunk[..m.start()]);
            feedback.push_str(&chunk[m.end()..]);
            CriterionResult {
                score: m.as_str().to_string(),
                feedback: feedback.trim().to_string(),
            }
        }
        None => CriterionResult {
            score: SCORE_NOT_AVAILABLE.to_string(),
            feedback: chunk.trim().to_string(),
        },
    }
}
