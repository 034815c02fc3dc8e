//! Evaluation records with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::feedback::CleanFeedback;
use crate::grade::Grade;
use crate::model::EvaluationResult;

/// A complete evaluation of one essay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssayEvaluation {
    /// Unique evaluation identifier.
    pub id: Uuid,
    /// When the evaluation was performed.
    pub created_at: DateTime<Utc>,
    /// The writing prompt.
    pub topic: String,
    /// The essay that was submitted.
    pub essay: String,
    /// Parsed per-criterion scores and feedback.
    pub results: EvaluationResult,
    /// The scoring service's response text, verbatim.
    pub raw_response: String,
    /// Round-trip latency of the scoring request in milliseconds.
    pub latency_ms: u64,
}

impl EssayEvaluation {
    /// Mean of the numeric band scores present, or `None` when no criterion
    /// carries a parsable score.
    pub fn overall_band(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .results
            .entries()
            .filter_map(|(_, r)| r.score.parse::<f64>().ok())
            .collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }

    /// Save the evaluation as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize evaluation")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write evaluation to {}", path.display()))?;
        Ok(())
    }

    /// Load an evaluation from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read evaluation from {}", path.display()))?;
        let evaluation: EssayEvaluation =
            serde_json::from_str(&content).context("failed to parse evaluation JSON")?;
        Ok(evaluation)
    }

    /// Format the evaluation as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## Essay evaluation — {}\n\n", self.created_at.format("%Y-%m-%d %H:%M UTC")));
        md.push_str(&format!("**Topic:** {}\n\n", self.topic));
        match self.overall_band() {
            Some(band) => md.push_str(&format!("**Overall band:** {band:.1}\n\n")),
            None => md.push_str("**Overall band:** N/A\n\n"),
        }

        md.push_str("| Criterion | Band | Grade |\n");
        md.push_str("|-----------|------|-------|\n");
        for (criterion, result) in self.results.entries() {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                criterion.marker(),
                result.score,
                Grade::from_score(&result.score)
            ));
        }
        md.push('\n');

        for (criterion, result) in self.results.entries() {
            md.push_str(&format!("### {}\n\n", criterion.marker()));
            for line in CleanFeedback::new(&result.feedback).lines() {
                if line.is_empty() {
                    continue;
                }
                md.push_str(line);
                md.push('\n');
            }
            md.push('\n');
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Criterion, CriterionResult};

    fn make_evaluation() -> EssayEvaluation {
        let mut results = EvaluationResult::default();
        results.set(
            Criterion::CoherenceAndCohesion,
            CriterionResult {
                score: "7.5".into(),
                feedback: "Well structured throughout.".into(),
            },
        );
        results.set(
            Criterion::TaskResponse,
            CriterionResult {
                score: "6.5".into(),
                feedback: "Addresses most of the prompt.".into(),
            },
        );

        EssayEvaluation {
            id: Uuid::nil(),
            created_at: Utc::now(),
            topic: "Some people believe technology isolates us.".into(),
            essay: "In recent years...".into(),
            results,
            raw_response: String::new(),
            latency_ms: 1200,
        }
    }

    #[test]
    fn overall_band_is_mean_of_present_scores() {
        let evaluation = make_evaluation();
        assert!((evaluation.overall_band().unwrap() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overall_band_ignores_not_available_scores() {
        let mut evaluation = make_evaluation();
        evaluation.results.set(
            Criterion::LexicalResource,
            CriterionResult {
                score: "N/A".into(),
                feedback: String::new(),
            },
        );
        assert!((evaluation.overall_band().unwrap() - 7.0).abs() < f64::EPSILON);

        let empty = EssayEvaluation {
            results: EvaluationResult::default(),
            ..evaluation
        };
        assert_eq!(empty.overall_band(), None);
    }

    #[test]
    fn json_roundtrip() {
        let evaluation = make_evaluation();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluation.json");

        evaluation.save_json(&path).unwrap();
        let loaded = EssayEvaluation::load_json(&path).unwrap();

        assert_eq!(loaded.id, evaluation.id);
        assert_eq!(loaded.results, evaluation.results);
        assert_eq!(loaded.latency_ms, 1200);
    }

    #[test]
    fn markdown_output() {
        let md = make_evaluation().to_markdown();
        assert!(md.contains("Coherence and Cohesion"));
        assert!(md.contains("| 7.5 | B |"));
        assert!(md.contains("| 6.5 | C |"));
        assert!(md.contains("Addresses most of the prompt."));
    }
}
