//! Core data model types for bandcheck.
//!
//! These are the fundamental types the entire bandcheck system uses to
//! represent essay submissions and per-criterion evaluation results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four fixed IELTS writing evaluation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    CoherenceAndCohesion,
    GrammaticalRangeAndAccuracy,
    LexicalResource,
    TaskResponse,
}

impl Criterion {
    /// All criteria in matching priority order.
    ///
    /// When a response chunk contains more than one marker phrase, the first
    /// criterion in this order claims the chunk and the rest are ignored.
    pub const ALL: [Criterion; 4] = [
        Criterion::CoherenceAndCohesion,
        Criterion::GrammaticalRangeAndAccuracy,
        Criterion::LexicalResource,
        Criterion::TaskResponse,
    ];

    /// The literal, case-sensitive section header the scoring service emits.
    pub fn marker(&self) -> &'static str {
        match self {
            Criterion::CoherenceAndCohesion => "Coherence and Cohesion",
            Criterion::GrammaticalRangeAndAccuracy => "Grammatical Range and Accuracy",
            Criterion::LexicalResource => "Lexical Resource",
            Criterion::TaskResponse => "Task Response",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::CoherenceAndCohesion => write!(f, "coherence-and-cohesion"),
            Criterion::GrammaticalRangeAndAccuracy => write!(f, "grammatical-range-and-accuracy"),
            Criterion::LexicalResource => write!(f, "lexical-resource"),
            Criterion::TaskResponse => write!(f, "task-response"),
        }
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "coherence-and-cohesion" | "coherence" => Ok(Criterion::CoherenceAndCohesion),
            "grammatical-range-and-accuracy" | "grammar" => {
                Ok(Criterion::GrammaticalRangeAndAccuracy)
            }
            "lexical-resource" | "lexical" => Ok(Criterion::LexicalResource),
            "task-response" | "task" => Ok(Criterion::TaskResponse),
            other => Err(format!("unknown criterion: {other}")),
        }
    }
}

/// Score and feedback extracted for a single criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionResult {
    /// Band score as numeric text, or `"N/A"` when no numeric token was found.
    pub score: String,
    /// Free-text feedback with the score token removed.
    pub feedback: String,
}

/// Sentinel score used when a chunk carries no numeric token.
pub const SCORE_NOT_AVAILABLE: &str = "N/A";

/// Per-criterion evaluation results parsed from one scoring response.
///
/// Criteria whose marker phrase never appeared in the response are simply
/// absent; callers must treat a missing entry as "no feedback available",
/// not as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence_and_cohesion: Option<CriterionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammatical_range_and_accuracy: Option<CriterionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexical_resource: Option<CriterionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_response: Option<CriterionResult>,
}

impl EvaluationResult {
    /// Result for a single criterion, if its marker phrase was found.
    pub fn get(&self, criterion: Criterion) -> Option<&CriterionResult> {
        match criterion {
            Criterion::CoherenceAndCohesion => self.coherence_and_cohesion.as_ref(),
            Criterion::GrammaticalRangeAndAccuracy => self.grammatical_range_and_accuracy.as_ref(),
            Criterion::LexicalResource => self.lexical_resource.as_ref(),
            Criterion::TaskResponse => self.task_response.as_ref(),
        }
    }

    /// Assign a criterion's result, overwriting any earlier assignment.
    pub fn set(&mut self, criterion: Criterion, result: CriterionResult) {
        let slot = match criterion {
            Criterion::CoherenceAndCohesion => &mut self.coherence_and_cohesion,
            Criterion::GrammaticalRangeAndAccuracy => &mut self.grammatical_range_and_accuracy,
            Criterion::LexicalResource => &mut self.lexical_resource,
            Criterion::TaskResponse => &mut self.task_response,
        };
        *slot = Some(result);
    }

    /// Present entries in priority order.
    pub fn entries(&self) -> impl Iterator<Item = (Criterion, &CriterionResult)> {
        Criterion::ALL
            .iter()
            .filter_map(|&c| self.get(c).map(|r| (c, r)))
    }

    /// Number of criteria with a result.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// True when no criterion was found in the response.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An essay and its topic, bundled as one request to the scoring service.
///
/// Constructed explicitly before the scoring call; there is no ambient
/// shared state between the input-collection and submission stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssaySubmission {
    /// The writing prompt the essay responds to.
    pub topic: String,
    /// The essay text itself.
    pub essay: String,
}

impl EssaySubmission {
    pub fn new(topic: impl Into<String>, essay: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            essay: essay.into(),
        }
    }
}
