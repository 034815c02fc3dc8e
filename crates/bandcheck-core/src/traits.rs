//! Core trait definition for scoring-service backends.
//!
//! The async trait is implemented by the `bandcheck-client` crate for the
//! remote HTTP service and for the in-process mock used in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::EssaySubmission;

/// Trait for backends that score an essay against a topic.
///
/// The backend returns the raw response text only; interpreting that text is
/// the parser's job, and transport failures are the caller's responsibility
/// to surface. The parser is never invoked on a failed response.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Human-readable backend name (e.g. "remote").
    fn name(&self) -> &str;

    /// Submit an essay and topic for scoring.
    async fn evaluate(&self, request: &EvaluateRequest) -> anyhow::Result<EvaluateResponse>;
}

/// Request payload sent to the scoring service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// The essay text.
    pub essay: String,
    /// The writing prompt.
    pub topic: String,
}

impl From<&EssaySubmission> for EvaluateRequest {
    fn from(submission: &EssaySubmission) -> Self {
        Self {
            essay: submission.essay.clone(),
            topic: submission.topic.clone(),
        }
    }
}

/// Raw response from a scoring request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    /// The response body, verbatim. Fed to the parser as-is.
    pub raw_text: String,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_submission() {
        let submission = EssaySubmission::new("Technology and society", "Many people think...");
        let request = EvaluateRequest::from(&submission);
        assert_eq!(request.topic, "Technology and society");
        assert_eq!(request.essay, "Many people think...");
    }

    #[test]
    fn request_wire_shape() {
        let request = EvaluateRequest {
            essay: "body".into(),
            topic: "prompt".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["essay"], "body");
        assert_eq!(json["topic"], "prompt");
    }
}
