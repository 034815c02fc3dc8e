//! Mock scoring service for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use bandcheck_core::traits::{EvaluateRequest, EvaluateResponse, ScoringService};

/// A mock scoring service for exercising the engine without a running
/// evaluation endpoint.
///
/// Returns configurable responses based on essay content matching.
pub struct MockScorer {
    /// Map of essay substring → response text.
    responses: HashMap<String, String>,
    /// Default response if no essay matches.
    default_response: String,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<EvaluateRequest>>,
}

impl MockScorer {
    /// Create a new mock with the given essay→response mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: "Task Response 6.0 adequate<final>6.0<final>".to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same response text.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            responses: HashMap::new(),
            default_response: response.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this service.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this service.
    pub fn last_request(&self) -> Option<EvaluateRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringService for MockScorer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn evaluate(&self, request: &EvaluateRequest) -> anyhow::Result<EvaluateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let raw_text = self
            .responses
            .iter()
            .find(|(key, _)| request.essay.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone());

        Ok(EvaluateResponse {
            raw_text,
            latency_ms: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request(essay: &str) -> EvaluateRequest {
        EvaluateRequest {
            essay: essay.into(),
            topic: "any topic".into(),
        }
    }

    #[tokio::test]
    async fn fixed_response() {
        let scorer =
            MockScorer::with_fixed_response("Lexical Resource 8.0 strong<final>8.0<final>");

        let response = scorer.evaluate(&make_request("anything")).await.unwrap();
        assert!(response.raw_text.contains("Lexical Resource"));
        assert_eq!(scorer.call_count(), 1);
        assert_eq!(scorer.last_request().unwrap().essay, "anything");
    }

    #[tokio::test]
    async fn essay_matching() {
        let mut responses = HashMap::new();
        responses.insert(
            "technology".to_string(),
            "Task Response 7.0 on topic<final>7.0<final>".to_string(),
        );
        responses.insert(
            "education".to_string(),
            "Task Response 5.5 partial<final>5.5<final>".to_string(),
        );

        let scorer = MockScorer::new(responses);

        let resp = scorer
            .evaluate(&make_request("an essay about technology"))
            .await
            .unwrap();
        assert!(resp.raw_text.contains("7.0"));

        let resp = scorer
            .evaluate(&make_request("an essay about education"))
            .await
            .unwrap();
        assert!(resp.raw_text.contains("5.5"));
        assert_eq!(scorer.call_count(), 2);
    }
}
