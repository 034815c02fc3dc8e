//! Remote scoring-service client.

use std::time::Instant;

use async_trait::async_trait;
use tracing::instrument;

use bandcheck_core::error::ScoringError;
use bandcheck_core::traits::{EvaluateRequest, EvaluateResponse, ScoringService};

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const EVALUATE_PATH: &str = "/api/evaluate";

/// HTTP client for the essay scoring service.
///
/// POSTs `{essay, topic}` as JSON to `{base_url}/api/evaluate` and returns
/// the response body verbatim; the body is a text blob the response parser
/// consumes as-is.
pub struct RemoteScorer {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl RemoteScorer {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        }
    }
}

#[async_trait]
impl ScoringService for RemoteScorer {
    fn name(&self) -> &str {
        "remote"
    }

    #[instrument(skip(self, request), fields(essay_len = request.essay.len()))]
    async fn evaluate(&self, request: &EvaluateRequest) -> anyhow::Result<EvaluateResponse> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!("{}{}", self.base_url, EVALUATE_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScoringError::Timeout(self.timeout_secs)
                } else {
                    ScoringError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(ScoringError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 503 {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringError::ServiceUnavailable(body).into());
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(ScoringError::ApiError { status, message }.into());
        }

        let raw_text = response.text().await.map_err(|e| ScoringError::ApiError {
            status: 0,
            message: format!("failed to read response body: {e}"),
        })?;

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(latency_ms, body_len = raw_text.len(), "scoring response received");

        Ok(EvaluateResponse {
            raw_text,
            latency_ms,
        })
    }
}
