//! Evaluation engine.
//!
//! Drives the submit → parse pipeline for one essay or a batch, with
//! bounded concurrency and retries on transient scoring-service errors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::error::ScoringError;
use crate::model::EssaySubmission;
use crate::parser::parse_evaluation;
use crate::report::EssayEvaluation;
use crate::traits::{EvaluateRequest, ScoringService};

/// Configuration for the evaluation engine.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Maximum concurrent submissions in a batch.
    pub parallelism: usize,
    /// Retries on transient service errors (not parse shortfalls).
    pub max_retries: u32,
    /// Initial delay between retries.
    pub retry_delay: Duration,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Progress reporting trait for batch evaluation.
pub trait ProgressReporter: Send + Sync {
    fn on_submit(&self, index: usize, topic: &str);
    fn on_complete(&self, index: usize, evaluation: &EssayEvaluation);
    fn on_error(&self, index: usize, error: &str);
    fn on_batch_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_submit(&self, _: usize, _: &str) {}
    fn on_complete(&self, _: usize, _: &EssayEvaluation) {}
    fn on_error(&self, _: usize, _: &str) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// The evaluation engine: one scoring backend plus retry/concurrency policy.
pub struct Evaluator {
    service: Arc<dyn ScoringService>,
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(service: Arc<dyn ScoringService>, config: EvaluatorConfig) -> Self {
        Self { service, config }
    }

    /// Submit one essay for scoring and parse the response.
    ///
    /// Transient service errors are retried with exponential backoff,
    /// honoring rate-limit retry-after hints; permanent errors surface
    /// immediately. The parser runs only on a successful response.
    pub async fn evaluate(&self, submission: &EssaySubmission) -> Result<EssayEvaluation> {
        let request = EvaluateRequest::from(submission);

        let mut last_error = None;
        let mut retry_delay = self.config.retry_delay;
        for retry in 0..=self.config.max_retries {
            if retry > 0 {
                tracing::debug!(retry, delay_ms = retry_delay.as_millis() as u64, "retrying");
                tokio::time::sleep(retry_delay).await;
                retry_delay = (retry_delay * 2).min(Duration::from_secs(60));
            }
            match self.service.evaluate(&request).await {
                Ok(response) => {
                    let results = parse_evaluation(&response.raw_text);
                    if results.is_empty() {
                        tracing::warn!("no criterion sections recognized in response");
                    }
                    return Ok(EssayEvaluation {
                        id: Uuid::new_v4(),
                        created_at: chrono::Utc::now(),
                        topic: submission.topic.clone(),
                        essay: submission.essay.clone(),
                        results,
                        raw_response: response.raw_text,
                        latency_ms: response.latency_ms,
                    });
                }
                Err(e) => {
                    if let Some(scoring_err) = e.downcast_ref::<ScoringError>() {
                        if scoring_err.is_permanent() {
                            return Err(e);
                        }
                        if let Some(ms) = scoring_err.retry_after_ms() {
                            retry_delay = Duration::from_millis(ms);
                        }
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown error")))
    }

    /// Evaluate a batch of submissions with bounded concurrency.
    ///
    /// Failures are isolated per submission; the returned vector holds an
    /// entry for every input, in input order.
    pub async fn evaluate_batch(
        &self,
        submissions: &[EssaySubmission],
        progress: &dyn ProgressReporter,
    ) -> Vec<Result<EssayEvaluation>> {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism));

        let mut futures = FuturesUnordered::new();
        for (index, submission) in submissions.iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            futures.push(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        progress.on_submit(index, &submission.topic);
                        self.evaluate(submission).await
                    }
                    Err(_) => Err(anyhow::anyhow!("semaphore closed")),
                };
                (index, result)
            });
        }

        let mut slots: Vec<Option<Result<EssayEvaluation>>> =
            (0..submissions.len()).map(|_| None).collect();
        let mut completed = 0usize;
        let mut failed = 0usize;

        while let Some((index, result)) = futures.next().await {
            match &result {
                Ok(evaluation) => {
                    progress.on_complete(index, evaluation);
                    completed += 1;
                }
                Err(e) => {
                    tracing::error!("evaluation {index} failed: {e:#}");
                    progress.on_error(index, &e.to_string());
                    failed += 1;
                }
            }
            slots[index] = Some(result);
        }

        progress.on_batch_complete(submissions.len(), completed, failed, start.elapsed());

        slots
            .into_iter()
            .map(|s| s.unwrap_or_else(|| Err(anyhow::anyhow!("submission was not processed"))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::EvaluateResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with a transient error `failures` times, then succeeds.
    struct FlakyService {
        failures: u32,
        calls: AtomicU32,
        response: String,
    }

    #[async_trait]
    impl ScoringService for FlakyService {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn evaluate(&self, _request: &EvaluateRequest) -> Result<EvaluateResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(ScoringError::NetworkError("connection reset".into()).into());
            }
            Ok(EvaluateResponse {
                raw_text: self.response.clone(),
                latency_ms: 1,
            })
        }
    }

    /// Always fails with a permanent error.
    struct RejectingService;

    #[async_trait]
    impl ScoringService for RejectingService {
        fn name(&self) -> &str {
            "rejecting"
        }

        async fn evaluate(&self, _request: &EvaluateRequest) -> Result<EvaluateResponse> {
            Err(ScoringError::ApiError {
                status: 400,
                message: "essay missing".into(),
            }
            .into())
        }
    }

    fn fast_config() -> EvaluatorConfig {
        EvaluatorConfig {
            parallelism: 2,
            max_retries: 3,
            retry_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn retries_transient_errors_then_succeeds() {
        let service = Arc::new(FlakyService {
            failures: 2,
            calls: AtomicU32::new(0),
            response: "Task Response 6.5 solid<final>6.5<final>".into(),
        });
        let evaluator = Evaluator::new(service.clone(), fast_config());

        let submission = EssaySubmission::new("topic", "essay");
        let evaluation = evaluator.evaluate(&submission).await.unwrap();

        assert_eq!(service.calls.load(Ordering::SeqCst), 3);
        assert_eq!(evaluation.results.len(), 1);
        assert_eq!(evaluation.topic, "topic");
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let service = Arc::new(FlakyService {
            failures: u32::MAX,
            calls: AtomicU32::new(0),
            response: String::new(),
        });
        let evaluator = Evaluator::new(service.clone(), fast_config());

        let err = evaluator
            .evaluate(&EssaySubmission::new("t", "e"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("network error"));
        // Initial attempt plus max_retries.
        assert_eq!(service.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let evaluator = Evaluator::new(Arc::new(RejectingService), fast_config());
        let err = evaluator
            .evaluate(&EssaySubmission::new("t", "e"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 400"));
    }

    #[tokio::test]
    async fn batch_preserves_input_order_and_isolates_failures() {
        let service = Arc::new(FlakyService {
            failures: 0,
            calls: AtomicU32::new(0),
            response: "Lexical Resource 7.0 varied<final>7.0<final>".into(),
        });
        let evaluator = Evaluator::new(service, fast_config());

        let submissions = vec![
            EssaySubmission::new("first", "a"),
            EssaySubmission::new("second", "b"),
            EssaySubmission::new("third", "c"),
        ];
        let results = evaluator.evaluate_batch(&submissions, &NoopReporter).await;

        assert_eq!(results.len(), 3);
        for (i, result) in results.iter().enumerate() {
            let evaluation = result.as_ref().unwrap();
            assert_eq!(evaluation.topic, submissions[i].topic);
        }
    }
}
