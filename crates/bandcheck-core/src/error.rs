//! Scoring-service error types.
//!
//! These errors represent failures of the network call to the scoring
//! service. Defined in `bandcheck-core` so the evaluation engine can
//! downcast and classify errors for retry decisions without string
//! matching. The response parser itself has no error type: malformed
//! response text degrades to a partial result, never an error.

use thiserror::Error;

/// Errors that can occur when submitting an essay to the scoring service.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The service returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// The service is temporarily unavailable (HTTP 503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ScoringError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(self, ScoringError::ApiError { status, .. } if *status < 500)
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ScoringError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}
