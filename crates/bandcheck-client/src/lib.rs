//! bandcheck-client — Scoring-service integrations.
//!
//! Implements the `ScoringService` trait for the remote HTTP evaluation
//! endpoint, plus a mock backend for exercising the engine without a
//! running service.

pub mod config;
pub mod mock;
pub mod remote;

pub use config::{load_config, BandcheckConfig};
pub use mock::MockScorer;
pub use remote::RemoteScorer;
