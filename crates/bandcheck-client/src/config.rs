//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use bandcheck_core::engine::EvaluatorConfig;

/// Top-level bandcheck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandcheckConfig {
    /// Base URL of the scoring service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Max retries on transient service errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Max concurrent submissions in a batch.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for evaluation reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_endpoint() -> String {
    "http://localhost:8080".to_string()
}
fn default_timeout() -> u64 {
    120
}
fn default_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}
fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./bandcheck-results")
}

impl Default for BandcheckConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
        }
    }
}

impl BandcheckConfig {
    /// Engine-facing view of the retry/concurrency settings.
    pub fn evaluator_config(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            parallelism: self.parallelism,
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `bandcheck.toml` in the current directory
/// 2. `~/.config/bandcheck/config.toml`
///
/// Environment variable override: `BANDCHECK_ENDPOINT`.
pub fn load_config() -> Result<BandcheckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<BandcheckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("bandcheck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<BandcheckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => BandcheckConfig::default(),
    };

    if let Ok(endpoint) = std::env::var("BANDCHECK_ENDPOINT") {
        config.endpoint = endpoint;
    }
    config.endpoint = resolve_env_vars(&config.endpoint);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bandcheck"))
}
