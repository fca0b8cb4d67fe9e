use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use agentflow_common::config::{OrchestrationConfig, RetryConfig};

use super::{AnalysisJob, EngineError, OrchestrationEngine};

/// Orchestration engine reached over HTTP, with retry logic.
///
/// POSTs the job payload as JSON and accepts either a JSON body or plain
/// text back.
pub struct HttpOrchestrationEngine {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    retry_config: RetryConfig,
}

impl HttpOrchestrationEngine {
    /// Create a client for the configured engine.
    /// Returns None when no engine URL is configured.
    pub fn new(config: &OrchestrationConfig, retry_config: RetryConfig) -> Option<Self> {
        let url = match config.url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => {
                tracing::warn!("No orchestration engine URL configured, real analyses disabled");
                return None;
            }
        };

        let api_key = config.api_key_env.as_deref().and_then(|env_var| {
            match std::env::var(env_var) {
                Ok(key) if !key.is_empty() => Some(key),
                _ => {
                    tracing::warn!(env_var, "Engine API key not set, calling without auth");
                    None
                }
            }
        });

        Some(Self {
            http: reqwest::Client::new(),
            url,
            api_key,
            retry_config,
        })
    }

    /// Execute a job with retries on transient errors.
    pub async fn run(&self, job: &AnalysisJob) -> Result<Value, EngineError> {
        let mut attempt = 0u32;
        let mut backoff_ms = self.retry_config.initial_backoff_ms;

        loop {
            attempt += 1;
            let result = self.send_once(job).await;

            match result {
                Ok(value) => return Ok(value),
                Err(ref e) if e.is_non_retryable() => {
                    metrics::counter!("engine.errors", "kind" => "non_retryable").increment(1);
                    return result;
                }
                Err(e) => {
                    if attempt >= self.retry_config.max_attempts {
                        metrics::counter!("engine.errors", "kind" => "exhausted").increment(1);
                        return Err(e);
                    }
                    let jitter = if self.retry_config.jitter {
                        compute_jitter(attempt, backoff_ms)
                    } else {
                        0
                    };
                    let wait = backoff_ms + jitter;
                    tracing::warn!(
                        attempt,
                        wait_ms = wait,
                        error = %e,
                        "Engine call failed, retrying"
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(wait)).await;
                    backoff_ms = (backoff_ms as f64 * self.retry_config.backoff_multiplier) as u64;
                    backoff_ms = backoff_ms.min(self.retry_config.max_backoff_ms);
                }
            }
        }
    }

    async fn send_once(&self, job: &AnalysisJob) -> Result<Value, EngineError> {
        metrics::counter!("engine.requests").increment(1);

        let mut request = self.http.post(&self.url).json(&job.to_payload());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EngineError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EngineError::Http(e.to_string()))?;

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(EngineError::Auth(format!("{}: {}", status, body)));
        }
        if status.is_server_error() || status.as_u16() == 429 {
            return Err(EngineError::Http(format!("{}: {}", status, body)));
        }
        if !status.is_success() {
            return Err(EngineError::Api(format!("{}: {}", status, body)));
        }

        Ok(parse_body(body))
    }
}

impl OrchestrationEngine for HttpOrchestrationEngine {
    fn execute<'a>(
        &'a self,
        job: &'a AnalysisJob,
    ) -> Pin<Box<dyn Future<Output = Result<Value, EngineError>> + Send + 'a>> {
        Box::pin(self.run(job))
    }

    fn name(&self) -> &str {
        "http_engine"
    }
}

/// JSON bodies are parsed; anything else is kept as a plain string.
fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

/// Compute jitter for retry backoff using simple hash-based approach.
fn compute_jitter(attempt: u32, backoff_ms: u64) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::hash::DefaultHasher::new();
    attempt.hash(&mut hasher);
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos()
        .hash(&mut hasher);
    hasher.finish() % (backoff_ms / 2 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retry() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 1000,
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    #[test]
    fn test_no_url_means_no_engine() {
        let config = OrchestrationConfig {
            url: None,
            timeout_seconds: 60,
            api_key_env: None,
        };
        assert!(HttpOrchestrationEngine::new(&config, retry()).is_none());

        let blank = OrchestrationConfig {
            url: Some("  ".into()),
            ..config
        };
        assert!(HttpOrchestrationEngine::new(&blank, retry()).is_none());
    }

    #[test]
    fn test_parse_body_json_or_text() {
        assert_eq!(
            parse_body(r#"{"raw": "text"}"#.into()),
            serde_json::json!({"raw": "text"})
        );
        assert_eq!(
            parse_body("# Plain markdown".into()),
            Value::String("# Plain markdown".into())
        );
    }

    #[test]
    fn test_jitter_bounded() {
        for attempt in 1..10 {
            assert!(compute_jitter(attempt, 1000) <= 500);
        }
    }
}
