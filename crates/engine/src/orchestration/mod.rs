mod adapter;
mod http;
mod job;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

pub use adapter::to_raw_output;
pub use http::HttpOrchestrationEngine;
pub use job::AnalysisJob;

/// Errors from orchestration engine calls.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Engine HTTP error: {0}")]
    Http(String),

    #[error("Engine auth error: {0}")]
    Auth(String),

    #[error("Engine API error: {0}")]
    Api(String),

    #[error("Engine response parse error: {0}")]
    Parse(String),
}

impl EngineError {
    /// Whether this error should not be retried.
    fn is_non_retryable(&self) -> bool {
        matches!(self, EngineError::Auth(_) | EngineError::Parse(_))
    }
}

/// The external multi-agent engine, as seen by the degradation chain.
///
/// Object-safe so the chain can hold `Arc<dyn OrchestrationEngine>`; tests
/// provide scripted engines, production uses [`HttpOrchestrationEngine`].
/// The returned value is whatever the engine produced; [`to_raw_output`]
/// normalizes it.
pub trait OrchestrationEngine: Send + Sync {
    fn execute<'a>(
        &'a self,
        job: &'a AnalysisJob,
    ) -> Pin<Box<dyn Future<Output = Result<Value, EngineError>> + Send + 'a>>;

    /// Name used for logs, metrics and the circuit breaker.
    fn name(&self) -> &str {
        "orchestration_engine"
    }
}
