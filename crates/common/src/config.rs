use serde::{Deserialize, Serialize};

/// Top-level system configuration, deserialized from system.toml.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemConfig {
    pub server: ServerConfig,
    pub engine: OrchestrationConfig,
    pub retry: RetryConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub cache: CacheConfig,
}

/// HTTP listener settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the service listens on. `AGENTFLOW_PORT` overrides it.
    pub port: u16,
}

/// External orchestration engine connection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrchestrationConfig {
    /// Base URL of the engine's execute endpoint. Absent = engine not wired,
    /// the chain starts from the cache stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Hard timeout for one execute call, in seconds. Crews routinely take
    /// tens of seconds.
    pub timeout_seconds: u64,
    /// Env var holding the bearer token sent to the engine, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

/// Retry configuration for engine calls.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

/// Circuit breaker thresholds for the primary engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before the breaker opens.
    pub failure_threshold: u32,
    /// Seconds the breaker stays open before allowing a probe.
    pub cooldown_seconds: u64,
}

/// Cached-example lookup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Directory holding previously stored `*.md` / `*.txt` results.
    pub examples_dir: String,
}
