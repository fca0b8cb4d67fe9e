use thiserror::Error;

/// Top-level error type for AgentFlow operations.
#[derive(Debug, Error)]
pub enum AgentFlowError {
    // --- Upstream errors (chain degrades) ---
    #[error("Orchestration engine unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Orchestration engine failure: {0}")]
    UpstreamFailure(String),

    #[error("Malformed cached example: {0}")]
    MalformedCache(String),

    // --- Request errors (error stub, success = false) ---
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // --- Operational errors ---
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report rendering error: {0}")]
    Report(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgentFlowError {
    /// Whether the degradation chain recovers from this error by advancing
    /// to the next stage.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable(_)
                | Self::UpstreamFailure(_)
                | Self::MalformedCache(_)
        )
    }

    /// Short machine-readable label, used as a metrics tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::UpstreamFailure(_) => "upstream_failure",
            Self::MalformedCache(_) => "malformed_cache",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Config(_) => "config",
            Self::Report(_) => "report",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Result type alias for AgentFlow operations.
pub type Result<T> = std::result::Result<T, AgentFlowError>;
