use serde::{Deserialize, Serialize};

use crate::error::AgentFlowError;

/// Why a stage produced no usable agent text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamErrorCode {
    /// Engine not wired, not reachable, or its circuit is open.
    Unavailable,
    /// Engine raised during execution.
    Failure,
    /// Engine did not answer within the configured timeout.
    Timeout,
    /// Engine answered with nothing.
    EmptyOutput,
}

impl UpstreamErrorCode {
    /// Whether the engine was called and let the caller down.
    /// Only these outcomes count against its circuit breaker.
    pub fn counts_against_engine(self) -> bool {
        !matches!(self, Self::Unavailable)
    }

    /// Chain error for this code, carrying `detail` as its message.
    pub fn into_error(self, detail: impl Into<String>) -> AgentFlowError {
        match self {
            Self::Unavailable => AgentFlowError::UpstreamUnavailable(detail.into()),
            Self::Failure | Self::Timeout | Self::EmptyOutput => {
                AgentFlowError::UpstreamFailure(detail.into())
            }
        }
    }
}

/// Output of one chain stage, normalized at the engine boundary.
///
/// Whatever shape the engine returns is reduced to one of these two
/// variants before anything downstream sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawAgentOutput {
    Text(String),
    Error(UpstreamErrorCode),
}

impl RawAgentOutput {
    /// Wrap engine text, turning blank text into `Error(EmptyOutput)`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Error(UpstreamErrorCode::EmptyOutput)
        } else {
            Self::Text(text)
        }
    }

    /// Text content, empty for the error variant.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Error(_) => "",
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Error(_) => String::new(),
        }
    }

    /// Whether this output carries non-blank text.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Text(text) if !text.trim().is_empty())
    }

    pub fn error_code(&self) -> Option<UpstreamErrorCode> {
        match self {
            Self::Text(_) => None,
            Self::Error(code) => Some(*code),
        }
    }
}
