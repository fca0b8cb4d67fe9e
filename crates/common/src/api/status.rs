use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// GET /status response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always true: the chain falls back to simulation when nothing else works.
    pub ready: bool,
    /// An engine URL is configured.
    pub engine_configured: bool,
    /// "closed", "open" or "half_open".
    pub engine_circuit: String,
    pub cache_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples_dir: Option<String>,
    /// API key presence by provider. Display only.
    pub api_keys: BTreeMap<String, bool>,
}
