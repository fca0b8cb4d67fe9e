use std::collections::BTreeMap;

use agentflow_common::api::status::StatusResponse;

use crate::chain::DegradationChain;

/// Provider keys whose presence is reported by GET /status.
const API_KEY_VARS: &[(&str, &str)] = &[
    ("openai", "OPENAI_API_KEY"),
    ("langchain", "LANGCHAIN_API_KEY"),
];

/// Which provider API keys are set in the environment. Values are never read.
pub fn api_key_presence() -> BTreeMap<String, bool> {
    api_key_presence_with(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

fn api_key_presence_with(is_set: impl Fn(&str) -> bool) -> BTreeMap<String, bool> {
    API_KEY_VARS
        .iter()
        .map(|(provider, var)| (provider.to_string(), is_set(var)))
        .collect()
}

pub fn build_status(chain: &DegradationChain) -> StatusResponse {
    StatusResponse {
        ready: true,
        engine_configured: chain.has_engine(),
        engine_circuit: chain.breaker().current_state().as_str().to_string(),
        cache_enabled: chain.cache().is_some(),
        examples_dir: chain.cache().map(|c| c.dir().display().to_string()),
        api_keys: api_key_presence(),
    }
}
