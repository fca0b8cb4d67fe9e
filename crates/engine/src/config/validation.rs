use super::loader::{ConfigError, EngineConfig};

/// Validate the complete service configuration.
///
/// Checks sane ranges on numeric parameters and the engine URL scheme.
/// All problems are collected and reported together.
pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_server(config, &mut errors);
    validate_engine(config, &mut errors);
    validate_retry(config, &mut errors);
    validate_circuit_breaker(config, &mut errors);
    validate_cache(config, &mut errors);
    validate_templates(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.join("; ")))
    }
}

fn validate_server(config: &EngineConfig, errors: &mut Vec<String>) {
    if config.system.server.port == 0 {
        errors.push("server.port must be > 0".into());
    }
}

fn validate_engine(config: &EngineConfig, errors: &mut Vec<String>) {
    let e = &config.system.engine;

    if !(1..=3600).contains(&e.timeout_seconds) {
        errors.push("engine.timeout_seconds must be between 1 and 3600".into());
    }
    if let Some(url) = &e.url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("engine.url must be an http(s) URL, got '{}'", url));
        }
    }
    if e.api_key_env.as_deref().is_some_and(|v| v.trim().is_empty()) {
        errors.push("engine.api_key_env must not be empty when set".into());
    }
}

fn validate_retry(config: &EngineConfig, errors: &mut Vec<String>) {
    let rc = &config.system.retry;

    if rc.max_attempts == 0 {
        errors.push("retry.max_attempts must be > 0".into());
    }
    if rc.initial_backoff_ms == 0 {
        errors.push("retry.initial_backoff_ms must be > 0".into());
    }
    if rc.max_backoff_ms < rc.initial_backoff_ms {
        errors.push("retry.max_backoff_ms must be >= initial_backoff_ms".into());
    }
    if rc.backoff_multiplier < 1.0 {
        errors.push("retry.backoff_multiplier must be >= 1.0".into());
    }
}

fn validate_circuit_breaker(config: &EngineConfig, errors: &mut Vec<String>) {
    if config.system.circuit_breaker.failure_threshold == 0 {
        errors.push("circuit_breaker.failure_threshold must be > 0".into());
    }
}

fn validate_cache(config: &EngineConfig, errors: &mut Vec<String>) {
    let c = &config.system.cache;

    if c.enabled && c.examples_dir.trim().is_empty() {
        errors.push("cache.examples_dir must not be empty when the cache is enabled".into());
    }
}

fn validate_templates(config: &EngineConfig, errors: &mut Vec<String>) {
    for template in &config.templates {
        if template.label.trim().is_empty() {
            errors.push(format!("template '{}' has an empty label", template.name));
        }
        if template.name.trim().is_empty() {
            errors.push(format!("template '{}' has an empty company name", template.label));
        }
    }
}
