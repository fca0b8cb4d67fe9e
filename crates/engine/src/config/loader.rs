use std::path::{Path, PathBuf};

use agentflow_common::api::analyze::AnalysisTemplate;
use agentflow_common::config::SystemConfig;
use agentflow_common::AgentFlowError;

use super::validation;

/// Complete service configuration loaded from the config directory.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Parsed system.toml.
    pub system: SystemConfig,
    /// Extra analysis templates from config/templates/*.toml, sorted by file name.
    pub templates: Vec<AnalysisTemplate>,
    pub config_dir: PathBuf,
}

/// Load all configuration from the given config directory.
///
/// Every validation problem is reported at once; the service refuses to
/// start on any of them.
pub fn load_config(config_dir: &Path) -> Result<EngineConfig, ConfigError> {
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    let system = load_system_config(&config_dir.join("system.toml"))?;
    let templates = load_templates(&config_dir.join("templates"))?;

    let config = EngineConfig {
        system,
        templates,
        config_dir: config_dir.to_path_buf(),
    };

    validation::validate(&config)?;

    tracing::info!(
        templates = config.templates.len(),
        engine_url = config.system.engine.url.as_deref().unwrap_or("none"),
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn load_system_config(path: &Path) -> Result<SystemConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

fn load_templates(templates_dir: &Path) -> Result<Vec<AnalysisTemplate>, ConfigError> {
    if !templates_dir.exists() {
        tracing::debug!(
            path = %templates_dir.display(),
            "Templates directory does not exist, using built-in templates only"
        );
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(templates_dir).map_err(|e| ConfigError::FileRead {
        path: templates_dir.to_path_buf(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::FileRead {
            path: templates_dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut templates = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
            path: path.clone(),
            source: e,
        })?;
        let template: AnalysisTemplate =
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                detail: e.to_string(),
            })?;

        tracing::debug!(template = %template.label, "Loaded analysis template");
        templates.push(template);
    }

    Ok(templates)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<ConfigError> for AgentFlowError {
    fn from(e: ConfigError) -> Self {
        AgentFlowError::Config(e.to_string())
    }
}
