use std::path::{Path, PathBuf};

use agentflow_common::config::CacheConfig;
use agentflow_common::AgentFlowError;

/// A previously stored analysis found on disk.
#[derive(Clone, Debug)]
pub struct CachedExample {
    pub path: PathBuf,
    pub content: String,
}

/// Read-only lookup of stored example analyses (`*.md` / `*.txt`).
///
/// A file named after the company is preferred; otherwise the first example
/// in lexical order is used.
#[derive(Clone, Debug)]
pub struct ExampleCache {
    dir: PathBuf,
}

const EXTENSIONS: &[&str] = &["md", "txt"];

impl ExampleCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// None when the cache is disabled in config.
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.examples_dir.as_str()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Find an example for the company.
    ///
    /// `Ok(None)` when the directory is missing or holds no examples;
    /// `Err(MalformedCache)` when an example exists but cannot be used.
    pub fn lookup(&self, company_name: &str) -> Result<Option<CachedExample>, AgentFlowError> {
        if !self.dir.is_dir() {
            tracing::debug!(dir = %self.dir.display(), "Examples directory does not exist");
            return Ok(None);
        }

        let Some(path) = self.select(company_name)? else {
            return Ok(None);
        };

        let bytes = std::fs::read(&path).map_err(|e| {
            AgentFlowError::MalformedCache(format!("failed to read {}: {}", path.display(), e))
        })?;
        let content = String::from_utf8(bytes).map_err(|_| {
            AgentFlowError::MalformedCache(format!("{} is not valid UTF-8", path.display()))
        })?;
        if content.trim().is_empty() {
            return Err(AgentFlowError::MalformedCache(format!(
                "{} is empty",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), "Cached example found");
        Ok(Some(CachedExample { path, content }))
    }

    fn select(&self, company_name: &str) -> Result<Option<PathBuf>, AgentFlowError> {
        let slug = company_slug(company_name);
        if !slug.is_empty() {
            for ext in EXTENSIONS {
                let candidate = self.dir.join(format!("{}.{}", slug, ext));
                if candidate.parent() == Some(self.dir.as_path()) && candidate.is_file() {
                    return Ok(Some(candidate));
                }
            }
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            AgentFlowError::MalformedCache(format!(
                "failed to list {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let mut examples: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_example_extension(path))
            .collect();
        examples.sort();

        Ok(examples.into_iter().next())
    }
}

fn has_example_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext))
}

/// File stem used for a company's stored example: lowercase, whitespace as `_`.
///
/// Only `[a-z0-9_-]` survive, so the stem never leaves the examples directory.
pub fn company_slug(company_name: &str) -> String {
    company_name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}
