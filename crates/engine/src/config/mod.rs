mod loader;
mod validation;

pub use loader::{load_config, ConfigError, EngineConfig};
pub use validation::validate;
