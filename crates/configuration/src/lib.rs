use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ChartSettings, Config, GeneratorSettings, LoggingSettings, OutputSettings};

/// The file looked up in the working directory by `load_config`.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration from `config.toml` in the working directory.
///
/// The file is optional. Every field has a default, so a run without it produces
/// the standard 1000-row, seed-0 report in the working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(DEFAULT_CONFIG_FILE)
}

/// Loads and validates the configuration from an explicit path.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}
