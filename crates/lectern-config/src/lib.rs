//! Lectern configuration system.
//!
//! TOML-based configuration for the text-layer highlighter, the
//! accessibility linker and the find controller. Every section uses
//! serde defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lectern_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LecternConfig, CONFIG_SCHEMA_VERSION};

use lectern_common::ConfigError;

/// Load config from the platform default path and validate it strictly.
pub fn load_config() -> Result<LecternConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &LecternConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
