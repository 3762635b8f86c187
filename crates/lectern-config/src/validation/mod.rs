//! Full configuration validation.
//!
//! Each section has its own check; errors from all of them are collected
//! into a single `ConfigError`.

mod classes;
mod helpers;


use crate::schema::LecternConfig;
use lectern_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &LecternConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    classes::validate_highlight(&mut errors, config);
    classes::validate_accessibility(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
