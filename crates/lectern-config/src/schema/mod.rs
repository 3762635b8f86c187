//! Configuration schema types for Lectern.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod accessibility;
mod find;
mod highlight;
mod system;

pub use accessibility::*;
pub use find::*;
pub use highlight::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Lectern.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LecternConfig {
    pub highlight: HighlightConfig,
    pub accessibility: AccessibilityConfig,
    pub find: FindConfig,
    pub logging: LoggingConfig,
}
