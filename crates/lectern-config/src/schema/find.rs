//! Find controller defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FindConfig {
    pub case_sensitive: bool,
    pub use_regex: bool,
    pub highlight_all: bool,
}

impl Default for FindConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            use_regex: false,
            highlight_all: true,
        }
    }
}
