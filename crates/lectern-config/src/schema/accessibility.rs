//! Accessibility linkage configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityConfig {
    pub enabled: bool,
    /// Class marking a semantic group container in the text layer.
    pub marked_content_class: String,
    /// Attribute that lists the ids of overlay elements owned by a fragment.
    pub owns_attribute: String,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            marked_content_class: "markedContent".into(),
            owns_attribute: "aria-owns".into(),
        }
    }
}
