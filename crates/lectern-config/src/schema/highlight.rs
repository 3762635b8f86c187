//! Highlight class names painted into the text layer.

use serde::{Deserialize, Serialize};

/// Class names used when painting search matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Class for matches from the primary find controller.
    pub css_class: String,
    /// Class for matches from the secondary (custom) find controller.
    pub custom_css_class: String,
    /// Suffix token added to the currently selected match.
    pub selected_class: String,
    /// Marker token added to every span the highlighter inserts.
    pub appended_class: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            css_class: "highlight".into(),
            custom_css_class: "customHighlight".into(),
            selected_class: "selected".into(),
            appended_class: "appended".into(),
        }
    }
}
