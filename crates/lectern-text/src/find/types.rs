//! Find types: FindOptions, PageMatches.

use lectern_config::schema::FindConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    pub case_sensitive: bool,
    pub use_regex: bool,
    /// Paint every match, not just the selected one.
    pub highlight_all: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        FindOptions::from(&FindConfig::default())
    }
}

impl From<&FindConfig> for FindOptions {
    fn from(config: &FindConfig) -> Self {
        FindOptions {
            case_sensitive: config.case_sensitive,
            use_regex: config.use_regex,
            highlight_all: config.highlight_all,
        }
    }
}

/// Hits on one page, as char offsets into the page's concatenated text.
///
/// `starts` is ascending and `lengths[i]` pairs with `starts[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMatches {
    pub starts: Vec<usize>,
    pub lengths: Vec<usize>,
}

impl PageMatches {
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}
