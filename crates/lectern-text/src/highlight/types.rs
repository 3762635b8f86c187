//! Match types: fragment-relative positions and painted matches.

use lectern_common::NodeId;
use serde::{Deserialize, Serialize};

/// A position inside the fragment sequence. Ordered by fragment, then offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchPosition {
    pub fragment_index: usize,
    /// Offset in Unicode scalar values within the fragment text.
    pub offset: usize,
}

impl MatchPosition {
    pub fn new(fragment_index: usize, offset: usize) -> Self {
        Self {
            fragment_index,
            offset,
        }
    }
}

/// Which find controller produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchSourceKind {
    /// Secondary highlighter; converted first so it sorts first on ties.
    Custom,
    Primary,
}

/// One converted search hit. `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub begin: MatchPosition,
    pub end: MatchPosition,
    pub css_class: String,
    pub highlight_all: bool,
    pub selected: bool,
    pub source: MatchSourceKind,
    /// Index of the match within its source's page match list.
    pub match_index: usize,
}

impl Match {
    /// Only selected matches, or matches whose source highlights all, are painted.
    pub fn is_painted(&self) -> bool {
        self.selected || self.highlight_all
    }
}

/// The match a find controller currently has focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedMatch {
    pub page_index: usize,
    pub match_index: usize,
}

/// Request for the viewport to bring a painted match into view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    /// Fragment node hosting the beginning of the match.
    pub element: NodeId,
    /// Horizontal offset of the match inside `element`.
    pub selected_left: f64,
    pub page_index: usize,
    pub match_index: usize,
}
