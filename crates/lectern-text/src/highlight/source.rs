//! The search-collaborator seam.

use super::types::{MatchSourceKind, ScrollRequest, SelectedMatch};

/// A find controller as seen by the highlighter.
pub trait MatchSource {
    /// Ascending start offsets of the matches on `page_index`.
    fn page_matches(&self, page_index: usize) -> Option<&[usize]>;

    /// Lengths paired with [`MatchSource::page_matches`].
    fn page_matches_length(&self, page_index: usize) -> Option<&[usize]>;

    fn selected(&self) -> Option<SelectedMatch>;

    fn highlight_all(&self) -> bool;

    fn scroll_match_into_view(&mut self, request: ScrollRequest);
}

/// The primary find controller plus an optional secondary ("custom") one.
pub struct MatchSources<'a> {
    pub primary: &'a mut dyn MatchSource,
    pub custom: Option<&'a mut dyn MatchSource>,
}

impl<'a> MatchSources<'a> {
    pub fn new(primary: &'a mut dyn MatchSource) -> Self {
        Self {
            primary,
            custom: None,
        }
    }

    pub fn with_custom(mut self, custom: &'a mut dyn MatchSource) -> Self {
        self.custom = Some(custom);
        self
    }

    pub fn get(&self, kind: MatchSourceKind) -> Option<&(dyn MatchSource + 'a)> {
        match kind {
            MatchSourceKind::Primary => Some(&*self.primary),
            MatchSourceKind::Custom => self.custom.as_deref(),
        }
    }

    pub fn get_mut(&mut self, kind: MatchSourceKind) -> Option<&mut (dyn MatchSource + 'a)> {
        match kind {
            MatchSourceKind::Primary => Some(&mut *self.primary),
            MatchSourceKind::Custom => self.custom.as_deref_mut(),
        }
    }
}

/// A source with no matches, for pages that are not being searched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMatches;

impl MatchSource for NoMatches {
    fn page_matches(&self, _page_index: usize) -> Option<&[usize]> {
        None
    }

    fn page_matches_length(&self, _page_index: usize) -> Option<&[usize]> {
        None
    }

    fn selected(&self) -> Option<SelectedMatch> {
        None
    }

    fn highlight_all(&self) -> bool {
        false
    }

    fn scroll_match_into_view(&mut self, _request: ScrollRequest) {}
}
