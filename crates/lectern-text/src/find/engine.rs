//! Find engine: pattern matching over page text and match navigation.

use lectern_common::TextLayerError;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::highlight::{MatchSource, ScrollRequest, SelectedMatch};

use super::types::{FindOptions, PageMatches};

/// Searches every page's text and tracks the focused match.
///
/// Feeds a [`crate::TextHighlighter`] through the [`MatchSource`] seam.
pub struct FindController {
    label: String,
    pages: Vec<String>,
    query: Option<String>,
    options: FindOptions,
    matches: Vec<PageMatches>,
    selected: Option<SelectedMatch>,
    last_scroll: Option<ScrollRequest>,
}

impl FindController {
    pub fn new(label: impl Into<String>) -> Self {
        FindController {
            label: label.into(),
            pages: Vec::new(),
            query: None,
            options: FindOptions::default(),
            matches: Vec::new(),
            selected: None,
            last_scroll: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn options(&self) -> FindOptions {
        self.options
    }

    /// Register each page's fragment texts. Previous results are dropped.
    pub fn set_page_texts(&mut self, pages: Vec<Vec<String>>) {
        self.pages = pages.into_iter().map(|fragments| fragments.concat()).collect();
        self.matches.clear();
        self.selected = None;
    }

    /// Find every occurrence of `query` on every page.
    ///
    /// Literal queries match non-overlapping occurrences. Empty regex matches
    /// are skipped. Returns the total match count; the first match becomes
    /// selected.
    pub fn search(&mut self, query: &str, options: FindOptions) -> Result<usize, TextLayerError> {
        self.query = Some(query.to_string());
        self.options = options;
        self.matches.clear();
        self.selected = None;
        self.last_scroll = None;

        if query.is_empty() {
            return Ok(0);
        }

        let re = compile(query, options)?;
        self.matches = self.pages.iter().map(|text| find_in_page(&re, text)).collect();
        self.selected = self.at_ordinal(0);

        let total = self.match_count();
        debug!(
            label = %self.label,
            query,
            pages = self.pages.len(),
            total,
            "search finished"
        );
        Ok(total)
    }

    /// Advance to the next match, wrapping from the last page to the first.
    pub fn next_match(&mut self) -> Option<SelectedMatch> {
        let total = self.match_count();
        if total == 0 {
            return None;
        }
        let next = match self.ordinal() {
            Some(n) => (n + 1) % total,
            None => 0,
        };
        self.selected = self.at_ordinal(next);
        self.selected
    }

    /// Go to the previous match, wrapping from the first page to the last.
    pub fn prev_match(&mut self) -> Option<SelectedMatch> {
        let total = self.match_count();
        if total == 0 {
            return None;
        }
        let prev = match self.ordinal() {
            Some(0) | None => total - 1,
            Some(n) => n - 1,
        };
        self.selected = self.at_ordinal(prev);
        self.selected
    }

    /// Focus the `n`th match overall, if it exists.
    pub fn select(&mut self, n: usize) -> Option<SelectedMatch> {
        let selected = self.at_ordinal(n)?;
        self.selected = Some(selected);
        self.selected
    }

    pub fn selected(&self) -> Option<SelectedMatch> {
        self.selected
    }

    /// Drop the focus while keeping the matches, for a controller that only
    /// decorates text.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Total number of matches across all pages.
    pub fn match_count(&self) -> usize {
        self.matches.iter().map(PageMatches::len).sum()
    }

    pub fn page(&self, page_index: usize) -> Option<&PageMatches> {
        self.matches.get(page_index)
    }

    /// The most recent scroll request received from a highlighter.
    pub fn last_scroll_request(&self) -> Option<ScrollRequest> {
        self.last_scroll
    }

    /// Reset the search state entirely. Page texts are kept.
    pub fn clear(&mut self) {
        self.query = None;
        self.matches.clear();
        self.selected = None;
        self.last_scroll = None;
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn ordinal(&self) -> Option<usize> {
        let selected = self.selected?;
        let before: usize = self
            .matches
            .iter()
            .take(selected.page_index)
            .map(PageMatches::len)
            .sum();
        Some(before + selected.match_index)
    }

    fn at_ordinal(&self, mut n: usize) -> Option<SelectedMatch> {
        for (page_index, page) in self.matches.iter().enumerate() {
            if n < page.len() {
                return Some(SelectedMatch {
                    page_index,
                    match_index: n,
                });
            }
            n -= page.len();
        }
        None
    }
}

impl Default for FindController {
    fn default() -> Self {
        FindController::new("find")
    }
}

impl MatchSource for FindController {
    fn page_matches(&self, page_index: usize) -> Option<&[usize]> {
        self.matches.get(page_index).map(|p| p.starts.as_slice())
    }

    fn page_matches_length(&self, page_index: usize) -> Option<&[usize]> {
        self.matches.get(page_index).map(|p| p.lengths.as_slice())
    }

    fn selected(&self) -> Option<SelectedMatch> {
        self.selected
    }

    fn highlight_all(&self) -> bool {
        self.options.highlight_all
    }

    fn scroll_match_into_view(&mut self, request: ScrollRequest) {
        debug!(
            label = %self.label,
            page = request.page_index,
            match_index = request.match_index,
            element = %request.element,
            left = request.selected_left,
            "scroll match into view"
        );
        self.last_scroll = Some(request);
    }
}

fn compile(query: &str, options: FindOptions) -> Result<Regex, TextLayerError> {
    let pattern = if options.use_regex {
        query.to_string()
    } else {
        regex::escape(query)
    };
    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(|e| TextLayerError::InvalidPattern(e.to_string()))
}

/// Byte-offset regex hits converted to char offsets.
fn find_in_page(re: &Regex, text: &str) -> PageMatches {
    let mut page = PageMatches::default();
    let (mut byte_pos, mut char_pos) = (0usize, 0usize);
    for mat in re.find_iter(text) {
        if mat.is_empty() {
            continue;
        }
        char_pos += text[byte_pos..mat.start()].chars().count();
        byte_pos = mat.start();
        page.starts.push(char_pos);
        page.lengths.push(mat.as_str().chars().count());
    }
    page
}
