//! Highlighter state: fragment mapping, lifecycle and match updates.

use lectern_common::{Event, EventBus, NodeId, TextLayerError};
use lectern_config::schema::HighlightConfig;
use tracing::{debug, error};

use crate::dom::Document;

use super::source::{MatchSource, MatchSources};
use super::types::{Match, MatchSourceKind};

/// Fragment handles paired with their immutable text snapshots.
///
/// `nodes[i]` may be replaced by a wrapper element while painting; lookups
/// always go through the index, never a cached handle.
#[derive(Debug, Clone)]
pub struct TextMapping {
    nodes: Vec<NodeId>,
    texts: Vec<String>,
    char_lens: Vec<usize>,
    total_len: usize,
}

impl TextMapping {
    /// Pair `nodes[i]` with `texts[i]`. Unpaired trailing entries of the
    /// longer sequence are logged and dropped.
    pub fn new(mut nodes: Vec<NodeId>, mut texts: Vec<String>) -> Self {
        if nodes.len() != texts.len() {
            error!(
                nodes = nodes.len(),
                texts = texts.len(),
                "text mapping length mismatch, truncating to the shorter"
            );
            let len = nodes.len().min(texts.len());
            nodes.truncate(len);
            texts.truncate(len);
        }
        let char_lens: Vec<usize> = texts.iter().map(|t| t.chars().count()).collect();
        let total_len = char_lens.iter().sum();
        Self {
            nodes,
            texts,
            char_lens,
            total_len,
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.nodes
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn char_lens(&self) -> &[usize] {
        &self.char_lens
    }

    /// Length of the concatenated fragment text in Unicode scalar values.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Paints search matches from one or two find controllers into a page's
/// text-layer fragments.
pub struct TextHighlighter {
    page_index: usize,
    classes: HighlightConfig,
    events: EventBus,
    mapping: Option<TextMapping>,
    matches: Vec<Match>,
    enabled: bool,
}

impl TextHighlighter {
    pub fn new(page_index: usize, classes: HighlightConfig, events: EventBus) -> Self {
        TextHighlighter {
            page_index,
            classes,
            events,
            mapping: None,
            matches: Vec::new(),
            enabled: false,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Matches from the last update, sorted by begin position.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn mapping(&self) -> Option<&TextMapping> {
        self.mapping.as_ref()
    }

    pub(crate) fn mapping_mut(&mut self) -> Option<&mut TextMapping> {
        self.mapping.as_mut()
    }

    pub(crate) fn classes(&self) -> &HighlightConfig {
        &self.classes
    }

    pub(crate) fn events(&self) -> &EventBus {
        &self.events
    }

    pub(crate) fn class_for(&self, source: MatchSourceKind) -> &str {
        match source {
            MatchSourceKind::Primary => &self.classes.css_class,
            MatchSourceKind::Custom => &self.classes.custom_css_class,
        }
    }

    /// Register the fragment nodes and the text each should contain.
    ///
    /// Element `i` of one sequence corresponds to element `i` of the other;
    /// see [`TextMapping::new`] for sequences of different length.
    pub fn set_text_mapping(&mut self, nodes: Vec<NodeId>, texts: Vec<String>) {
        self.matches.clear();
        self.mapping = Some(TextMapping::new(nodes, texts));
    }

    /// Start reacting to match updates and paint the current matches.
    pub fn enable(
        &mut self,
        doc: &mut Document,
        sources: &mut MatchSources<'_>,
    ) -> Result<(), TextLayerError> {
        if self.mapping.is_none() {
            return Err(TextLayerError::NotMapped);
        }
        if self.enabled {
            return Err(TextLayerError::AlreadyEnabled("TextHighlighter"));
        }
        self.enabled = true;
        debug!(page = self.page_index, "text highlighter enabled");
        self.update_matches(doc, sources);
        Ok(())
    }

    /// Stop reacting to updates and restore every painted fragment.
    pub fn disable(&mut self, doc: &mut Document) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        debug!(page = self.page_index, "text highlighter disabled");
        self.reset_matches(doc);
    }

    /// React to a bus event addressed to this page (or to all pages).
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event, sources: &mut MatchSources<'_>) {
        if let Event::UpdateTextLayerMatches { page_index } = event {
            if page_index.map_or(true, |p| p == self.page_index) {
                self.update_matches(doc, sources);
            }
        }
    }

    /// Restore the raw text of every fragment touched by the previous matches.
    ///
    /// Idempotent: the match list is forgotten afterwards.
    pub fn reset_matches(&mut self, doc: &mut Document) {
        let matches = std::mem::take(&mut self.matches);
        let Some(mapping) = self.mapping.as_ref() else {
            return;
        };
        let mut cleared_until = 0usize;
        for m in &matches {
            let start = cleared_until.max(m.begin.fragment_index);
            for n in start..=m.end.fragment_index {
                let (Some(&node), Some(text)) = (mapping.nodes().get(n), mapping.texts().get(n))
                else {
                    break;
                };
                doc.set_text_content(node, text);
                doc.set_class_name(node, "");
            }
            cleared_until = cleared_until.max(m.end.fragment_index + 1);
        }
    }

    /// Recompute matches from both sources and repaint.
    ///
    /// Custom matches are converted first and primary matches second; a
    /// stable sort on begin position then interleaves them. At most one
    /// match stays selected: a primary selection on this page wins over a
    /// custom one.
    pub fn update_matches(&mut self, doc: &mut Document, sources: &mut MatchSources<'_>) {
        if !self.enabled {
            return;
        }
        self.reset_matches(doc);

        let mut matches = Vec::new();
        if let Some(custom) = sources.get(MatchSourceKind::Custom) {
            matches.extend(self.convert_source(custom, MatchSourceKind::Custom));
        }
        if let Some(primary) = sources.get(MatchSourceKind::Primary) {
            matches.extend(self.convert_source(primary, MatchSourceKind::Primary));
        }
        matches.sort_by_key(|m| m.begin);
        keep_single_selection(&mut matches);

        self.render_matches(doc, &matches, sources);
        self.matches = matches;
    }

    fn convert_source(&self, source: &dyn MatchSource, kind: MatchSourceKind) -> Vec<Match> {
        let page = self.page_index;
        let (Some(starts), Some(lengths)) =
            (source.page_matches(page), source.page_matches_length(page))
        else {
            return Vec::new();
        };
        let selected_index = source
            .selected()
            .filter(|s| s.page_index == page)
            .map(|s| s.match_index);
        self.convert_matches(starts, lengths, kind, source.highlight_all(), selected_index)
    }
}

fn keep_single_selection(matches: &mut [Match]) {
    let winner = matches
        .iter()
        .position(|m| m.selected && m.source == MatchSourceKind::Primary)
        .or_else(|| matches.iter().position(|m| m.selected));
    let Some(winner) = winner else {
        return;
    };
    for (i, m) in matches.iter_mut().enumerate() {
        if i != winner && m.selected {
            debug!(source = ?m.source, match_index = m.match_index, "dropping competing selection");
            m.selected = false;
        }
    }
}
