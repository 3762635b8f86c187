//! Offset-space to fragment-space conversion.

use tracing::{error, warn};

use super::highlighter::TextHighlighter;
use super::types::{Match, MatchPosition, MatchSourceKind};

impl TextHighlighter {
    /// Convert flat start offsets and lengths into fragment-relative matches.
    ///
    /// `raw_matches` must be non-decreasing. Offsets count Unicode scalar
    /// values of the concatenated fragment texts. A match that does not fit
    /// inside the registered text, or that starts before its predecessor, is
    /// logged and dropped; the rest of the page still converts.
    ///
    /// `selected_index` is the focused match of this source when the source's
    /// selection is on this page.
    pub fn convert_matches(
        &self,
        raw_matches: &[usize],
        raw_lengths: &[usize],
        source: MatchSourceKind,
        highlight_all: bool,
        selected_index: Option<usize>,
    ) -> Vec<Match> {
        let Some(mapping) = self.mapping() else {
            return Vec::new();
        };
        if raw_matches.is_empty() {
            return Vec::new();
        }
        if raw_matches.len() != raw_lengths.len() {
            warn!(
                page = self.page_index(),
                "match offsets ({}) and lengths ({}) differ in count",
                raw_matches.len(),
                raw_lengths.len()
            );
        }

        let lens = mapping.char_lens();
        let total = mapping.total_len();
        let Some(last) = lens.len().checked_sub(1) else {
            error!(page = self.page_index(), "could not find a matching mapping: no fragments");
            return Vec::new();
        };
        let css_class = self.class_for(source).to_string();

        // Cursor over begin positions; it only ever moves forward.
        let mut i = 0usize;
        let mut i_index = 0usize;
        let mut result = Vec::with_capacity(raw_matches.len());

        for (m, (&start, &length)) in raw_matches.iter().zip(raw_lengths).enumerate() {
            let end_offset = match start.checked_add(length) {
                Some(end) if end <= total && start >= i_index => end,
                _ => {
                    error!(
                        page = self.page_index(),
                        match_index = m,
                        start,
                        length,
                        total,
                        "could not find a matching mapping"
                    );
                    continue;
                }
            };

            while i != last && start >= i_index + lens[i] {
                i_index += lens[i];
                i += 1;
            }
            let begin = MatchPosition::new(i, start - i_index);

            // `>` rather than `>=`: a match ending on a fragment boundary
            // belongs to the earlier fragment.
            let (mut j, mut j_index) = (i, i_index);
            while j != last && end_offset > j_index + lens[j] {
                j_index += lens[j];
                j += 1;
            }
            let end = MatchPosition::new(j, end_offset - j_index);

            result.push(Match {
                begin,
                end,
                css_class: css_class.clone(),
                highlight_all,
                selected: selected_index == Some(m),
                source,
                match_index: m,
            });
        }
        result
    }
}
