//! Painting converted matches into the fragment nodes.

use lectern_common::{Event, NodeId};
use tracing::debug;

use crate::dom::{char_slice, Document};
use crate::layer::TEXT_LAYER_CLASS;

use super::highlighter::{TextHighlighter, TextMapping};
use super::source::MatchSources;
use super::types::{Match, MatchPosition, ScrollRequest};

/// A highlight span to insert: full class string plus whether it is the
/// selected match (which needs its horizontal offset measured).
struct Paint<'c> {
    class: &'c str,
    selected: bool,
}

/// Mutation helpers over one mapping. After the first touch of a fragment
/// in a pass every change to it is an append.
struct Painter<'d, 'm> {
    doc: &'d mut Document,
    mapping: &'m mut TextMapping,
    appended_class: &'m str,
}

impl Painter<'_, '_> {
    /// Fragment node at `index`, wrapping a bare text node in a span first.
    fn host(&mut self, index: usize) -> NodeId {
        let node = self.mapping.nodes()[index];
        if !self.doc.is_text(node) {
            return node;
        }
        let span = self.doc.wrap_in(node, "span");
        self.mapping.nodes_mut()[index] = span;
        span
    }

    /// Clear the fragment, then append its text up to `begin.offset`.
    fn begin_text(&mut self, begin: MatchPosition, paint: Option<Paint<'_>>) -> f64 {
        let node = self.mapping.nodes()[begin.fragment_index];
        self.doc.set_text_content(node, "");
        self.append_text(begin.fragment_index, 0, Some(begin.offset), paint)
    }

    /// Append `text[from..to]` of a fragment, optionally inside a highlight
    /// span. Returns the estimated horizontal offset of a selected span.
    fn append_text(
        &mut self,
        index: usize,
        from: usize,
        to: Option<usize>,
        paint: Option<Paint<'_>>,
    ) -> f64 {
        let host = self.host(index);
        let content = char_slice(&self.mapping.texts()[index], from, to).to_string();
        let text = self.doc.create_text(content);

        let Some(paint) = paint else {
            self.doc.append_child(host, text);
            return 0.0;
        };
        let span = self.doc.create_element("span");
        self.doc
            .set_class_name(span, &format!("{} {}", paint.class, self.appended_class));
        self.doc.append_child(span, text);
        self.doc.append_child(host, span);
        if paint.selected {
            self.offset_left(index, from)
        } else {
            0.0
        }
    }

    /// Layout is external; estimate the offset from the fragment's box as if
    /// its glyphs had equal advance.
    fn offset_left(&self, index: usize, from: usize) -> f64 {
        let len = self.mapping.char_lens()[index];
        if len == 0 {
            return 0.0;
        }
        let rect = self.doc.bounding_rect(self.mapping.nodes()[index]);
        rect.width * from.min(len) as f64 / len as f64
    }

    /// Tag a whole interior fragment.
    fn tag_fragment(&mut self, index: usize, class: &str) {
        let node = self.host(index);
        self.doc.set_class_name(node, class);
    }
}

impl TextHighlighter {
    /// Paint every match that is selected or whose source highlights all.
    ///
    /// `matches` must be sorted by begin position. Matches sharing a begin
    /// position with the previously painted one are skipped (a ligature can
    /// yield the same hit twice). Where two matches overlap, the later one is
    /// clipped to start at the earlier one's end so fragment text is never
    /// duplicated.
    pub fn render_matches(
        &mut self,
        doc: &mut Document,
        matches: &[Match],
        sources: &mut MatchSources<'_>,
    ) {
        if matches.is_empty() {
            return;
        }
        let page_index = self.page_index();
        let selected_class = self.classes().selected_class.clone();
        let appended_class = self.classes().appended_class.clone();
        let events = self.events().clone();
        let Some(mapping) = self.mapping_mut() else {
            return;
        };
        let mut painter = Painter {
            doc,
            mapping,
            appended_class: &appended_class,
        };

        let mut prev_end: Option<MatchPosition> = None;
        let mut last_begin: Option<MatchPosition> = None;

        for m in matches {
            if !m.is_painted() {
                continue;
            }
            if last_begin == Some(m.begin) {
                continue;
            }
            last_begin = Some(m.begin);

            let begin = match prev_end {
                Some(p) if p > m.begin => p,
                _ => m.begin,
            };
            let end = m.end;
            if begin > end || (begin == end && begin != m.begin) {
                debug!(page = page_index, match_index = m.match_index, "match covered by previous highlight");
                continue;
            }

            let suffix = if m.selected {
                format!(" {selected_class}")
            } else {
                String::new()
            };

            match prev_end {
                Some(p) if p.fragment_index == begin.fragment_index => {
                    painter.append_text(p.fragment_index, p.offset, Some(begin.offset), None);
                }
                _ => {
                    if let Some(p) = prev_end {
                        painter.append_text(p.fragment_index, p.offset, None, None);
                    }
                    painter.begin_text(begin, None);
                }
            }

            let selected_left = if begin.fragment_index == end.fragment_index {
                let class = format!("{}{suffix}", m.css_class);
                painter.append_text(
                    begin.fragment_index,
                    begin.offset,
                    Some(end.offset),
                    Some(Paint {
                        class: &class,
                        selected: m.selected,
                    }),
                )
            } else {
                let class = format!("{} begin{suffix}", m.css_class);
                let left = painter.append_text(
                    begin.fragment_index,
                    begin.offset,
                    None,
                    Some(Paint {
                        class: &class,
                        selected: m.selected,
                    }),
                );
                let middle = format!("{} middle{suffix}", m.css_class);
                for n in begin.fragment_index + 1..end.fragment_index {
                    painter.tag_fragment(n, &middle);
                }
                let class = format!("{} end{suffix}", m.css_class);
                painter.begin_text(
                    end,
                    Some(Paint {
                        class: &class,
                        selected: m.selected,
                    }),
                );
                left
            };
            prev_end = Some(end);

            if m.selected {
                let request = ScrollRequest {
                    element: painter.mapping.nodes()[begin.fragment_index],
                    selected_left,
                    page_index,
                    match_index: m.match_index,
                };
                if let Some(source) = sources.get_mut(m.source) {
                    source.scroll_match_into_view(request);
                }
            }

            if let Some(&first) = painter.mapping.nodes().first() {
                let scope = painter
                    .doc
                    .closest_with_class(first, TEXT_LAYER_CLASS)
                    .or_else(|| painter.doc.parent(first));
                if let Some(scope) = scope {
                    let highlights = painter.doc.descendants_with_class(scope, &m.css_class);
                    events.publish(Event::RenderedTextLayerHighlights {
                        page_index,
                        css_class: m.css_class.clone(),
                        highlights,
                    });
                }
            }
        }

        if let Some(p) = prev_end {
            painter.append_text(p.fragment_index, p.offset, None, None);
        }
    }
}
