use super::*;
use crate::dom::{char_slice, Document};
use crate::layer::TEXT_LAYER_CLASS;
use lectern_common::{Event, EventBus, NodeId, Rect, TextLayerError};
use lectern_config::schema::HighlightConfig;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct TestSource {
    matches: Vec<usize>,
    lengths: Vec<usize>,
    selected: Option<SelectedMatch>,
    highlight_all: bool,
    scrolls: Vec<ScrollRequest>,
}

impl TestSource {
    fn new(matches: Vec<usize>, lengths: Vec<usize>) -> Self {
        TestSource {
            matches,
            lengths,
            selected: None,
            highlight_all: true,
            scrolls: Vec::new(),
        }
    }
}

impl MatchSource for TestSource {
    fn page_matches(&self, page_index: usize) -> Option<&[usize]> {
        (page_index == 0).then_some(self.matches.as_slice())
    }

    fn page_matches_length(&self, page_index: usize) -> Option<&[usize]> {
        (page_index == 0).then_some(self.lengths.as_slice())
    }

    fn selected(&self) -> Option<SelectedMatch> {
        self.selected
    }

    fn highlight_all(&self) -> bool {
        self.highlight_all
    }

    fn scroll_match_into_view(&mut self, request: ScrollRequest) {
        self.scrolls.push(request);
    }
}

/// A text layer with one span per fragment, laid out left to right at
/// 10px per character.
fn setup(texts: &[&str]) -> (Document, NodeId, Vec<NodeId>) {
    let mut doc = Document::new();
    let root = doc.root();
    let layer = doc.create_element("div");
    doc.set_class_name(layer, TEXT_LAYER_CLASS);
    doc.append_child(root, layer);

    let mut x = 0.0;
    let nodes = texts
        .iter()
        .map(|t| {
            let span = doc.create_element("span");
            doc.set_text_content(span, t);
            let width = t.chars().count() as f64 * 10.0;
            doc.set_rect(span, Rect::new(x, 0.0, width, 12.0));
            x += width;
            doc.append_child(layer, span);
            span
        })
        .collect();
    (doc, layer, nodes)
}

fn highlighter(nodes: &[NodeId], texts: &[&str]) -> TextHighlighter {
    let mut h = TextHighlighter::new(0, HighlightConfig::default(), EventBus::new(16));
    h.set_text_mapping(
        nodes.to_vec(),
        texts.iter().map(|t| t.to_string()).collect(),
    );
    h
}

fn slice_across(texts: &[&str], begin: MatchPosition, end: MatchPosition) -> String {
    let mut out = String::new();
    for i in begin.fragment_index..=end.fragment_index {
        let from = if i == begin.fragment_index { begin.offset } else { 0 };
        let to = if i == end.fragment_index {
            Some(end.offset)
        } else {
            None
        };
        out.push_str(char_slice(texts[i], from, to));
    }
    out
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

#[test]
fn converted_matches_read_back_the_matched_text() {
    let cases: [&[&str]; 3] = [
        &["Hello ", "world", "!"],
        &["a", "", "bc", "déf"],
        &["single"],
    ];
    for texts in cases {
        let (_, _, nodes) = setup(texts);
        let h = highlighter(&nodes, texts);
        let chars: Vec<char> = texts.concat().chars().collect();
        for start in 0..=chars.len() {
            for len in 0..=chars.len() - start {
                let m = h.convert_matches(&[start], &[len], MatchSourceKind::Primary, true, None);
                assert_eq!(m.len(), 1, "{texts:?} start={start} len={len}");
                let expected: String = chars[start..start + len].iter().collect();
                assert_eq!(
                    slice_across(texts, m[0].begin, m[0].end),
                    expected,
                    "{texts:?} start={start} len={len}"
                );
            }
        }
    }
}

#[test]
fn match_ending_on_boundary_belongs_to_earlier_fragment() {
    let texts = ["abc", "def"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let m = h.convert_matches(&[0, 1], &[3, 2], MatchSourceKind::Primary, true, None);
    assert_eq!(m[0].end, MatchPosition::new(0, 3));
    assert_eq!(m[1].end, MatchPosition::new(0, 3));

    let mut primary = TestSource::new(vec![1], vec![2]);
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();
    assert_eq!(
        doc.inner_html(nodes[0]),
        r#"a<span class="highlight appended">bc</span>"#
    );
    assert_eq!(doc.inner_html(nodes[1]), "def");
}

#[test]
fn malformed_matches_are_dropped_and_the_rest_kept() {
    let texts = ["Hello ", "world"];
    let (_, _, nodes) = setup(&texts);
    let h = highlighter(&nodes, &texts);

    let m = h.convert_matches(&[0, 8, 9, 20], &[2, 10, 1, 1], MatchSourceKind::Primary, true, None);
    let indices: Vec<usize> = m.iter().map(|m| m.match_index).collect();
    assert_eq!(indices, vec![0, 2]);
    assert_eq!(m[1].begin, MatchPosition::new(1, 3));

    // A start offset behind the cursor breaks the ordering contract.
    let m = h.convert_matches(&[7, 2], &[1, 1], MatchSourceKind::Primary, true, None);
    assert_eq!(m.len(), 1);
    assert_eq!(m[0].begin, MatchPosition::new(1, 1));
}

#[test]
fn conversion_without_mapping_is_empty() {
    let h = TextHighlighter::new(0, HighlightConfig::default(), EventBus::new(4));
    assert!(h
        .convert_matches(&[0], &[1], MatchSourceKind::Primary, true, None)
        .is_empty());
}

#[test]
fn selection_flag_follows_selected_index() {
    let texts = ["aaaa"];
    let (_, _, nodes) = setup(&texts);
    let h = highlighter(&nodes, &texts);
    let m = h.convert_matches(&[0, 1, 2], &[1, 1, 1], MatchSourceKind::Custom, false, Some(1));
    let selected: Vec<bool> = m.iter().map(|m| m.selected).collect();
    assert_eq!(selected, vec![false, true, false]);
    assert!(m.iter().all(|m| m.css_class == "customHighlight"));
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_example() {
    let texts = ["Hello ", "world", "!"];
    let (mut doc, layer, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let converted = h.convert_matches(&[3], &[4], MatchSourceKind::Primary, true, None);
    assert_eq!(converted[0].begin, MatchPosition::new(0, 3));
    assert_eq!(converted[0].end, MatchPosition::new(1, 1));

    let mut primary = TestSource::new(vec![3], vec![4]);
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();

    assert_eq!(
        doc.inner_html(nodes[0]),
        r#"Hel<span class="highlight begin appended">lo </span>"#
    );
    assert_eq!(
        doc.inner_html(nodes[1]),
        r#"<span class="highlight end appended">w</span>orld"#
    );
    assert_eq!(doc.inner_html(nodes[2]), "!");
    assert_eq!(doc.text_content(layer), "Hello world!");
}

#[test]
fn interior_fragments_are_tagged_middle() {
    let texts = ["ab", "cd", "ef"];
    let (mut doc, layer, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![1], vec![4]);
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();

    assert_eq!(doc.class_name(nodes[1]), "highlight middle");
    assert_eq!(doc.inner_html(nodes[1]), "cd");
    assert_eq!(
        doc.inner_html(nodes[2]),
        r#"<span class="highlight end appended">e</span>f"#
    );
    assert_eq!(doc.text_content(layer), "abcdef");
}

#[test]
fn only_selected_match_is_painted_without_highlight_all() {
    let texts = ["find me", "and find me too"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![0, 11], vec![4, 4]);
    primary.highlight_all = false;
    primary.selected = Some(SelectedMatch {
        page_index: 0,
        match_index: 1,
    });
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();

    assert_eq!(doc.inner_html(nodes[0]), "find me");
    assert_eq!(
        doc.inner_html(nodes[1]),
        r#"and <span class="highlight selected appended">find</span> me too"#
    );
    // Both matches are kept for later toggling.
    assert_eq!(h.matches().len(), 2);

    assert_eq!(primary.scrolls.len(), 1);
    let request = primary.scrolls[0];
    assert_eq!(request.element, nodes[1]);
    assert_eq!(request.page_index, 0);
    assert_eq!(request.match_index, 1);
    assert!((request.selected_left - 40.0).abs() < 1e-9);
}

#[test]
fn selection_on_another_page_is_ignored() {
    let texts = ["abc"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![0], vec![1]);
    primary.highlight_all = false;
    primary.selected = Some(SelectedMatch {
        page_index: 4,
        match_index: 0,
    });
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();

    assert_eq!(doc.inner_html(nodes[0]), "abc");
    assert!(primary.scrolls.is_empty());
}

#[test]
fn duplicate_begin_is_painted_once() {
    let texts = ["office"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![1, 1], vec![2, 1]);
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();

    assert_eq!(
        doc.inner_html(nodes[0]),
        r#"o<span class="highlight appended">ff</span>ice"#
    );
}

#[test]
fn custom_and_primary_matches_interleave() {
    let texts = ["abcdefgh"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![0, 4], vec![2, 2]);
    let mut custom = TestSource::new(vec![0], vec![3]);
    let mut sources = MatchSources::new(&mut primary).with_custom(&mut custom);
    h.enable(&mut doc, &mut sources).unwrap();

    let order: Vec<(MatchSourceKind, MatchPosition)> =
        h.matches().iter().map(|m| (m.source, m.begin)).collect();
    assert_eq!(
        order,
        vec![
            (MatchSourceKind::Custom, MatchPosition::new(0, 0)),
            (MatchSourceKind::Primary, MatchPosition::new(0, 0)),
            (MatchSourceKind::Primary, MatchPosition::new(0, 4)),
        ]
    );
    assert_eq!(
        doc.inner_html(nodes[0]),
        r#"<span class="customHighlight appended">abc</span>d<span class="highlight appended">ef</span>gh"#
    );
}

#[test]
fn overlapping_matches_never_duplicate_text() {
    let texts = ["abcdef"];
    let (mut doc, layer, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![1], vec![3]);
    let mut custom = TestSource::new(vec![2], vec![3]);
    let mut sources = MatchSources::new(&mut primary).with_custom(&mut custom);
    h.enable(&mut doc, &mut sources).unwrap();

    assert_eq!(
        doc.inner_html(nodes[0]),
        r#"a<span class="highlight appended">bcd</span><span class="customHighlight appended">e</span>f"#
    );
    assert_eq!(doc.text_content(layer), "abcdef");
}

#[test]
fn bare_text_fragments_are_wrapped() {
    let mut doc = Document::new();
    let root = doc.root();
    let layer = doc.create_element("div");
    doc.set_class_name(layer, TEXT_LAYER_CLASS);
    doc.append_child(root, layer);
    let t0 = doc.create_text("Hello ");
    let t1 = doc.create_text("world");
    doc.append_child(layer, t0);
    doc.append_child(layer, t1);

    let mut h = highlighter(&[t0, t1], &["Hello ", "world"]);
    let mut primary = TestSource::new(vec![6], vec![5]);
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();

    let wrapper = h.mapping().unwrap().nodes()[1];
    assert_ne!(wrapper, t1);
    assert_eq!(doc.tag(wrapper), Some("span"));
    assert_eq!(doc.children(layer), &[t0, wrapper]);
    assert_eq!(
        doc.inner_html(wrapper),
        r#"<span class="highlight appended">world</span>"#
    );

    h.reset_matches(&mut doc);
    assert_eq!(doc.inner_html(wrapper), "world");
    assert_eq!(doc.text_content(layer), "Hello world");
}

#[test]
fn painted_highlights_are_announced() {
    let texts = ["Hello ", "world", "!"];
    let (mut doc, _, nodes) = setup(&texts);
    let bus = EventBus::new(16);
    let mut rx = bus.subscribe();
    let mut h = TextHighlighter::new(0, HighlightConfig::default(), bus);
    h.set_text_mapping(nodes, texts.iter().map(|t| t.to_string()).collect());

    let mut primary = TestSource::new(vec![3], vec![4]);
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();

    match rx.try_recv() {
        Ok(Event::RenderedTextLayerHighlights {
            page_index,
            css_class,
            highlights,
        }) => {
            assert_eq!(page_index, 0);
            assert_eq!(css_class, "highlight");
            assert_eq!(highlights.len(), 2);
        }
        other => panic!("unexpected {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Reset and lifecycle
// ---------------------------------------------------------------------------

#[test]
fn reset_is_idempotent() {
    let texts = ["Hello ", "world", "!", "again"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![3, 7, 13], vec![4, 6, 2]);
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();
    assert_ne!(doc.inner_html(nodes[0]), "Hello ");

    h.reset_matches(&mut doc);
    h.reset_matches(&mut doc);
    assert!(h.matches().is_empty());
    for (node, text) in nodes.iter().zip(texts) {
        assert_eq!(doc.inner_html(*node), text);
        assert_eq!(doc.class_name(*node), "");
    }
}

#[test]
fn reset_before_any_paint_is_a_no_op() {
    let texts = ["Hello ", "world"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    h.reset_matches(&mut doc);
    h.reset_matches(&mut doc);
    assert!(h.matches().is_empty());
    for (node, text) in nodes.iter().zip(texts) {
        assert_eq!(doc.inner_html(*node), text);
    }

    let mut unmapped = TextHighlighter::new(0, HighlightConfig::default(), EventBus::new(4));
    unmapped.reset_matches(&mut doc);
    assert!(unmapped.matches().is_empty());
}

#[test]
fn reset_after_successive_updates_restores_every_fragment() {
    let texts = ["Hello ", "world", "!", "again"];
    let joined = texts.concat();
    let (mut doc, layer, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![3], vec![4]);
    let mut custom = TestSource::new(Vec::new(), Vec::new());
    h.enable(&mut doc, &mut MatchSources::new(&mut primary).with_custom(&mut custom))
        .unwrap();
    assert_eq!(doc.text_content(layer), joined);

    // Overlapping matches spanning several fragments, from both sources.
    primary.matches = vec![1, 2];
    primary.lengths = vec![6, 6];
    custom.matches = vec![5];
    custom.lengths = vec![8];
    h.update_matches(&mut doc, &mut MatchSources::new(&mut primary).with_custom(&mut custom));
    assert_eq!(h.matches().len(), 3);
    assert_eq!(doc.text_content(layer), joined);

    primary.matches = vec![10];
    primary.lengths = vec![7];
    custom.matches = vec![0, 11];
    custom.lengths = vec![12, 3];
    h.update_matches(&mut doc, &mut MatchSources::new(&mut primary).with_custom(&mut custom));
    assert_eq!(doc.text_content(layer), joined);

    h.reset_matches(&mut doc);
    h.reset_matches(&mut doc);
    assert!(h.matches().is_empty());
    for (node, text) in nodes.iter().zip(texts) {
        assert_eq!(doc.inner_html(*node), text);
        assert_eq!(doc.class_name(*node), "");
    }
}

#[test]
fn disable_restores_fragments() {
    let texts = ["ab", "cd", "ef"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![1], vec![4]);
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();
    h.disable(&mut doc);
    assert!(!h.is_enabled());
    for (node, text) in nodes.iter().zip(texts) {
        assert_eq!(doc.inner_html(*node), text);
        assert_eq!(doc.class_name(*node), "");
    }

    // Safe when already disabled.
    h.disable(&mut doc);
    assert!(!h.is_enabled());
}

#[test]
fn enable_requires_mapping_and_is_not_reentrant() {
    let mut doc = Document::new();
    let mut primary = NoMatches;

    let mut h = TextHighlighter::new(0, HighlightConfig::default(), EventBus::new(4));
    assert!(matches!(
        h.enable(&mut doc, &mut MatchSources::new(&mut primary)),
        Err(TextLayerError::NotMapped)
    ));

    h.set_text_mapping(Vec::new(), Vec::new());
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();
    assert!(matches!(
        h.enable(&mut doc, &mut MatchSources::new(&mut primary)),
        Err(TextLayerError::AlreadyEnabled(_))
    ));
}

#[test]
fn update_events_are_filtered_by_page() {
    let texts = ["abc"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(Vec::new(), Vec::new());
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();
    assert!(h.matches().is_empty());

    primary.matches = vec![0];
    primary.lengths = vec![2];
    h.handle_event(
        &mut doc,
        &Event::UpdateTextLayerMatches {
            page_index: Some(3),
        },
        &mut MatchSources::new(&mut primary),
    );
    assert!(h.matches().is_empty());

    h.handle_event(
        &mut doc,
        &Event::UpdateTextLayerMatches {
            page_index: Some(0),
        },
        &mut MatchSources::new(&mut primary),
    );
    assert_eq!(h.matches().len(), 1);

    primary.matches = vec![1];
    h.handle_event(
        &mut doc,
        &Event::UpdateTextLayerMatches { page_index: None },
        &mut MatchSources::new(&mut primary),
    );
    assert_eq!(h.matches()[0].begin, MatchPosition::new(0, 1));
    assert_eq!(
        doc.inner_html(nodes[0]),
        r#"a<span class="highlight appended">bc</span>"#
    );
}

#[test]
fn updates_are_ignored_while_disabled() {
    let texts = ["abc"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![0], vec![1]);
    h.update_matches(&mut doc, &mut MatchSources::new(&mut primary));
    assert!(h.matches().is_empty());
    assert_eq!(doc.inner_html(nodes[0]), "abc");
}

// ---------------------------------------------------------------------------
// Selection arbitration and mapping shape
// ---------------------------------------------------------------------------

#[test]
fn primary_selection_wins_over_custom() {
    let texts = ["Hello ", "world"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![0], vec![5]);
    primary.selected = Some(SelectedMatch {
        page_index: 0,
        match_index: 0,
    });
    let mut custom = TestSource::new(vec![6], vec![5]);
    custom.selected = primary.selected;
    {
        let mut sources = MatchSources::new(&mut primary).with_custom(&mut custom);
        h.enable(&mut doc, &mut sources).unwrap();
    }

    assert_eq!(h.matches().iter().filter(|m| m.selected).count(), 1);
    assert_eq!(primary.scrolls.len(), 1);
    assert!(custom.scrolls.is_empty());
    assert_eq!(
        doc.inner_html(nodes[0]),
        r#"<span class="highlight selected appended">Hello</span> "#
    );
    assert_eq!(
        doc.inner_html(nodes[1]),
        r#"<span class="customHighlight appended">world</span>"#
    );
}

#[test]
fn custom_selection_kept_when_primary_selects_elsewhere() {
    let texts = ["Hello ", "world"];
    let (mut doc, _, nodes) = setup(&texts);
    let mut h = highlighter(&nodes, &texts);

    let mut primary = TestSource::new(vec![0], vec![5]);
    primary.selected = Some(SelectedMatch {
        page_index: 2,
        match_index: 0,
    });
    let mut custom = TestSource::new(vec![6], vec![5]);
    custom.selected = Some(SelectedMatch {
        page_index: 0,
        match_index: 0,
    });
    {
        let mut sources = MatchSources::new(&mut primary).with_custom(&mut custom);
        h.enable(&mut doc, &mut sources).unwrap();
    }

    let selected: Vec<MatchSourceKind> = h
        .matches()
        .iter()
        .filter(|m| m.selected)
        .map(|m| m.source)
        .collect();
    assert_eq!(selected, vec![MatchSourceKind::Custom]);
    assert!(primary.scrolls.is_empty());
    assert_eq!(custom.scrolls.len(), 1);
}

#[test]
fn mismatched_mapping_is_truncated_to_the_shorter_side() {
    let texts = ["Hello ", "world"];
    let (mut doc, _, nodes) = setup(&texts);

    let mut h = TextHighlighter::new(0, HighlightConfig::default(), EventBus::new(4));
    h.set_text_mapping(
        vec![nodes[0]],
        texts.iter().map(|t| t.to_string()).collect(),
    );
    assert_eq!(h.mapping().unwrap().len(), 1);
    assert_eq!(h.mapping().unwrap().texts(), &["Hello ".to_string()]);
    assert_eq!(h.mapping().unwrap().total_len(), 6);

    // Offset 7 lies in the dropped fragment and is discarded, not painted.
    let mut primary = TestSource::new(vec![4, 7], vec![1, 2]);
    h.enable(&mut doc, &mut MatchSources::new(&mut primary)).unwrap();
    assert_eq!(h.matches().len(), 1);
    assert_eq!(
        doc.inner_html(nodes[0]),
        r#"Hell<span class="highlight appended">o</span> "#
    );
    assert_eq!(doc.inner_html(nodes[1]), "world");

    let mut longer = TextHighlighter::new(0, HighlightConfig::default(), EventBus::new(4));
    longer.set_text_mapping(nodes.clone(), vec!["Hello ".to_string()]);
    assert_eq!(longer.mapping().unwrap().nodes(), &nodes[..1]);
}
