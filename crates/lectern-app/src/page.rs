//! Single-page pipeline: lay out lines, search, render the text layer.

use std::path::Path;

use lectern_common::{EventBus, LecternError};
use lectern_config::LecternConfig;
use lectern_text::highlight::MatchSources;
use lectern_text::layer::TextLayerRegistry;
use lectern_text::{
    Document, FindController, FindOptions, TextAccessibilityManager, TextContent,
    TextHighlighter, TextLayerBuilder,
};
use tracing::{info, warn};

const CHAR_WIDTH: f64 = 8.0;
const LINE_HEIGHT: f64 = 16.0;

#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub query: String,
    pub custom: Option<String>,
    pub use_regex: bool,
    pub case_sensitive: bool,
    pub select: Option<usize>,
}

#[derive(Debug)]
pub struct RenderedPage {
    pub html: String,
    pub matches: usize,
    pub custom_matches: usize,
}

pub fn read_lines(path: &Path) -> Result<Vec<String>, LecternError> {
    let text = std::fs::read_to_string(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

pub fn render_page(
    config: &LecternConfig,
    lines: &[String],
    request: &PageRequest,
) -> Result<RenderedPage, LecternError> {
    let content = TextContent::from_lines(lines.iter().cloned(), CHAR_WIDTH, LINE_HEIGHT);

    let mut doc = Document::new();
    let root = doc.root();
    let container = doc.create_element("div");
    doc.set_class_name(container, "page");
    doc.set_attribute(container, "data-page-number", "1");
    doc.append_child(root, container);

    let options = FindOptions {
        case_sensitive: request.case_sensitive || config.find.case_sensitive,
        use_regex: request.use_regex || config.find.use_regex,
        highlight_all: config.find.highlight_all,
    };

    let mut primary = FindController::new("primary");
    primary.set_page_texts(vec![content.strings()]);
    let matches = primary.search(&request.query, options)?;
    if let Some(n) = request.select {
        if primary.select(n).is_none() {
            warn!(select = n, matches, "selected match out of range, keeping the first");
        }
    }

    let mut custom = match request.custom.as_deref() {
        Some(query) => {
            let mut find = FindController::new("custom");
            find.set_page_texts(vec![content.strings()]);
            find.search(query, options)?;
            // Only the primary search owns the focused match.
            find.clear_selection();
            Some(find)
        }
        None => None,
    };
    let custom_matches = custom.as_ref().map_or(0, FindController::match_count);

    let events = EventBus::default();
    let highlighter = TextHighlighter::new(0, config.highlight.clone(), events.clone());
    let accessibility = config
        .accessibility
        .enabled
        .then(|| TextAccessibilityManager::new(&config.accessibility));
    let mut layer = TextLayerBuilder::new(0, Some(highlighter), accessibility).with_events(events);
    let mut registry = TextLayerRegistry::new();

    let mut sources = MatchSources::new(&mut primary);
    if let Some(find) = custom.as_mut() {
        sources = sources.with_custom(find);
    }
    layer.render(&mut doc, container, &content, &mut registry, &mut sources)?;

    info!(
        fragments = layer.fragments().len(),
        matches,
        custom_matches,
        "page rendered"
    );
    Ok(RenderedPage {
        html: doc.to_html(container),
        matches,
        custom_matches,
    })
}
