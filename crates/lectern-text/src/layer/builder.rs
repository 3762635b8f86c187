//! Per-page text layer: renders fragments and drives the highlighter and the
//! accessibility manager through the render lifecycle.

use lectern_common::{Event, EventBus, NodeId, TextLayerError};
use tracing::debug;

use crate::accessibility::TextAccessibilityManager;
use crate::dom::Document;
use crate::highlight::{MatchSources, TextHighlighter};

use super::content::{TextContent, TextItem};
use super::registry::TextLayerRegistry;
use super::{END_OF_CONTENT_CLASS, MARKED_CONTENT_CLASS, TEXT_LAYER_CLASS};

pub struct TextLayerBuilder {
    page_index: usize,
    highlighter: Option<TextHighlighter>,
    accessibility: Option<TextAccessibilityManager>,
    events: EventBus,
    div: Option<NodeId>,
    end_of_content: Option<NodeId>,
    fragments: Vec<NodeId>,
    rendering_done: bool,
}

impl TextLayerBuilder {
    pub fn new(
        page_index: usize,
        highlighter: Option<TextHighlighter>,
        accessibility: Option<TextAccessibilityManager>,
    ) -> Self {
        Self {
            page_index,
            highlighter,
            accessibility,
            events: EventBus::default(),
            div: None,
            end_of_content: None,
            fragments: Vec::new(),
            rendering_done: false,
        }
    }

    /// Publish render notifications on `events` instead of a private bus.
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// The `textLayer` element, once rendered.
    pub fn div(&self) -> Option<NodeId> {
        self.div
    }

    pub fn end_of_content(&self) -> Option<NodeId> {
        self.end_of_content
    }

    /// Fragment spans in text order.
    pub fn fragments(&self) -> &[NodeId] {
        &self.fragments
    }

    pub fn is_rendered(&self) -> bool {
        self.rendering_done
    }

    pub fn highlighter(&self) -> Option<&TextHighlighter> {
        self.highlighter.as_ref()
    }

    pub fn highlighter_mut(&mut self) -> Option<&mut TextHighlighter> {
        self.highlighter.as_mut()
    }

    pub fn accessibility(&self) -> Option<&TextAccessibilityManager> {
        self.accessibility.as_ref()
    }

    pub fn accessibility_mut(&mut self) -> Option<&mut TextAccessibilityManager> {
        self.accessibility.as_mut()
    }

    /// Render `content` into a `textLayer` div under `container`.
    ///
    /// Once a render has completed, further calls only hide and re-show the
    /// existing layer. Otherwise any previous state is cancelled, one span is
    /// created per text item, the mapping is handed to both components, the
    /// end-of-content marker is appended and registered, and the highlighter
    /// then the accessibility manager are enabled.
    pub fn render(
        &mut self,
        doc: &mut Document,
        container: NodeId,
        content: &TextContent,
        registry: &mut TextLayerRegistry,
        sources: &mut MatchSources<'_>,
    ) -> Result<(), TextLayerError> {
        if self.rendering_done && self.div.is_some() {
            self.hide(doc);
            return self.show(doc, sources);
        }

        self.cancel(doc, registry);

        let div = match self.div {
            Some(div) => {
                doc.set_text_content(div, "");
                div
            }
            None => {
                let div = doc.create_element("div");
                doc.set_class_name(div, TEXT_LAYER_CLASS);
                self.div = Some(div);
                div
            }
        };
        doc.set_hidden(div, false);
        doc.set_rect(div, content.extent());

        let (nodes, texts) = self.build_fragments(doc, div, content);
        if let Some(highlighter) = self.highlighter.as_mut() {
            highlighter.set_text_mapping(nodes.clone(), texts);
        }
        if let Some(accessibility) = self.accessibility.as_mut() {
            accessibility.set_text_mapping(nodes.clone());
        }
        self.fragments = nodes;
        self.rendering_done = true;

        let end = doc.create_element("div");
        doc.set_class_name(end, END_OF_CONTENT_CLASS);
        doc.append_child(div, end);
        self.end_of_content = Some(end);
        registry.register(div, end);

        // Attach before enabling so pending work sees a connected layer.
        doc.append_child(container, div);
        if let Some(highlighter) = self.highlighter.as_mut() {
            highlighter.enable(doc, sources)?;
        }
        if let Some(accessibility) = self.accessibility.as_mut() {
            accessibility.enable(doc)?;
        }

        debug!(
            page = self.page_index,
            fragments = self.fragments.len(),
            "text layer rendered"
        );
        self.events.publish(Event::TextLayerRendered {
            page_index: self.page_index,
            fragments: self.fragments.len(),
        });
        Ok(())
    }

    /// Hide the layer and stop highlighting so nothing hidden is scrolled to.
    pub fn hide(&mut self, doc: &mut Document) {
        let Some(div) = self.div else {
            return;
        };
        if !self.rendering_done || doc.is_hidden(div) {
            return;
        }
        if let Some(highlighter) = self.highlighter.as_mut() {
            highlighter.disable(doc);
        }
        doc.set_hidden(div, true);
    }

    pub fn show(
        &mut self,
        doc: &mut Document,
        sources: &mut MatchSources<'_>,
    ) -> Result<(), TextLayerError> {
        let Some(div) = self.div else {
            return Ok(());
        };
        if !self.rendering_done || !doc.is_hidden(div) {
            return Ok(());
        }
        doc.set_hidden(div, false);
        match self.highlighter.as_mut() {
            Some(highlighter) => highlighter.enable(doc, sources),
            None => Ok(()),
        }
    }

    /// Tear down: disable both components and leave the registry.
    pub fn cancel(&mut self, doc: &mut Document, registry: &mut TextLayerRegistry) {
        if let Some(highlighter) = self.highlighter.as_mut() {
            highlighter.disable(doc);
        }
        if let Some(accessibility) = self.accessibility.as_mut() {
            accessibility.disable();
        }
        if let Some(div) = self.div {
            registry.unregister(div);
        }
        self.rendering_done = false;
    }

    /// Route bus events to the highlighter.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event, sources: &mut MatchSources<'_>) {
        if let Some(highlighter) = self.highlighter.as_mut() {
            highlighter.handle_event(doc, event, sources);
        }
    }

    fn build_fragments(
        &self,
        doc: &mut Document,
        div: NodeId,
        content: &TextContent,
    ) -> (Vec<NodeId>, Vec<String>) {
        let marked_class = self
            .accessibility
            .as_ref()
            .map_or(MARKED_CONTENT_CLASS, |a| a.marked_content_class());

        let mut parents = vec![div];
        let mut nodes = Vec::new();
        let mut texts = Vec::new();
        for item in &content.items {
            let parent = parents.last().copied().unwrap_or(div);
            match item {
                TextItem::Text { text, rect } => {
                    let span = doc.create_element("span");
                    doc.set_text_content(span, text);
                    doc.set_rect(span, *rect);
                    doc.append_child(parent, span);
                    nodes.push(span);
                    texts.push(text.clone());
                }
                TextItem::BeginMarkedContent { id } => {
                    let group = doc.create_element("span");
                    doc.set_class_name(group, marked_class);
                    if let Some(id) = id {
                        doc.set_element_id(group, id);
                    }
                    doc.append_child(parent, group);
                    parents.push(group);
                }
                TextItem::EndMarkedContent => {
                    if parents.len() > 1 {
                        parents.pop();
                    }
                }
            }
        }
        (nodes, texts)
    }
}
