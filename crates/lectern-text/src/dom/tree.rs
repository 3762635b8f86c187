//! Document arena: node creation, tree mutation and queries.

use lectern_common::{NodeId, Rect};

use super::types::{ElementData, NodeData, NodeKind};

/// Arena of text and element nodes rooted at a `body` element.
///
/// Nodes are never freed; a removed node simply loses its parent. Handles
/// therefore stay valid for the lifetime of the document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let body = NodeData::new(NodeKind::Element(ElementData {
            tag: "body".into(),
            ..ElementData::default()
        }));
        Document {
            nodes: vec![body],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData {
            tag: tag.to_string(),
            ..ElementData::default()
        }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(kind));
        id
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Text(_))
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).element().map(|e| e.tag.as_str())
    }

    // -----------------------------------------------------------------------
    // Tree structure
    // -----------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.node(id).children.is_empty()
    }

    /// Remove `id` from its parent's child list. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != id);
        }
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Move `node` directly before `reference`. Returns `false` when the
    /// reference has no parent.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> bool {
        self.insert_relative(reference, node, 0)
    }

    /// Move `node` directly after `reference`. Returns `false` when the
    /// reference has no parent.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> bool {
        self.insert_relative(reference, node, 1)
    }

    fn insert_relative(&mut self, reference: NodeId, node: NodeId, shift: usize) -> bool {
        if reference == node {
            return false;
        }
        let Some(parent) = self.node(reference).parent else {
            return false;
        };
        self.detach(node);
        let siblings = &mut self.node_mut(parent).children;
        let pos = siblings
            .iter()
            .position(|&c| c == reference)
            .map_or(siblings.len(), |p| p + shift);
        siblings.insert(pos, node);
        self.node_mut(node).parent = Some(parent);
        true
    }

    /// Put a new `tag` element in `node`'s place and move `node` inside it.
    ///
    /// The wrapper inherits the node's bounding box.
    pub fn wrap_in(&mut self, node: NodeId, tag: &str) -> NodeId {
        let wrapper = self.create_element(tag);
        self.node_mut(wrapper).rect = self.node(node).rect;
        self.insert_before(node, wrapper);
        self.append_child(wrapper, node);
        wrapper
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            if n == self.root {
                return true;
            }
            current = self.node(n).parent;
        }
        false
    }

    /// Pre-order descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id).children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.node(n).children.iter().rev().copied());
        }
        out
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    /// Concatenated text of `id` and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        match &self.node(id).kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element(_) => {
                let mut out = String::new();
                for n in self.descendants(id) {
                    if let NodeKind::Text(text) = &self.node(n).kind {
                        out.push_str(text);
                    }
                }
                out
            }
        }
    }

    /// Replace the data of a text node, or all children of an element with a
    /// single text node (none when `text` is empty).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if let NodeKind::Text(data) = &mut self.node_mut(id).kind {
            *data = text.to_string();
            return;
        }
        for child in std::mem::take(&mut self.node_mut(id).children) {
            self.node_mut(child).parent = None;
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }

    // -----------------------------------------------------------------------
    // Classes and attributes
    // -----------------------------------------------------------------------

    /// Class attribute of an element; empty for text nodes.
    pub fn class_name(&self, id: NodeId) -> &str {
        self.node(id)
            .element()
            .map_or("", |e| e.class_name.as_str())
    }

    /// Set the class attribute. Ignored on text nodes.
    pub fn set_class_name(&mut self, id: NodeId, class_name: &str) {
        if let Some(e) = self.node_mut(id).element_mut() {
            e.class_name = class_name.to_string();
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_name(id).split_whitespace().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        if let Some(e) = self.node_mut(id).element_mut() {
            if !e.class_name.is_empty() {
                e.class_name.push(' ');
            }
            e.class_name.push_str(class);
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.node_mut(id).element_mut() {
            e.class_name = e
                .class_name
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .element()
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(e) = self.node_mut(id).element_mut() {
            e.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(e) = self.node_mut(id).element_mut() {
            e.attributes.remove(name);
        }
    }

    /// Element id, `None` when unset or empty.
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .element()
            .and_then(|e| e.id.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn set_element_id(&mut self, id: NodeId, element_id: &str) {
        if let Some(e) = self.node_mut(id).element_mut() {
            e.id = Some(element_id.to_string());
        }
    }

    /// First connected element carrying `element_id`, in document order.
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&n| self.element_id(n) == Some(element_id))
    }

    /// Nearest inclusive ancestor carrying `class`.
    pub fn closest_with_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(n) = current {
            if self.has_class(n, class) {
                return Some(n);
            }
            current = self.node(n).parent;
        }
        None
    }

    /// Descendants of `id` (excluding `id`) carrying `class`, in document order.
    pub fn descendants_with_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.node(id).element().is_some_and(|e| e.hidden)
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(e) = self.node_mut(id).element_mut() {
            e.hidden = hidden;
        }
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    pub fn bounding_rect(&self, id: NodeId) -> Rect {
        self.node(id).rect
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        self.node_mut(id).rect = rect;
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}
