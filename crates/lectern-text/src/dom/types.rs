//! Node types for the document arena.

use std::collections::BTreeMap;

use lectern_common::{NodeId, Rect};

/// Element payload. `id` and `class_name` are kept out of `attributes`
/// because both are read on every highlight and link pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementData {
    pub tag: String,
    pub id: Option<String>,
    pub class_name: String,
    pub attributes: BTreeMap<String, String>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Text(String),
    Element(ElementData),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Bounding box as reported by the layout collaborator.
    pub rect: Rect,
}

impl NodeData {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            rect: Rect::default(),
        }
    }

    pub fn element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }
}
