//! Selection bookkeeping shared by every live text layer.

use std::collections::BTreeMap;

use lectern_common::{NodeId, Rect};
use tracing::debug;

use crate::dom::Document;

use super::TEXT_LAYER_CLASS;

const ACTIVE_CLASS: &str = "active";

/// Live text layers and their end-of-content markers.
///
/// The selection listener is considered installed while at least one layer
/// is registered. One registry serves every page; pass it by reference to
/// each [`super::TextLayerBuilder`].
#[derive(Debug, Default)]
pub struct TextLayerRegistry {
    layers: BTreeMap<NodeId, NodeId>,
    listening: bool,
}

impl TextLayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, layer: NodeId, end_of_content: NodeId) {
        self.layers.insert(layer, end_of_content);
        if !self.listening {
            self.listening = true;
            debug!("selection listener installed");
        }
    }

    pub fn unregister(&mut self, layer: NodeId) {
        self.layers.remove(&layer);
        if self.layers.is_empty() && self.listening {
            self.listening = false;
            debug!("selection listener removed");
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn end_of_content(&self, layer: NodeId) -> Option<NodeId> {
        self.layers.get(&layer).copied()
    }

    /// A press inside `layer` starts a selection there.
    pub fn on_pointer_down(&self, doc: &mut Document, layer: NodeId) {
        if let Some(&end) = self.layers.get(&layer) {
            doc.add_class(end, ACTIVE_CLASS);
        }
    }

    pub fn on_pointer_up(&self, doc: &mut Document) {
        for (&layer, &end) in &self.layers {
            reset(doc, layer, end);
        }
    }

    /// Mark the end markers of layers touched by the selection active and
    /// reset every other one. An empty slice means nothing is selected.
    pub fn on_selection_change(&self, doc: &mut Document, active_layers: &[NodeId]) {
        for (&layer, &end) in &self.layers {
            if active_layers.contains(&layer) {
                doc.add_class(end, ACTIVE_CLASS);
            } else {
                reset(doc, layer, end);
            }
        }
    }

    /// Move the end marker of the layer containing `anchor` next to it, so a
    /// selection dragged over empty space grows by at most one span.
    ///
    /// The marker goes before the anchor when the selection start is being
    /// modified and after it otherwise. Returns `false` when `anchor` is not
    /// inside a registered layer.
    pub fn move_end_near(&self, doc: &mut Document, anchor: NodeId, modify_start: bool) -> bool {
        let anchor = if doc.is_text(anchor) {
            match doc.parent(anchor) {
                Some(parent) => parent,
                None => return false,
            }
        } else {
            anchor
        };
        let Some(layer) = doc
            .parent(anchor)
            .and_then(|parent| doc.closest_with_class(parent, TEXT_LAYER_CLASS))
        else {
            return false;
        };
        let Some(&end) = self.layers.get(&layer) else {
            return false;
        };

        let layer_rect = doc.bounding_rect(layer);
        doc.set_rect(end, Rect::new(0.0, 0.0, layer_rect.width, layer_rect.height));
        if modify_start {
            doc.insert_before(anchor, end)
        } else {
            doc.insert_after(anchor, end)
        }
    }
}

fn reset(doc: &mut Document, layer: NodeId, end: NodeId) {
    doc.append_child(layer, end);
    doc.set_rect(end, Rect::default());
    doc.remove_class(end, ACTIVE_CLASS);
}
