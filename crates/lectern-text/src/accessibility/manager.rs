//! Links overlay elements to the nearest text fragment in reading order.

use std::collections::BTreeMap;

use lectern_common::{NodeId, TextLayerError};
use lectern_config::schema::AccessibilityConfig;
use tracing::{debug, trace};

use crate::dom::Document;

use super::compare::{binary_search_first_item, stable_sort_by, visual_compare};

const PRESENTATION_ROLE: &str = "presentation";

/// Keeps a page's fragments in visual order and records, on the fragment
/// preceding each overlay element, an ownership link to that element.
pub struct TextAccessibilityManager {
    owns_attribute: String,
    marked_content_class: String,
    enabled: bool,
    /// Fragments in text order, as registered.
    text_children: Option<Vec<NodeId>>,
    /// Fragments in visual order; rebuilt on every enable.
    sorted: Vec<NodeId>,
    /// Element id to index in `sorted`. Survives disable so links can be
    /// restored on the next enable.
    text_nodes: BTreeMap<String, usize>,
    /// Link requests made while disabled, in arrival order.
    waiting: Vec<(NodeId, bool)>,
}

impl TextAccessibilityManager {
    pub fn new(config: &AccessibilityConfig) -> Self {
        Self {
            owns_attribute: config.owns_attribute.clone(),
            marked_content_class: config.marked_content_class.clone(),
            enabled: false,
            text_children: None,
            sorted: Vec::new(),
            text_nodes: BTreeMap::new(),
            waiting: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn marked_content_class(&self) -> &str {
        &self.marked_content_class
    }

    pub fn set_text_mapping(&mut self, nodes: Vec<NodeId>) {
        self.text_children = Some(nodes);
    }

    /// Fragments in visual order. Empty while disabled.
    pub fn sorted(&self) -> &[NodeId] {
        &self.sorted
    }

    /// Sorted-fragment index an element id is currently linked to.
    pub fn linked_index(&self, element_id: &str) -> Option<usize> {
        self.text_nodes.get(element_id).copied()
    }

    /// Number of link requests waiting for the next enable.
    pub fn pending_count(&self) -> usize {
        self.waiting.len()
    }

    /// Sort the fragments, restore links made before a previous disable and
    /// flush queued link requests in arrival order.
    pub fn enable(&mut self, doc: &mut Document) -> Result<(), TextLayerError> {
        if self.enabled {
            return Err(TextLayerError::AlreadyEnabled("TextAccessibilityManager"));
        }
        let Some(children) = self.text_children.as_ref() else {
            return Err(TextLayerError::NotMapped);
        };

        self.enabled = true;
        let mut sorted = children.clone();
        stable_sort_by(&mut sorted, |a, b| {
            visual_compare(&doc.bounding_rect(*a), &doc.bounding_rect(*b))
        });
        self.sorted = sorted;

        if !self.text_nodes.is_empty() {
            let previous = std::mem::take(&mut self.text_nodes);
            for (id, index) in previous {
                let Some(&fragment) = self.sorted.get(index) else {
                    continue;
                };
                if doc.get_element_by_id(&id).is_none() {
                    trace!(id = %id, "dropping link to removed element");
                    continue;
                }
                self.add_owned_id(doc, &id, fragment);
                self.text_nodes.insert(id, index);
            }
        }

        let waiting = std::mem::take(&mut self.waiting);
        debug!(
            fragments = self.sorted.len(),
            restored = self.text_nodes.len(),
            queued = waiting.len(),
            "accessibility manager enabled"
        );
        for (element, is_removable) in waiting {
            self.link_element(doc, element, is_removable);
        }
        Ok(())
    }

    /// Stop linking. Recorded links are kept for the next enable.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.waiting.clear();
        self.sorted.clear();
        self.enabled = false;
        debug!("accessibility manager disabled");
    }

    /// Link `element` to the fragment immediately preceding it in reading
    /// order (or the first fragment).
    ///
    /// Returns the id of the marked-content group containing that fragment.
    /// Elements without an id are ignored. While disabled the request is
    /// queued; a repeated request for the same element replaces its flag.
    pub fn link_element(
        &mut self,
        doc: &mut Document,
        element: NodeId,
        is_removable: bool,
    ) -> Option<String> {
        let id = doc.element_id(element)?.to_string();

        if !self.enabled {
            match self.waiting.iter_mut().find(|(e, _)| *e == element) {
                Some(entry) => entry.1 = is_removable,
                None => self.waiting.push((element, is_removable)),
            }
            return None;
        }

        if is_removable {
            self.unlink_element(doc, element);
        }
        if self.sorted.is_empty() {
            return None;
        }

        let rect = doc.bounding_rect(element);
        let index = binary_search_first_item(&self.sorted, |&node| {
            visual_compare(&rect, &doc.bounding_rect(node)).is_lt()
        });
        let node_index = index.saturating_sub(1);
        let fragment = self.sorted[node_index];
        self.add_owned_id(doc, &id, fragment);
        self.text_nodes.insert(id.clone(), node_index);
        trace!(id = %id, node_index, "linked element");

        let parent = doc.parent(fragment)?;
        if doc.has_class(parent, &self.marked_content_class) {
            doc.element_id(parent).map(str::to_string)
        } else {
            None
        }
    }

    /// Remove `element`'s link. A fragment left owning nothing is marked
    /// presentational. While disabled this only drops a queued request.
    pub fn unlink_element(&mut self, doc: &mut Document, element: NodeId) {
        if !self.enabled {
            self.waiting.retain(|(e, _)| *e != element);
            return;
        }
        let Some(id) = doc.element_id(element).map(str::to_string) else {
            return;
        };
        let Some(node_index) = self.text_nodes.remove(&id) else {
            return;
        };
        let Some(&fragment) = self.sorted.get(node_index) else {
            return;
        };

        let Some(owns) = doc.attribute(fragment, &self.owns_attribute) else {
            return;
        };
        if !owns.split_whitespace().any(|token| token == id) {
            return;
        }
        let remaining = owns
            .split_whitespace()
            .filter(|token| *token != id)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            doc.remove_attribute(fragment, &self.owns_attribute);
            doc.set_attribute(fragment, "role", PRESENTATION_ROLE);
        } else {
            doc.set_attribute(fragment, &self.owns_attribute, &remaining);
        }
    }

    /// Link `reference` (or `element`) and move `element` among the other
    /// children of `container` so it sits in reading order.
    ///
    /// Only `element` moves; the container's other children keep their
    /// relative order.
    pub fn reposition(
        &mut self,
        doc: &mut Document,
        container: NodeId,
        element: NodeId,
        reference: Option<NodeId>,
        is_removable: bool,
    ) -> Option<String> {
        let target = reference.unwrap_or(element);
        let group = self.link_element(doc, target, is_removable);

        if !doc.has_children(container) {
            doc.append_child(container, element);
            return group;
        }

        let siblings: Vec<NodeId> = doc
            .children(container)
            .iter()
            .copied()
            .filter(|&n| n != element)
            .collect();
        if siblings.is_empty() {
            return group;
        }

        let rect = doc.bounding_rect(target);
        let index = binary_search_first_item(&siblings, |&node| {
            visual_compare(&rect, &doc.bounding_rect(node)).is_lt()
        });
        if index == 0 {
            doc.insert_before(siblings[0], element);
        } else {
            doc.insert_after(siblings[index - 1], element);
        }
        group
    }

    fn add_owned_id(&self, doc: &mut Document, id: &str, fragment: NodeId) {
        let owns = doc.attribute(fragment, &self.owns_attribute).unwrap_or("");
        if !owns.split_whitespace().any(|token| token == id) {
            let value = if owns.is_empty() {
                id.to_string()
            } else {
                format!("{owns} {id}")
            };
            doc.set_attribute(fragment, &self.owns_attribute, &value);
        }
        doc.remove_attribute(fragment, "role");
    }
}
