//! Minimal node arena standing in for the browser document.
//!
//! Text-layer fragments, highlight spans and overlay elements all live in a
//! `Document` and are addressed by `NodeId` handles. Layout is external:
//! bounding boxes are assigned by whoever positions the nodes.

mod html;
mod tree;
mod types;

pub use lectern_common::NodeId;
pub use tree::Document;
pub use types::{ElementData, NodeKind};

/// Slice `text` by Unicode scalar offsets. `to = None` runs to the end;
/// out-of-range offsets are clamped and an inverted range yields "".
pub fn char_slice(text: &str, from: usize, to: Option<usize>) -> &str {
    let byte_at = |offset: usize| {
        text.char_indices()
            .nth(offset)
            .map_or(text.len(), |(byte, _)| byte)
    };
    let start = byte_at(from);
    let end = to.map_or(text.len(), byte_at);
    if start >= end {
        return "";
    }
    &text[start..end]
}
