//! Text layer lifecycle: fragment rendering, visibility toggling and the
//! selection registry shared across pages.

mod builder;
mod content;
mod registry;

pub use builder::TextLayerBuilder;
pub use content::{TextContent, TextItem};
pub use registry::TextLayerRegistry;

/// Class of the element holding a page's fragment spans.
pub const TEXT_LAYER_CLASS: &str = "textLayer";
/// Class of the trailing marker that bounds selection growth.
pub const END_OF_CONTENT_CLASS: &str = "endOfContent";
pub const MARKED_CONTENT_CLASS: &str = "markedContent";
