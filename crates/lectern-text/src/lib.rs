//! Text-layer engine: search-match highlighting over fragmented page text
//! and visual reading-order linkage for overlay elements.

pub mod accessibility;
pub mod dom;
pub mod find;
pub mod highlight;
pub mod layer;

pub use accessibility::TextAccessibilityManager;
pub use dom::Document;
pub use find::{FindController, FindOptions};
pub use highlight::{Match, MatchPosition, MatchSource, MatchSources, TextHighlighter};
pub use layer::{TextContent, TextLayerBuilder, TextLayerRegistry};
