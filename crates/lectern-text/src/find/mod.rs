//! Page text search -- the match source that drives highlighting.
//!
//! Supports both literal string matching and regex-based search.

mod engine;
mod types;

pub use engine::*;
pub use types::*;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
