//! Search-match highlighting over a page's text-layer fragments.
//!
//! Find controllers report matches as offsets into the concatenation of all
//! fragment texts of a page. [`TextHighlighter`] maps those offsets back onto
//! the fragment sequence and splits fragment nodes so that each match is
//! wrapped in a highlight span. Matches from a secondary ("custom") source
//! and the primary source are merged and painted in one pass.

mod convert;
mod highlighter;
mod paint;
mod source;
mod types;

#[cfg(test)]
mod tests;

pub use highlighter::{TextHighlighter, TextMapping};
pub use source::{MatchSource, MatchSources, NoMatches};
pub use types::{Match, MatchPosition, MatchSourceKind, ScrollRequest, SelectedMatch};
