//! Reading-order index over text fragments and ownership links from
//! overlay elements (annotations, editors) into the text flow.

mod compare;
mod manager;

pub use compare::{binary_search_first_item, stable_sort_by, visual_compare};
pub use manager::TextAccessibilityManager;
