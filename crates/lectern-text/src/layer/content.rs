//! Extracted page text as delivered by the rendering side.

use lectern_common::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextItem {
    /// One run of text with its laid-out box.
    Text { text: String, rect: Rect },
    /// Opens a semantic group; items until the matching end nest inside it.
    BeginMarkedContent { id: Option<String> },
    EndMarkedContent,
}

/// Ordered text items of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub items: Vec<TextItem>,
}

impl TextContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out `lines` top to bottom as one fragment per line with a
    /// monospace box of `char_width` by `line_height` per character.
    pub fn from_lines<I, S>(lines: I, char_width: f64, line_height: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut content = Self::new();
        for (row, line) in lines.into_iter().enumerate() {
            let text: String = line.into();
            let width = text.chars().count() as f64 * char_width;
            let rect = Rect::new(0.0, row as f64 * line_height, width, line_height);
            content.push_text(text, rect);
        }
        content
    }

    pub fn push_text(&mut self, text: impl Into<String>, rect: Rect) -> &mut Self {
        self.items.push(TextItem::Text {
            text: text.into(),
            rect,
        });
        self
    }

    pub fn begin_marked_content(&mut self, id: Option<&str>) -> &mut Self {
        self.items.push(TextItem::BeginMarkedContent {
            id: id.map(str::to_string),
        });
        self
    }

    pub fn end_marked_content(&mut self) -> &mut Self {
        self.items.push(TextItem::EndMarkedContent);
        self
    }

    /// Text of every fragment, in order.
    pub fn strings(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| match item {
                TextItem::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Box from the page origin to the furthest text edge.
    pub fn extent(&self) -> Rect {
        let (width, height) = self
            .items
            .iter()
            .filter_map(|item| match item {
                TextItem::Text { rect, .. } => Some(rect),
                _ => None,
            })
            .fold((0.0f64, 0.0f64), |(w, h), r| {
                (w.max(r.x + r.width), h.max(r.bottom()))
            });
        Rect::new(0.0, 0.0, width, height)
    }

    /// Number of text fragments.
    pub fn fragment_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, TextItem::Text { .. }))
            .count()
    }
}
