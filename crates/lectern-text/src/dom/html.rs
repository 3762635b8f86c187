//! HTML serialization of a subtree, used for inspection and output.

use lectern_common::NodeId;

use super::tree::Document;
use super::types::NodeKind;

impl Document {
    /// Serialize `id` and its subtree as HTML.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    /// Serialize only the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let element = match self.kind(id) {
            NodeKind::Text(text) => {
                escape_into(text, false, out);
                return;
            }
            NodeKind::Element(element) => element,
        };

        out.push('<');
        out.push_str(&element.tag);
        if let Some(element_id) = element.id.as_deref().filter(|s| !s.is_empty()) {
            push_attr(out, "id", element_id);
        }
        if !element.class_name.is_empty() {
            push_attr(out, "class", &element.class_name);
        }
        for (name, value) in &element.attributes {
            push_attr(out, name, value);
        }
        if element.hidden {
            out.push_str(" hidden");
        }
        out.push('>');
        for &child in self.children(id) {
            self.write_html(child, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(value, true, out);
    out.push('"');
}

fn escape_into(text: &str, in_attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
