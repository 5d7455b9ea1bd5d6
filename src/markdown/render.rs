//! Document tree → Markdown fragments.
//!
//! Pure and recursive: every node renders to a string built from its
//! children's strings. Text is emitted verbatim, with no Markdown escaping,
//! so whatever the page author typed survives as-is.

use crate::dom::{Document, ElementKind, NodeData, NodeId, element_kind};

/// Render a node and its subtree to a Markdown fragment.
///
/// The fragment is not post-processed; see [`super::finish_markdown`].
pub fn render_node(doc: &Document, id: NodeId) -> String {
    Renderer { doc }.node(id)
}

struct Renderer<'a> {
    doc: &'a Document,
}

impl Renderer<'_> {
    fn node(&self, id: NodeId) -> String {
        let Some(node) = self.doc.get(id) else {
            return String::new();
        };

        match &node.data {
            NodeData::Text(text) => text.clone(),
            NodeData::Element { name, .. } => self.element(id, element_kind(&name.local)),
            NodeData::Document => self.children(id),
            NodeData::Comment(_) | NodeData::Doctype { .. } => String::new(),
        }
    }

    fn children(&self, id: NodeId) -> String {
        self.doc.children(id).map(|child| self.node(child)).collect()
    }

    fn element(&self, id: NodeId, kind: ElementKind) -> String {
        match kind {
            ElementKind::Heading(level) => {
                let text = self.children(id);
                format!("\n{} {}\n\n", "#".repeat(level as usize), text.trim())
            }

            ElementKind::Paragraph => {
                let text = self.children(id);
                let text = text.trim();
                if text.is_empty() {
                    String::new()
                } else {
                    format!("{text}\n\n")
                }
            }

            ElementKind::LineBreak => "  \n".to_string(),

            ElementKind::Strong => format!("**{}**", self.children(id)),

            ElementKind::Emphasis => format!("_{}_", self.children(id)),

            ElementKind::Link => {
                let href = self.doc.get_attr(id, "href").unwrap_or("").trim();
                let inner = self.children(id);
                let inner = inner.trim();
                let text = if inner.is_empty() { href } else { inner };
                if href.is_empty() {
                    text.to_string()
                } else {
                    format!("[{text}]({href})")
                }
            }

            ElementKind::Image => {
                let src = self.doc.get_attr(id, "src").unwrap_or("").trim();
                let alt = self.doc.get_attr(id, "alt").unwrap_or("").trim();
                format!("![{alt}]({src})")
            }

            ElementKind::UnorderedList => self.list(id, |_| "-".to_string()),

            ElementKind::OrderedList => self.list(id, |n| format!("{n}.")),

            ElementKind::Code => {
                let text = self.doc.text_content(id);
                if text.contains('\n') {
                    fenced(&text)
                } else {
                    format!("`{text}`")
                }
            }

            ElementKind::Preformatted => fenced(&self.doc.text_content(id)),

            ElementKind::Table => self.table(id),

            ElementKind::Other => self.children(id),
        }
    }

    /// One line per direct `li` child; `marker` gets the 1-based item number.
    fn list(&self, id: NodeId, marker: impl Fn(usize) -> String) -> String {
        let items: Vec<String> = self
            .doc
            .children(id)
            .filter(|&child| self.is_tag(child, "li"))
            .enumerate()
            .map(|(i, li)| format!("{} {}", marker(i + 1), self.children(li).trim()))
            .collect();

        if items.is_empty() {
            String::new()
        } else {
            items.join("\n") + "\n\n"
        }
    }

    /// Pipe table; the first row is the header.
    fn table(&self, id: NodeId) -> String {
        let mut lines = Vec::new();

        let rows = self
            .doc
            .descendants(id)
            .filter(|&row| self.is_tag(row, "tr"));
        for (r, row) in rows.enumerate() {
            let cells: Vec<String> = self
                .doc
                .descendants(row)
                .filter(|&cell| self.is_tag(cell, "th") || self.is_tag(cell, "td"))
                .map(|cell| self.doc.text_content(cell).trim().to_string())
                .collect();

            lines.push(format!("| {} |", cells.join(" | ")));
            if r == 0 {
                lines.push(format!("| {} |", vec!["---"; cells.len()].join(" | ")));
            }
        }

        if lines.is_empty() {
            String::new()
        } else {
            lines.join("\n") + "\n\n"
        }
    }

    fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.doc.element_name(id).is_some_and(|n| n.as_ref() == tag)
    }
}

fn fenced(text: &str) -> String {
    format!("```\n{text}\n```\n\n")
}
