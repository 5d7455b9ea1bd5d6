//! Maps HTML element names to render categories.

use html5ever::LocalName;

/// What the renderer does with an element.
///
/// Anything not listed renders as the concatenation of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Heading(u8),
    Paragraph,
    LineBreak,
    Strong,
    Emphasis,
    Link,
    Image,
    UnorderedList,
    OrderedList,
    /// `<code>`; inline or fenced depending on its text.
    Code,
    /// `<pre>`; always fenced.
    Preformatted,
    Table,
    Other,
}

/// Map an element name to its render category.
pub fn element_kind(local_name: &LocalName) -> ElementKind {
    match local_name.as_ref() {
        "h1" => ElementKind::Heading(1),
        "h2" => ElementKind::Heading(2),
        "h3" => ElementKind::Heading(3),
        "h4" => ElementKind::Heading(4),
        "h5" => ElementKind::Heading(5),
        "h6" => ElementKind::Heading(6),

        "p" => ElementKind::Paragraph,
        "br" => ElementKind::LineBreak,

        "strong" | "b" => ElementKind::Strong,
        "em" | "i" => ElementKind::Emphasis,

        "a" => ElementKind::Link,
        "img" => ElementKind::Image,

        "ul" => ElementKind::UnorderedList,
        "ol" => ElementKind::OrderedList,

        "code" => ElementKind::Code,
        "pre" => ElementKind::Preformatted,

        "table" => ElementKind::Table,

        _ => ElementKind::Other,
    }
}
