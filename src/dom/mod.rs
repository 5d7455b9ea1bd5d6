//! HTML parsing into an arena document, plus CSS selector lookup.
//!
//! ```
//! use archive2md::dom::{CssSelector, parse_html};
//!
//! let doc = parse_html(r#"<div class="a b"><p>Hi</p></div>"#);
//! let sel = CssSelector::parse("div.a.b").unwrap();
//! let div = sel.select_first(&doc, doc.root()).unwrap();
//! assert_eq!(doc.text_content(div), "Hi");
//! ```

mod arena;
mod element_ref;
mod kind;
mod tree_sink;

pub use arena::{Attribute, Children, Descendants, Document, Node, NodeData, NodeId};
pub use element_ref::{ElementRef, PageSelectors};
pub use kind::{ElementKind, element_kind};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use selectors::context::{MatchingContext, SelectorCaches};
use selectors::parser::{ParseRelative, Selector, SelectorList};

use crate::error::{Error, Result};
use tree_sink::DocumentSink;

/// Parse a complete HTML document.
pub fn parse_html(html: &str) -> Document {
    let sink = DocumentSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_document()
}

/// A compiled, comma-separated CSS selector list.
#[derive(Debug, Clone)]
pub struct CssSelector {
    source: String,
    selectors: Vec<Selector<PageSelectors>>,
}

impl CssSelector {
    /// Compile a selector list such as `div.a.b, p > img`.
    pub fn parse(source: &str) -> Result<Self> {
        let mut input = cssparser::ParserInput::new(source);
        let mut parser = cssparser::Parser::new(&mut input);
        let list = SelectorList::parse(&PageSelectors, &mut parser, ParseRelative::No)
            .map_err(|_| Error::InvalidSelector(source.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            selectors: list.slice().to_vec(),
        })
    }

    /// The selector text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether element `id` matches any selector in the list.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        if !doc.is_element(id) {
            return false;
        }
        let elem = ElementRef::new(doc, id);
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            selectors::matching::MatchingMode::Normal,
            None,
            &mut caches,
            selectors::context::QuirksMode::NoQuirks,
            selectors::matching::NeedsSelectorFlags::No,
            selectors::matching::MatchingForInvalidation::No,
        );

        self.selectors.iter().any(|selector| {
            selectors::matching::matches_selector(selector, 0, None, &elem, &mut context)
        })
    }

    /// First matching element below `top`, in document order.
    pub fn select_first(&self, doc: &Document, top: NodeId) -> Option<NodeId> {
        doc.find_in(top, |id| self.matches(doc, id))
    }
}
