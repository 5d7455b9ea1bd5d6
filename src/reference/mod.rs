//! Reference handling for `src` / `href` attribute values.
//!
//! - [`Reference`]: classify a value as external, fragment or local
//! - [`resolve_local`]: map a local reference to a file under the archive folder
//! - [`materialize`]: copy referenced images next to the Markdown output

mod materialize;
mod resolve;

pub use materialize::{Materialized, ResourceMapping, materialize};
pub use resolve::resolve_local;

/// A classified `src` or `href` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// Has a URI scheme, e.g. `https://...`. Never touched on disk.
    External(&'a str),
    /// In-page anchor, `#...`.
    Fragment(&'a str),
    /// Anything else; may name a file relative to the archive folder.
    Local(&'a str),
}

impl<'a> Reference<'a> {
    /// Classify an attribute value. Empty values are no reference at all.
    pub fn parse(value: &'a str) -> Option<Self> {
        if value.is_empty() {
            None
        } else if is_external(value) {
            Some(Reference::External(value))
        } else if value.starts_with('#') {
            Some(Reference::Fragment(value))
        } else {
            Some(Reference::Local(value))
        }
    }

    pub fn as_str(&self) -> &'a str {
        match *self {
            Reference::External(s) | Reference::Fragment(s) | Reference::Local(s) => s,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Reference::Local(_))
    }
}

/// True when `value` starts with one or more ASCII letters followed by `://`.
///
/// Case-sensitive on the separator; drive paths like `C:/x` are not external.
pub fn is_external(value: &str) -> bool {
    let scheme_len = value.bytes().take_while(u8::is_ascii_alphabetic).count();
    scheme_len > 0 && value[scheme_len..].starts_with("://")
}

/// Replace each space with `%20`, leaving existing escapes alone.
pub fn encode_spaces(value: &str) -> String {
    value.replace(' ', "%20")
}
