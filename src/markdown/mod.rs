//! Pure Markdown generation from the document tree.
//!
//! - [`render`]: recursive node → Markdown dispatch
//! - [`document`]: blank-line collapse, title derivation, final assembly
//!
//! Neither touches the filesystem; the [`crate::convert`] pipeline runs the
//! reference pass first so that rendered `src`/`href` values are already
//! portable.
//!
//! ## Element mapping
//!
//! | HTML | Markdown |
//! |---|---|
//! | `h1`–`h6` | `#`–`######` heading |
//! | `p` | paragraph, dropped when blank |
//! | `br` | two trailing spaces + newline |
//! | `b`, `strong` | `**text**` |
//! | `i`, `em` | `_text_` |
//! | `a` | `[text](href)` |
//! | `img` | `![alt](src)` |
//! | `ul` / `ol` | `- item` / `1. item` per direct `li` |
//! | `code` | `` `code` ``, fenced when multi-line |
//! | `pre` | fenced block of raw text |
//! | `table` | pipe table, first row as header |

mod document;
mod render;

pub use document::{
    assemble_document, display_title, finish_markdown, page_title, render_fragment,
    strip_site_suffix,
};
pub use render::render_node;
