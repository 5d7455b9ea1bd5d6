//! # archive2md
//!
//! Convert a saved web-page archive (an HTML page plus the asset files the
//! browser saved next to it) into one portable Markdown document.
//!
//! ## Pipeline
//!
//! 1. Parse the page with html5ever and select the article body by CSS
//!    selector.
//! 2. Cut the comment/action UI that follows the body.
//! 3. Rewrite `img[src]` and `a[href]`: local images are copied next to the
//!    Markdown under flat, portable names; spaces become `%20`.
//! 4. Render the body to Markdown and prepend the page title as `# Title`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use archive2md::{Archive, write_markdown};
//!
//! let archive = Archive::open("Saved Thread").unwrap();
//! let output = archive.default_output();
//! let options = archive.options(archive.folder());
//! let conversion = archive.convert(&options).unwrap();
//! write_markdown(&output, &conversion.markdown).unwrap();
//! ```
//!
//! ## Converting HTML directly
//!
//! ```
//! use archive2md::{ConvertOptions, convert_html};
//!
//! let html = r#"<title>Q - Microsoft コミュニティ</title>
//!     <div class="thread-message-content-body-text thread-full-message">
//!       <p>Try <b>this</b></p>
//!     </div>"#;
//! let conv = convert_html(html, &ConvertOptions::new(".")).unwrap();
//! assert_eq!(conv.markdown, "# Q\n\nTry **this**\n");
//! ```

pub mod archive;
pub mod convert;
pub mod dom;
pub mod error;
pub mod markdown;
pub mod reference;
pub mod transform;
pub(crate) mod util;

pub use archive::{Archive, write_markdown};
pub use convert::{
    Conversion, ConvertOptions, DEFAULT_CONTENT_SELECTOR, DEFAULT_TRIM_SELECTOR,
    convert_document, convert_html,
};
pub use error::{Error, Result};
pub use reference::{Reference, ResourceMapping};
pub use transform::{Rewrite, TrimOutcome};
