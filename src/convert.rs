//! The conversion pipeline: select, trim, normalize references, render.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::dom::{CssSelector, Document, NodeId, parse_html};
use crate::error::{Error, Result};
use crate::markdown::{assemble_document, display_title, render_fragment};
use crate::reference::ResourceMapping;
use crate::transform::{Rewrite, TrimOutcome, normalize_references, trim_after_marker};

/// Element holding the question or answer body on a community thread page.
pub const DEFAULT_CONTENT_SELECTOR: &str =
    "div.thread-message-content-body-text.thread-full-message";

/// Reply/vote toolbar that starts the discardable tail of the body.
pub const DEFAULT_TRIM_SELECTOR: &str = "div.message-action-container";

/// Elements that make a body non-empty even without text.
const CONTENT_TAGS: &[&str] = &["img", "a", "p", "ul", "ol", "table", "pre"];

/// Settings for one conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    base_dir: PathBuf,
    output_dir: Option<PathBuf>,
    fallback_title: String,
    content_selector: String,
    trim_selector: String,
}

impl ConvertOptions {
    /// Options resolving local references against `base_dir`, with copies
    /// written there too.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            output_dir: None,
            fallback_title: String::new(),
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            trim_selector: DEFAULT_TRIM_SELECTOR.to_string(),
        }
    }

    /// Write materialized resources somewhere other than `base_dir`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Title used when the page has no `<title>`.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    pub fn with_content_selector(mut self, selector: impl Into<String>) -> Self {
        self.content_selector = selector.into();
        self
    }

    pub fn with_trim_selector(mut self, selector: impl Into<String>) -> Self {
        self.trim_selector = selector.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.base_dir)
    }

    pub fn fallback_title(&self) -> &str {
        &self.fallback_title
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Final Markdown, ending in exactly one newline.
    pub markdown: String,
    pub title: String,
    /// Files written into the output folder, in copy order.
    pub copied: Vec<PathBuf>,
    /// Attribute values changed by the reference pass, in document order.
    pub rewritten: Vec<Rewrite>,
    pub trim: TrimOutcome,
}

/// Parse `html` and convert its content root to Markdown.
pub fn convert_html(html: &str, options: &ConvertOptions) -> Result<Conversion> {
    let mut doc = parse_html(html);
    convert_document(&mut doc, options)
}

/// Convert an already parsed page. The tree is trimmed and its references
/// rewritten in place.
pub fn convert_document(doc: &mut Document, options: &ConvertOptions) -> Result<Conversion> {
    let content = CssSelector::parse(&options.content_selector)?;
    let marker = CssSelector::parse(&options.trim_selector)?;

    let root = content
        .select_first(doc, doc.root())
        .ok_or_else(|| Error::ContentRootNotFound(content.as_str().to_string()))?;

    let trim = trim_after_marker(doc, root, &marker);

    if !has_content(doc, root) {
        return Err(Error::EmptyContent);
    }

    let mut mapping = ResourceMapping::new();
    let rewritten = normalize_references(
        doc,
        root,
        options.base_dir(),
        options.output_dir(),
        &mut mapping,
    )?;

    let title = display_title(doc, options.fallback_title());
    let body = render_fragment(doc, root);
    let markdown = assemble_document(&title, &body);

    info!(
        title = %title,
        copied = mapping.copied().len(),
        rewritten = rewritten.len(),
        "converted page"
    );

    Ok(Conversion {
        markdown,
        title,
        copied: mapping.copied().to_vec(),
        rewritten,
        trim,
    })
}

/// Non-whitespace text, or at least one element that renders on its own.
fn has_content(doc: &Document, root: NodeId) -> bool {
    if !doc.text_content(root).trim().is_empty() {
        return true;
    }
    doc.descendants(root).any(|id| {
        doc.element_name(id)
            .is_some_and(|name| CONTENT_TAGS.contains(&&**name))
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn page(title: &str, body: &str) -> String {
        format!(
            r#"<!DOCTYPE html><html><head><title>{title}</title></head><body>
            <div class="thread-message-content-body-text thread-full-message">{body}</div>
            </body></html>"#
        )
    }

    #[test]
    fn test_full_conversion() {
        let dir = TempDir::new().unwrap();
        let html = page(
            "Printer offline - Microsoft コミュニティ",
            "<p>Hello <b>there</b></p><ul><li>A</li><li>B</li></ul>",
        );

        let conv = convert_html(&html, &ConvertOptions::new(dir.path())).unwrap();

        assert_eq!(conv.title, "Printer offline");
        assert_eq!(conv.markdown, "# Printer offline\n\nHello **there**\n\n- A\n- B\n");
        assert_eq!(conv.trim, TrimOutcome::NoMarker);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = convert_html("<p>no root</p>", &ConvertOptions::new(dir.path())).unwrap_err();
        assert!(matches!(err, Error::ContentRootNotFound(s) if s == DEFAULT_CONTENT_SELECTOR));
    }

    #[test]
    fn test_empty_body_is_fatal() {
        let dir = TempDir::new().unwrap();
        let html = page("T", "  <div> <span> </span></div> ");
        let err = convert_html(&html, &ConvertOptions::new(dir.path())).unwrap_err();
        assert!(matches!(err, Error::EmptyContent));
    }

    #[test]
    fn test_body_empty_after_trim_is_fatal() {
        let dir = TempDir::new().unwrap();
        let html = page("T", r#"<div class="message-action-container">Reply</div>"#);
        let err = convert_html(&html, &ConvertOptions::new(dir.path())).unwrap_err();
        assert!(matches!(err, Error::EmptyContent));
    }

    #[test]
    fn test_image_only_body_is_content() {
        let dir = TempDir::new().unwrap();
        let html = page("T", r#"<img src="https://x.test/a.png">"#);
        let conv = convert_html(&html, &ConvertOptions::new(dir.path())).unwrap();
        assert_eq!(conv.markdown, "# T\n\n![](https://x.test/a.png)\n");
    }

    #[test]
    fn test_fallback_title() {
        let dir = TempDir::new().unwrap();
        let html = r#"<div class="thread-message-content-body-text thread-full-message"><p>x</p></div>"#;
        let options = ConvertOptions::new(dir.path()).with_fallback_title("My Folder");
        let conv = convert_html(html, &options).unwrap();
        assert_eq!(conv.markdown, "# My Folder\n\nx\n");
    }

    #[test]
    fn test_trimmed_tail_absent_and_not_copied() {
        let base = TempDir::new().unwrap();
        fs::write(base.path().join("after"), b"img").unwrap();
        let out = TempDir::new().unwrap();
        let html = page(
            "T",
            r#"<p>keep</p><div class="message-action-container">Vote</div><p>gone</p><img src="after">"#,
        );

        let options = ConvertOptions::new(base.path()).with_output_dir(out.path());
        let conv = convert_html(&html, &options).unwrap();

        assert_eq!(conv.markdown, "# T\n\nkeep\n");
        assert!(conv.copied.is_empty());
        assert!(!out.path().join("after.png").exists());
    }

    #[test]
    fn test_custom_selectors() {
        let dir = TempDir::new().unwrap();
        let html = r#"<article><p>body</p><footer>f</footer><p>x</p></article>"#;
        let options = ConvertOptions::new(dir.path())
            .with_fallback_title("Doc")
            .with_content_selector("article")
            .with_trim_selector("footer");
        let conv = convert_html(html, &options).unwrap();
        assert_eq!(conv.markdown, "# Doc\n\nbody\n");
    }

    #[test]
    fn test_invalid_selector_reported() {
        let dir = TempDir::new().unwrap();
        let options = ConvertOptions::new(dir.path()).with_content_selector("div[");
        let err = convert_html("<p>x</p>", &options).unwrap_err();
        assert!(matches!(err, Error::InvalidSelector(_)));
    }
}
