//! Whole-document assembly: post-pass, page title and title heading.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::dom::{Document, NodeId};

use super::render::render_node;

static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Site-name suffix the community pages append to every `<title>`.
static SITE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*Microsoft\s*コミュニティ\s*$").unwrap());

/// Collapse runs of three or more newlines to two, trim, and end with one
/// newline.
pub fn finish_markdown(markdown: &str) -> String {
    let collapsed = BLANK_RUNS.replace_all(markdown, "\n\n");
    let mut out = collapsed.trim().to_string();
    out.push('\n');
    out
}

/// Render a subtree and apply [`finish_markdown`].
pub fn render_fragment(doc: &Document, id: NodeId) -> String {
    finish_markdown(&render_node(doc, id))
}

/// Trimmed text of the page's first `<title>`, if it has any.
pub fn page_title(doc: &Document) -> Option<String> {
    let title = doc.find_by_tag("title")?;
    let text = doc.text_content(title);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Drop the trailing " - Microsoft コミュニティ" site name, if present.
pub fn strip_site_suffix(title: &str) -> Cow<'_, str> {
    SITE_SUFFIX.replace(title, "")
}

/// Display title: page title without the site suffix, else `fallback`.
pub fn display_title(doc: &Document, fallback: &str) -> String {
    match page_title(doc) {
        Some(title) => strip_site_suffix(&title).into_owned(),
        None => fallback.to_string(),
    }
}

/// `# <title>`, a blank line, the trimmed body, one trailing newline.
pub fn assemble_document(title: &str, body: &str) -> String {
    format!("# {title}\n\n{}\n", body.trim())
}
