//! Editorial trim: cut everything from the trim marker onward.

use tracing::{debug, warn};

use crate::dom::{CssSelector, Document, NodeId};

/// What [`trim_after_marker`] removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimOutcome {
    /// No marker below the root; nothing removed.
    NoMarker,
    /// The marker and its following siblings were removed.
    Truncated { removed: usize },
    /// The marker's position among its siblings could not be found, so only
    /// the marker itself was removed.
    MarkerOnly,
}

/// Remove the first element under `root` matching `marker`, together with
/// every sibling that follows it.
pub fn trim_after_marker(doc: &mut Document, root: NodeId, marker: &CssSelector) -> TrimOutcome {
    let Some(found) = marker.select_first(doc, root) else {
        return TrimOutcome::NoMarker;
    };

    match marker_and_following(doc, found) {
        Some(doomed) => {
            let removed = doomed.len();
            for id in doomed {
                doc.detach(id);
            }
            debug!(removed, "trimmed trailing page UI");
            TrimOutcome::Truncated { removed }
        }
        None => {
            warn!(
                marker = marker.as_str(),
                "trim marker not among its parent's children; removing marker only"
            );
            doc.detach(found);
            TrimOutcome::MarkerOnly
        }
    }
}

/// `marker` and its later siblings, or `None` if the parent's child list
/// does not contain it.
fn marker_and_following(doc: &Document, marker: NodeId) -> Option<Vec<NodeId>> {
    let parent = doc.parent(marker)?;
    let siblings: Vec<NodeId> = doc.children(parent).collect();
    let index = siblings.iter().position(|&id| id == marker)?;
    Some(siblings[index..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    const MARKER: &str = "div.message-action-container";

    fn body_text(html: &str) -> (String, TrimOutcome) {
        let mut doc = parse_html(html);
        let root = CssSelector::parse("#root")
            .unwrap()
            .select_first(&doc, doc.root())
            .unwrap();
        let marker = CssSelector::parse(MARKER).unwrap();
        let outcome = trim_after_marker(&mut doc, root, &marker);
        (doc.text_content(root), outcome)
    }

    #[test]
    fn test_marker_and_following_siblings_removed() {
        let (text, outcome) = body_text(
            r#"<div id="root"><p>keep</p><div class="message-action-container">Reply</div><p>comment</p><div>more</div></div>"#,
        );
        assert_eq!(text, "keep");
        assert_eq!(outcome, TrimOutcome::Truncated { removed: 3 });
    }

    #[test]
    fn test_nested_marker_only_cuts_its_own_level() {
        let (text, _) = body_text(
            r#"<div id="root"><section><p>a</p><div class="x message-action-container">b</div><p>c</p></section><p>d</p></div>"#,
        );
        assert_eq!(text, "ad");
    }

    #[test]
    fn test_no_marker_leaves_tree_alone() {
        let (text, outcome) = body_text(
            r#"<div id="root"><p>a</p><span class="message-action-container">b</span></div>"#,
        );
        assert_eq!(text, "ab");
        assert_eq!(outcome, TrimOutcome::NoMarker);
    }

    #[test]
    fn test_marker_outside_root_is_ignored() {
        let (text, outcome) = body_text(
            r#"<div id="root"><p>a</p></div><div class="message-action-container">b</div>"#,
        );
        assert_eq!(text, "a");
        assert_eq!(outcome, TrimOutcome::NoMarker);
    }

    #[test]
    fn test_marker_missing_from_parent_children_removed_alone() {
        let mut doc = parse_html(concat!(
            r#"<div id="root"><section><p>a</p>"#,
            r#"<div class="message-action-container">b</div><p>c</p></section></div>"#,
        ));
        let root = CssSelector::parse("#root")
            .unwrap()
            .select_first(&doc, doc.root())
            .unwrap();
        let marker = CssSelector::parse(MARKER).unwrap();
        let found = marker.select_first(&doc, root).unwrap();
        // Parent link points at a node whose child list does not hold the marker.
        doc.get_mut(found).unwrap().parent = root;

        let outcome = trim_after_marker(&mut doc, root, &marker);

        assert_eq!(outcome, TrimOutcome::MarkerOnly);
        assert_eq!(doc.text_content(root), "ac");
        assert_eq!(doc.parent(found), None);
    }

    #[test]
    fn test_detached_marker_has_no_sibling_run() {
        let mut doc = parse_html(r#"<div class="message-action-container">b</div>"#);
        let marker = CssSelector::parse(MARKER).unwrap();
        let found = marker.select_first(&doc, doc.root()).unwrap();
        doc.detach(found);
        assert_eq!(marker_and_following(&doc, found), None);
    }
}
