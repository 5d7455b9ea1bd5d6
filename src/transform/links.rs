//! Reference normalization: make every `img[src]` and `a[href]` portable.

use std::path::Path;

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::reference::{Reference, ResourceMapping, encode_spaces, materialize};

/// One attribute value that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub original: String,
    pub rewritten: String,
}

/// Attribute carrying the reference for an element, if it has one we follow.
fn reference_attr(doc: &Document, id: NodeId) -> Option<&'static str> {
    match doc.element_name(id)?.as_ref() {
        "img" => Some("src"),
        "a" => Some("href"),
        _ => None,
    }
}

/// Walk the subtree under `root` once and rewrite image and link references.
///
/// Local files are materialized into `out_dir` (see
/// [`crate::reference::materialize`]); every non-empty value then has its
/// spaces encoded as `%20`. Returns the values that changed, in document
/// order.
pub fn normalize_references(
    doc: &mut Document,
    root: NodeId,
    base_dir: &Path,
    out_dir: &Path,
    mapping: &mut ResourceMapping,
) -> Result<Vec<Rewrite>> {
    let view: &Document = doc;
    let targets: Vec<(NodeId, &'static str)> = view
        .descendants(root)
        .filter_map(|id| reference_attr(view, id).map(|attr| (id, attr)))
        .collect();

    let mut rewrites = Vec::new();
    for (id, attr) in targets {
        let Some(value) = doc.get_attr(id, attr).map(str::to_string) else {
            continue;
        };
        let Some(reference) = Reference::parse(&value) else {
            continue;
        };

        let target = if reference.is_local() {
            let materialized = materialize(base_dir, out_dir, &value, mapping)?;
            if materialized.changed {
                materialized.reference
            } else {
                value.clone()
            }
        } else {
            value.clone()
        };

        let rewritten = encode_spaces(&target);
        if rewritten != value {
            debug!(attr, from = %value, to = %rewritten, "rewrote reference");
            doc.set_attr(id, attr, rewritten.clone());
            rewrites.push(Rewrite {
                original: value,
                rewritten,
            });
        }
    }

    Ok(rewrites)
}
