//! In-place passes over the content subtree, run before rendering.
//!
//! - [`trim`]: drop the comment/action UI that follows the article body
//! - [`links`]: rewrite `img[src]` and `a[href]` to portable references

pub mod links;
pub mod trim;

pub use links::{Rewrite, normalize_references};
pub use trim::{TrimOutcome, trim_after_marker};
