//! Local reference → filesystem path.

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use super::Reference;

/// Resolve a local reference against `base` to a canonical file path.
///
/// The reference is percent-decoded (`%20` becomes a space) and a leading
/// `./` is dropped before joining. Returns `None` for external or fragment
/// references, when the target does not exist, or when it is a directory.
pub fn resolve_local(base: &Path, reference: &str) -> Option<PathBuf> {
    let Some(Reference::Local(local)) = Reference::parse(reference) else {
        return None;
    };

    let decoded = percent_decode_str(local).decode_utf8_lossy();
    let relative = decoded.strip_prefix("./").unwrap_or(&decoded);

    let resolved = fs::canonicalize(base.join(relative)).ok()?;
    if resolved.is_dir() {
        return None;
    }
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn archive() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Page_files")).unwrap();
        fs::write(dir.path().join("Page_files/shot one"), b"img").unwrap();
        fs::write(dir.path().join("top.png"), b"png").unwrap();
        dir
    }

    #[test]
    fn test_percent_decoded_before_lookup() {
        let dir = archive();
        let path = resolve_local(dir.path(), "Page_files/shot%20one").unwrap();
        assert_eq!(path, fs::canonicalize(dir.path().join("Page_files/shot one")).unwrap());
    }

    #[test]
    fn test_leading_dot_slash_stripped() {
        let dir = archive();
        assert!(resolve_local(dir.path(), "./top.png").is_some());
    }

    #[test]
    fn test_parent_segments_canonicalized() {
        let dir = archive();
        let path = resolve_local(dir.path(), "Page_files/../top.png").unwrap();
        assert_eq!(path, fs::canonicalize(dir.path().join("top.png")).unwrap());
    }

    #[test]
    fn test_missing_and_directory_are_not_found() {
        let dir = archive();
        assert_eq!(resolve_local(dir.path(), "nope.png"), None);
        assert_eq!(resolve_local(dir.path(), "Page_files"), None);
    }

    #[test]
    fn test_external_and_fragment_never_resolve() {
        let dir = archive();
        assert_eq!(resolve_local(dir.path(), "https://example.com/top.png"), None);
        assert_eq!(resolve_local(dir.path(), "#top.png"), None);
        assert_eq!(resolve_local(dir.path(), ""), None);
    }
}
