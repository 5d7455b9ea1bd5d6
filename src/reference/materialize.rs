//! Copy local images next to the Markdown output under portable names.
//!
//! Output layout is flat: every copied resource lands directly in the output
//! folder and the rewritten reference is the bare file name.
//!
//! | source file      | copy            | reference becomes |
//! |------------------|-----------------|-------------------|
//! | no extension     | `<name>.png`    | `<name>.png`      |
//! | `.png` (any case)| `<name>.png`    | `<name>.png`      |
//! | anything else    | none            | unchanged         |

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::resolve::resolve_local;
use crate::error::{Error, Result};

/// Extension given to extensionless images.
const IMAGE_EXTENSION: &str = "png";

/// Run-scoped table of original reference → rewritten reference.
///
/// Entries are only ever added. Each canonical source file is copied at most
/// once per conversion, however many spellings refer to it, and no two
/// sources share a destination name.
#[derive(Debug, Default, Clone)]
pub struct ResourceMapping {
    entries: HashMap<String, String>,
    /// Canonical source → destination file name.
    sources: HashMap<PathBuf, String>,
    /// Lowercased destination name → canonical source that owns it.
    claimed: HashMap<String, PathBuf>,
    copied: Vec<PathBuf>,
}

impl ResourceMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewritten reference previously recorded for `original`.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Destination paths actually written so far, in copy order.
    pub fn copied(&self) -> &[PathBuf] {
        &self.copied
    }

    fn record(&mut self, original: &str, rewritten: String) -> &str {
        self.entries
            .entry(original.to_string())
            .or_insert(rewritten)
            .as_str()
    }

    /// First of `stem.ext`, `stem-1.ext`, `stem-2.ext`, ... not owned by
    /// another source. Compared case-insensitively.
    fn free_name(&self, stem: &str, ext: &str, source: &Path) -> String {
        let mut candidate = format!("{stem}.{ext}");
        let mut n = 1;
        while self
            .claimed
            .get(&candidate.to_lowercase())
            .is_some_and(|owner| owner != source)
        {
            candidate = format!("{stem}-{n}.{ext}");
            n += 1;
        }
        candidate
    }

    fn claim(&mut self, source: PathBuf, name: &str) {
        self.claimed.insert(name.to_lowercase(), source.clone());
        self.sources.insert(source, name.to_string());
    }
}

/// Outcome of [`materialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    /// Reference to write back into the document (spaces not yet encoded).
    pub reference: String,
    /// Whether a mapping entry applies, from a copy made now or earlier in the run.
    pub changed: bool,
}

impl Materialized {
    fn unchanged(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            changed: false,
        }
    }
}

enum CopyPlan {
    /// Copy under the original name with `.png` appended.
    AppendExtension(String),
    /// Copy under the original name.
    AsIs { stem: String, ext: String },
}

impl CopyPlan {
    /// `None` for files this tool leaves alone.
    fn for_path(path: &Path) -> Option<Self> {
        let lossy = |s: &std::ffi::OsStr| s.to_string_lossy().into_owned();
        match path.extension() {
            None => path.file_name().map(|name| CopyPlan::AppendExtension(lossy(name))),
            Some(ext) if ext.eq_ignore_ascii_case(IMAGE_EXTENSION) => {
                Some(CopyPlan::AsIs {
                    stem: path.file_stem().map(lossy)?,
                    ext: lossy(ext),
                })
            }
            Some(_) => None,
        }
    }
}

/// Copy the file behind a local reference into `out_dir` if it is an image
/// this tool handles, and return the reference to use in its place.
///
/// Unresolvable references come back unchanged; copy failures abort. A
/// source whose name is already taken by a different file gets a numbered
/// name (`image-1.png`).
pub fn materialize(
    base_dir: &Path,
    out_dir: &Path,
    reference: &str,
    mapping: &mut ResourceMapping,
) -> Result<Materialized> {
    if let Some(mapped) = mapping.get(reference) {
        return Ok(Materialized {
            reference: mapped.to_string(),
            changed: true,
        });
    }

    let Some(source) = resolve_local(base_dir, reference) else {
        debug!(reference, "local reference not resolved; left unchanged");
        return Ok(Materialized::unchanged(reference));
    };

    let Some(plan) = CopyPlan::for_path(&source) else {
        return Ok(Materialized::unchanged(reference));
    };

    if let Some(existing) = mapping.sources.get(&source).cloned() {
        debug!(reference, name = %existing, "reference shares an already copied source");
        let reference = mapping.record(reference, existing).to_string();
        return Ok(Materialized {
            reference,
            changed: true,
        });
    }

    let (stem, ext) = match plan {
        CopyPlan::AppendExtension(name) => (name, IMAGE_EXTENSION.to_string()),
        CopyPlan::AsIs { stem, ext } => (stem, ext),
    };
    let dest_name = mapping.free_name(&stem, &ext, &source);

    fs::create_dir_all(out_dir).map_err(|e| Error::io(out_dir, e))?;
    let dest = out_dir.join(&dest_name);

    // Archive and output folders may coincide; a .png at the top level is
    // then already in place.
    let same_file = fs::canonicalize(&dest).is_ok_and(|d| d == source);
    if !same_file {
        fs::copy(&source, &dest).map_err(|e| Error::io(&dest, e))?;
        debug!(from = %source.display(), to = %dest.display(), "copied resource");
        mapping.copied.push(dest);
    }
    mapping.claim(source, &dest_name);

    let reference = mapping.record(reference, dest_name).to_string();
    Ok(Materialized {
        reference,
        changed: true,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    struct Fixture {
        base: TempDir,
        out: TempDir,
    }

    fn fixture() -> Fixture {
        let base = TempDir::new().unwrap();
        let files = base.path().join("Thread_files");
        fs::create_dir(&files).unwrap();
        fs::write(files.join("image"), b"\x89PNG raw").unwrap();
        fs::write(files.join("Shot.PNG"), b"\x89PNG shot").unwrap();
        fs::write(files.join("photo.jpg"), b"jpeg").unwrap();
        fs::write(files.join("my pic"), b"spaced").unwrap();
        Fixture {
            base,
            out: TempDir::new().unwrap(),
        }
    }

    fn run(fx: &Fixture, reference: &str, mapping: &mut ResourceMapping) -> Materialized {
        materialize(fx.base.path(), fx.out.path(), reference, mapping).unwrap()
    }

    #[test]
    fn test_extensionless_gets_png_copy() {
        let fx = fixture();
        let mut mapping = ResourceMapping::new();

        let result = run(&fx, "Thread_files/image", &mut mapping);

        assert_eq!(result.reference, "image.png");
        assert!(result.changed);
        assert_eq!(fs::read(fx.out.path().join("image.png")).unwrap(), b"\x89PNG raw");
        assert_eq!(mapping.get("Thread_files/image"), Some("image.png"));
    }

    #[test]
    fn test_repeated_reference_copies_once() {
        let fx = fixture();
        let mut mapping = ResourceMapping::new();

        let first = run(&fx, "./Thread_files/image", &mut mapping);
        fs::remove_file(fx.out.path().join("image.png")).unwrap();
        let second = run(&fx, "./Thread_files/image", &mut mapping);

        assert_eq!(first, second);
        assert_eq!(mapping.copied().len(), 1);
        assert!(!fx.out.path().join("image.png").exists());
    }

    #[test]
    fn test_png_copied_byte_identical_under_same_name() {
        let fx = fixture();
        let mut mapping = ResourceMapping::new();

        let result = run(&fx, "Thread_files/Shot.PNG", &mut mapping);

        assert_eq!(result.reference, "Shot.PNG");
        assert_eq!(
            fs::read(fx.out.path().join("Shot.PNG")).unwrap(),
            fs::read(fx.base.path().join("Thread_files/Shot.PNG")).unwrap()
        );
    }

    #[test]
    fn test_other_extensions_untouched() {
        let fx = fixture();
        let mut mapping = ResourceMapping::new();

        let result = run(&fx, "Thread_files/photo.jpg", &mut mapping);

        assert_eq!(result, Materialized::unchanged("Thread_files/photo.jpg"));
        assert!(mapping.is_empty());
        assert_eq!(fs::read_dir(fx.out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unresolved_passes_through() {
        let fx = fixture();
        let mut mapping = ResourceMapping::new();

        let result = run(&fx, "Thread_files/missing", &mut mapping);

        assert_eq!(result, Materialized::unchanged("Thread_files/missing"));
        assert!(mapping.copied().is_empty());
    }

    #[test]
    fn test_percent_encoded_reference_resolves() {
        let fx = fixture();
        let mut mapping = ResourceMapping::new();

        let result = run(&fx, "Thread_files/my%20pic", &mut mapping);

        assert_eq!(result.reference, "my pic.png");
        assert!(fx.out.path().join("my pic.png").exists());
    }

    #[test]
    fn test_output_dir_created() {
        let fx = fixture();
        let nested = fx.out.path().join("a/b");
        let mut mapping = ResourceMapping::new();

        materialize(fx.base.path(), &nested, "Thread_files/image", &mut mapping).unwrap();

        assert!(nested.join("image.png").is_file());
    }

    #[test]
    fn test_same_folder_png_is_not_copied_onto_itself() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("top.png"), b"data").unwrap();
        let mut mapping = ResourceMapping::new();

        let result = materialize(dir.path(), dir.path(), "top.png", &mut mapping).unwrap();

        assert_eq!(result.reference, "top.png");
        assert_eq!(fs::read(dir.path().join("top.png")).unwrap(), b"data");
        assert!(mapping.copied().is_empty());
    }

    #[test]
    fn test_same_name_from_different_folders_kept_apart() {
        let fx = fixture();
        for (folder, data) in [("a_files", b"AAAA"), ("b_files", b"BBBB")] {
            let dir = fx.base.path().join(folder);
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join("image"), data).unwrap();
        }
        let mut mapping = ResourceMapping::new();

        let a = run(&fx, "a_files/image", &mut mapping);
        let b = run(&fx, "b_files/image", &mut mapping);

        assert_eq!(a.reference, "image.png");
        assert_eq!(b.reference, "image-1.png");
        assert_eq!(fs::read(fx.out.path().join("image.png")).unwrap(), b"AAAA");
        assert_eq!(fs::read(fx.out.path().join("image-1.png")).unwrap(), b"BBBB");
        assert_eq!(mapping.copied().len(), 2);
    }

    #[test]
    fn test_name_collision_is_case_insensitive() {
        let fx = fixture();
        let other = fx.base.path().join("other_files");
        fs::create_dir(&other).unwrap();
        fs::write(other.join("shot.png"), b"other").unwrap();
        let mut mapping = ResourceMapping::new();

        run(&fx, "Thread_files/Shot.PNG", &mut mapping);
        let second = run(&fx, "other_files/shot.png", &mut mapping);

        assert_eq!(second.reference, "shot-1.png");
        assert_eq!(fs::read(fx.out.path().join("shot-1.png")).unwrap(), b"other");
    }

    #[test]
    fn test_spellings_of_one_file_copy_once() {
        let fx = fixture();
        let mut mapping = ResourceMapping::new();

        let spellings = [
            "Thread_files/image",
            "./Thread_files/image",
            "Thread_files/../Thread_files/image",
        ];
        let results: Vec<Materialized> =
            spellings.iter().map(|r| run(&fx, r, &mut mapping)).collect();

        assert!(results.iter().all(|r| r.reference == "image.png" && r.changed));
        assert_eq!(mapping.copied().len(), 1);
        assert_eq!(mapping.len(), 3);
        assert_eq!(fs::read_dir(fx.out.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_copy_failure_is_fatal() {
        let fx = fixture();
        let blocker = fx.out.path().join("file");
        fs::write(&blocker, b"").unwrap();
        let mut mapping = ResourceMapping::new();

        let err = materialize(fx.base.path(), &blocker, "Thread_files/image", &mut mapping)
            .unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
    }
}
