//! Saved-page archive folders.
//!
//! An archive is a folder holding exactly one `*.html` page plus the assets
//! the browser saved alongside it. By default the Markdown lands in the same
//! folder as `<folder-name>.md`, with copied images beside it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::convert::{Conversion, ConvertOptions, convert_html};
use crate::error::{Error, Result};
use crate::util::decode_utf8;

/// An archive folder on disk.
#[derive(Debug, Clone)]
pub struct Archive {
    folder: PathBuf,
    name: String,
}

impl Archive {
    /// Open an archive folder; it must exist and be a directory.
    pub fn open(folder: impl AsRef<Path>) -> Result<Self> {
        let folder = folder.as_ref();
        let folder = fs::canonicalize(folder).map_err(|_| Error::NotADirectory(folder.into()))?;
        if !folder.is_dir() {
            return Err(Error::NotADirectory(folder));
        }
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { folder, name })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Folder name; the fallback title and default output stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<folder>/<folder-name>.md`
    pub fn default_output(&self) -> PathBuf {
        self.folder.join(format!("{}.md", self.name))
    }

    /// The single `*.html` file directly inside the folder.
    pub fn html_file(&self) -> Result<PathBuf> {
        let entries = fs::read_dir(&self.folder).map_err(|e| Error::io(&self.folder, e))?;

        let mut pages = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&self.folder, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
                pages.push(path);
            }
        }
        pages.sort();

        match pages.len() {
            0 => Err(Error::NoHtmlFile(self.folder.clone())),
            1 => Ok(pages.remove(0)),
            _ => Err(Error::MultipleHtmlFiles(
                pages
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect(),
            )),
        }
    }

    /// Conversion settings for this archive: references resolve against the
    /// folder, copies land in `out_dir`, and the folder name is the fallback
    /// title.
    pub fn options(&self, out_dir: &Path) -> ConvertOptions {
        ConvertOptions::new(&self.folder)
            .with_output_dir(out_dir)
            .with_fallback_title(&self.name)
    }

    /// Read the archive's page and convert it.
    pub fn convert(&self, options: &ConvertOptions) -> Result<Conversion> {
        let page = self.html_file()?;
        debug!(page = %page.display(), "reading saved page");
        let bytes = fs::read(&page).map_err(|e| Error::io(&page, e))?;
        let html = decode_utf8(&bytes).ok_or_else(|| Error::Encoding(page.clone()))?;
        convert_html(&html, options)
    }
}

/// Write Markdown to `path`, creating parent folders as needed.
pub fn write_markdown(path: &Path, markdown: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, markdown).map_err(|e| Error::io(path, e))
}
