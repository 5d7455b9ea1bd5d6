//! Error types for archive conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a conversion.
///
/// Unresolvable local references are not errors; they pass through
/// unchanged.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content root not found (expected an element matching `{0}`)")]
    ContentRootNotFound(String),

    #[error("article body is empty; check the saved page and the content selector")]
    EmptyContent,

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("no HTML file found in {}", .0.display())]
    NoHtmlFile(PathBuf),

    #[error("multiple HTML files found (keep exactly one): {}", .0.join(", "))]
    MultipleHtmlFiles(Vec<String>),

    #[error("HTML is not valid UTF-8: {}", .0.display())]
    Encoding(PathBuf),

    #[error("invalid CSS selector: `{0}`")]
    InvalidSelector(String),
}

impl Error {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
