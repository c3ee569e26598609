use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Fallback text used when the source document cannot be read. Downstream
/// excerpt extraction over this text simply yields empty excerpts.
pub const PLACEHOLDER_TEXT: &str = "content not available";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("source document not found at `{0}`")]
    Missing(PathBuf),
    #[error("could not read source document `{path}`: {source}")]
    Unreadable { path: PathBuf, source: std::io::Error },
}

/// Converts an on-disk source file into raw text. The shipped implementation
/// reads plain text; a PDF-backed extractor can plug in behind the same seam.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String, DocumentError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, DocumentError> {
        if !path.exists() {
            return Err(DocumentError::Missing(path.to_path_buf()));
        }
        fs::read_to_string(path)
            .map_err(|source| DocumentError::Unreadable { path: path.to_path_buf(), source })
    }
}

/// An ordered sequence of lines parsed from a source document. Built once at
/// startup and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Self { lines: text.lines().map(str::to_owned).collect() }
    }

    /// Strict load for preflight checks: a missing or unreadable document is
    /// surfaced to the operator.
    pub fn load(extractor: &dyn TextExtractor, path: &Path) -> Result<Self, DocumentError> {
        Ok(Self::from_text(&extractor.extract(path)?))
    }

    /// Degraded load for startup: a missing document is reported once and
    /// replaced by placeholder text so the system keeps operating.
    pub fn load_degraded(extractor: &dyn TextExtractor, path: &Path) -> Self {
        match extractor.extract(path) {
            Ok(text) => Self::from_text(&text),
            Err(error) => {
                warn!(
                    event_name = "document.load.degraded",
                    path = %path.display(),
                    error = %error,
                    "source document unavailable, continuing with placeholder content"
                );
                Self::from_text(PLACEHOLDER_TEXT)
            }
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
