// ABOUTME: Document type holding DSL source text together with where it came from
// ABOUTME: Documents are immutable; preprocessing and resolution always produce new ones

use std::fmt;
use std::path::{Path, PathBuf};

/// Where a document's text was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOrigin {
    File(PathBuf),
    Inline,
}

impl DocumentOrigin {
    /// Name used in diagnostics and include keys
    pub fn label(&self) -> String {
        match self {
            DocumentOrigin::File(path) => path.display().to_string(),
            DocumentOrigin::Inline => "inline".to_string(),
        }
    }

    /// Directory that relative includes are resolved against, if the origin has one
    pub fn directory(&self) -> Option<&Path> {
        match self {
            DocumentOrigin::File(path) => path.parent(),
            DocumentOrigin::Inline => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    origin: DocumentOrigin,
}

impl Document {
    pub fn new(text: impl Into<String>, origin: DocumentOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    /// Create a document that did not come from a file
    pub fn inline(text: impl Into<String>) -> Self {
        Self::new(text, DocumentOrigin::Inline)
    }

    /// Read a document from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::new(text, DocumentOrigin::File(path.to_path_buf())))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &DocumentOrigin {
        &self.origin
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
