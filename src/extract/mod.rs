//! Source text extraction.
//!
//! Normalizes PDF, TXT, DOCX, and web content into plain text for chunking
//! and retrieval. Extraction concatenates content in document order and
//! never rewrites it.

mod docx;
mod pdf;
mod web;

pub use web::fetch_url;

use crate::error::{PratError, Result};
use std::path::Path;
use tracing::debug;

/// The kind of source a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Txt,
    Docx,
    Web,
}

impl SourceKind {
    /// Map a file extension (without the dot) to a source kind.
    ///
    /// Returns None for anything unrecognized; callers turn that into an
    /// `UnsupportedInput` error before any model work happens.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "txt" => Some(SourceKind::Txt),
            "docx" => Some(SourceKind::Docx),
            _ => None,
        }
    }

    /// Determine the source kind from a file name.
    pub fn from_filename(name: &str) -> Result<Self> {
        let ext = name.rsplit('.').next().unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| {
            PratError::UnsupportedInput(format!(
                "Unsupported file type '{}'. Supported: pdf, txt, docx",
                ext
            ))
        })
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Pdf => write!(f, "pdf"),
            SourceKind::Txt => write!(f, "txt"),
            SourceKind::Docx => write!(f, "docx"),
            SourceKind::Web => write!(f, "web"),
        }
    }
}

/// Extract plain text from a file of the given kind.
pub fn extract_file(path: &Path, kind: SourceKind) -> Result<String> {
    debug!("Extracting {} text from {}", kind, path.display());
    match kind {
        SourceKind::Pdf => pdf::extract(path),
        SourceKind::Txt => extract_txt(path),
        SourceKind::Docx => docx::extract(path),
        SourceKind::Web => Err(PratError::UnsupportedInput(
            "Web sources are fetched by URL, not read from a file".to_string(),
        )),
    }
}

/// Read a plain-text file as UTF-8.
fn extract_txt(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)?;
    Ok(text)
}
