//! Document Text Extractor — file on disk + declared extension → plain text.
//!
//! Exactly two formats are supported. The declared extension drives dispatch
//! so the caller's validation decision is authoritative; sniffing file
//! contents is deliberately not attempted.

mod docx;

use std::path::Path;

use crate::errors::AppError;

/// Extracts the concatenated plain text of a document.
///
/// `declared_extension` is compared case-insensitively against `pdf` and
/// `docx`; anything else is `UnsupportedFormat`. Parser failures come back
/// as `DocumentRead` with the original cause attached. The file is read,
/// never modified.
pub fn extract_text(path: &Path, declared_extension: &str) -> Result<String, AppError> {
    match declared_extension.to_ascii_lowercase().as_str() {
        "pdf" => pdf_extract::extract_text(path).map_err(|e| AppError::DocumentRead {
            path: path.to_path_buf(),
            source: anyhow::anyhow!("pdf extraction failed: {e}"),
        }),
        "docx" => {
            let bytes = std::fs::read(path).map_err(|e| AppError::DocumentRead {
                path: path.to_path_buf(),
                source: anyhow::Error::new(e),
            })?;
            docx::extract_text(&bytes).map_err(|e| AppError::DocumentRead {
                path: path.to_path_buf(),
                source: e,
            })
        }
        other => Err(AppError::UnsupportedFormat(other.to_string())),
    }
}
