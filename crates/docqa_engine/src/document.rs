use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File extensions the ingestion service is known to accept. Advisory only:
/// nothing is rejected client-side.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "txt"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("path has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a document from disk, keeping only its final path component as the upload name.
pub fn load_document(path: &Path) -> Result<DocumentFile, DocumentError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| DocumentError::NoFileName(path.to_path_buf()))?;
    let bytes = fs::read(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(DocumentFile { file_name, bytes })
}

/// Whether `file_name` carries one of the [`ACCEPTED_EXTENSIONS`] (case-insensitive).
pub fn matches_accept_hint(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
}
