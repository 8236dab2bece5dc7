use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::error::AnalyzeError;

pub const PDF_MIME: &str = "application/pdf";
const FALLBACK_MIME: &str = "application/octet-stream";

/// A resume picked for analysis.
///
/// Bytes are shared, so cloning a file into the in-flight request is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk. The MIME type is taken from the extension, the
    /// same way a browser labels a picked file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read resume at {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_for_name(&name);
        Ok(Self::new(name, mime, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.mime.eq_ignore_ascii_case(PDF_MIME)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

pub fn mime_for_name(name: &str) -> &'static str {
    let is_pdf = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        PDF_MIME
    } else {
        FALLBACK_MIME
    }
}

/// Gate applied before anything is sent: the file must be labelled as a PDF.
pub fn validate_resume(file: &ResumeFile) -> Result<(), AnalyzeError> {
    if file.is_pdf() {
        Ok(())
    } else {
        Err(AnalyzeError::InvalidFileType {
            name: file.name.clone(),
            mime: file.mime.clone(),
        })
    }
}

/// Pick the single file to analyze from a multi-file selection or drop.
/// Only the first file is considered.
pub fn first_file(files: Vec<ResumeFile>) -> Result<ResumeFile, AnalyzeError> {
    files.into_iter().next().ok_or(AnalyzeError::NoFileSelected)
}
