//! Document text sources.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SourceError;

/// Extensions read directly as text.
const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "ocr"];

/// Kind of file the text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Plain text or OCR output.
    Text,
    /// Embedded text layer of a PDF.
    Pdf,
}

/// Raw text of one document plus where it came from.
#[derive(Debug, Clone)]
pub struct DocumentText {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub text: String,
}

impl DocumentText {
    /// Read the text of a document on disk.
    ///
    /// PDFs yield only their embedded text layer; a scanned PDF comes back
    /// with empty text.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let (kind, text) = if TEXT_EXTENSIONS.contains(&extension.as_str()) {
            let bytes = std::fs::read(path)?;
            (SourceKind::Text, String::from_utf8_lossy(&bytes).into_owned())
        } else if extension == "pdf" {
            (SourceKind::Pdf, read_pdf_text(path)?)
        } else {
            return Err(SourceError::Unsupported(if extension.is_empty() {
                path.display().to_string()
            } else {
                extension
            }));
        };

        debug!(
            "Read {} characters from {}",
            text.chars().count(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            text,
        })
    }

    /// File name without directories, for promotion records.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File stem, used for per-document output names.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }
}

#[cfg(feature = "pdf")]
fn read_pdf_text(path: &Path) -> Result<String, SourceError> {
    let data = std::fs::read(path)?;
    pdf_extract::extract_text_from_mem(&data).map_err(|e| SourceError::Pdf(e.to_string()))
}

#[cfg(not(feature = "pdf"))]
fn read_pdf_text(_path: &Path) -> Result<String, SourceError> {
    Err(SourceError::Unsupported("pdf".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_reads_text_files_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.OCR");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"Carrier: Anthem\n\xffend").unwrap();

        let doc = DocumentText::from_path(&path).unwrap();
        assert_eq!(doc.kind, SourceKind::Text);
        assert!(doc.text.starts_with("Carrier: Anthem\n"));
        assert!(doc.text.contains('\u{FFFD}'));
        assert_eq!(doc.file_name(), "summary.OCR");
        assert_eq!(doc.stem(), "summary");
    }

    #[test]
    fn test_rejects_unknown_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"not text").unwrap();

        match DocumentText::from_path(&path) {
            Err(SourceError::Unsupported(ext)) => assert_eq!(ext, "png"),
            other => panic!("expected unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = DocumentText::from_path(Path::new("/nonexistent/plan.txt"));
        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}
