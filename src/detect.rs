//! Type detection: classify a résumé file into a [`DocumentType`].
//!
//! The extension is trusted first because résumé uploads almost always carry
//! a correct one. Only when it is missing or unknown do we read a short byte
//! prefix and compare it against the magic numbers of the supported formats.

use crate::error::{ResumeParseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of leading bytes read for signature sniffing.
const SNIFF_LEN: usize = 16;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Docx,
    Jpg,
    Jpeg,
    Png,
    Tiff,
}

impl DocumentType {
    /// Lowercase tag, identical to the recognised file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Docx => "docx",
            DocumentType::Jpg => "jpg",
            DocumentType::Jpeg => "jpeg",
            DocumentType::Png => "png",
            DocumentType::Tiff => "tiff",
        }
    }

    /// Map a file extension (case-insensitive, without the dot) to a type.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentType::Pdf),
            "docx" => Some(DocumentType::Docx),
            "jpg" => Some(DocumentType::Jpg),
            "jpeg" => Some(DocumentType::Jpeg),
            "png" => Some(DocumentType::Png),
            "tiff" => Some(DocumentType::Tiff),
            _ => None,
        }
    }

    /// Raster image formats handled by the OCR extractor.
    pub fn is_image(self) -> bool {
        matches!(
            self,
            DocumentType::Jpg | DocumentType::Jpeg | DocumentType::Png | DocumentType::Tiff
        )
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `path` into a [`DocumentType`].
///
/// Resolution order: known extension, then binary signature. The file must
/// exist; a missing path is reported as [`ResumeParseError::MissingSourceFile`]
/// before anything else is attempted.
pub fn detect_type(path: impl AsRef<Path>) -> Result<DocumentType> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ResumeParseError::MissingSourceFile {
            path: path.to_path_buf(),
        });
    }

    if let Some(kind) = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(DocumentType::from_extension)
    {
        debug!("Detected {} from extension: {}", kind, path.display());
        return Ok(kind);
    }

    let prefix = read_prefix(path)?;
    // A zip container is only a DOCX if it carries a WordprocessingML body.
    let kind = sniff_signature(&prefix).or_else(|| {
        (is_zip(&prefix) && is_wordprocessing_package(path)).then_some(DocumentType::Docx)
    });

    match kind {
        Some(kind) => {
            debug!("Detected {} from signature: {}", kind, path.display());
            Ok(kind)
        }
        None => Err(ResumeParseError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Match the leading bytes against the non-container signatures.
pub fn sniff_signature(prefix: &[u8]) -> Option<DocumentType> {
    if prefix.starts_with(b"%PDF") {
        Some(DocumentType::Pdf)
    } else if prefix.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(DocumentType::Jpg)
    } else if prefix.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(DocumentType::Png)
    } else if prefix.starts_with(b"II*\0") || prefix.starts_with(b"MM\0*") {
        Some(DocumentType::Tiff)
    } else {
        None
    }
}

fn is_zip(prefix: &[u8]) -> bool {
    prefix.starts_with(b"PK\x03\x04")
}

fn is_wordprocessing_package(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let Ok(mut archive) = zip::ZipArchive::new(file) else {
        return false;
    };
    let found = archive.by_name("word/document.xml").is_ok();
    found
}

fn read_prefix(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| open_error(path.to_path_buf(), e))?;
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)
        .map_err(|e| open_error(path.to_path_buf(), e))?;
    Ok(prefix)
}

fn open_error(path: PathBuf, e: std::io::Error) -> ResumeParseError {
    match e.kind() {
        ErrorKind::PermissionDenied => ResumeParseError::PermissionDenied { path },
        ErrorKind::NotFound => ResumeParseError::MissingSourceFile { path },
        _ => ResumeParseError::Internal(format!("Failed to read '{}': {e}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let p = dir.path().join(name);
        std::fs::write(&p, bytes).unwrap();
        p
    }

    #[test]
    fn extension_wins_over_content() {
        let dir = TempDir::new().unwrap();
        // PNG bytes under a .pdf name: extension is trusted.
        let p = write(&dir, "cv.PDF", &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(detect_type(&p).unwrap(), DocumentType::Pdf);
    }

    #[test]
    fn every_known_extension() {
        for ext in ["pdf", "docx", "jpg", "jpeg", "png", "tiff"] {
            let kind = DocumentType::from_extension(ext).unwrap();
            assert_eq!(kind.as_str(), ext);
        }
        assert_eq!(DocumentType::from_extension("tif"), None);
    }

    #[test]
    fn sniffs_pdf_without_extension() {
        let dir = TempDir::new().unwrap();
        let p = write(&dir, "upload", b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n");
        assert_eq!(detect_type(&p).unwrap(), DocumentType::Pdf);
    }

    #[test]
    fn sniffs_images() {
        assert_eq!(sniff_signature(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(DocumentType::Jpg));
        assert_eq!(sniff_signature(b"II*\0\x08\0\0\0"), Some(DocumentType::Tiff));
        assert_eq!(sniff_signature(b"MM\0*\0\0\0\x08"), Some(DocumentType::Tiff));
        assert_eq!(sniff_signature(b"GIF89a"), None);
    }

    #[test]
    fn sniffs_docx_container() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("resume.bin");
        let file = File::create(&p).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<w:document/>").unwrap();
        zip.finish().unwrap();

        assert_eq!(detect_type(&p).unwrap(), DocumentType::Docx);
    }

    #[test]
    fn plain_zip_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("archive.bin");
        let file = File::create(&p).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        zip.start_file("notes.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"hello").unwrap();
        zip.finish().unwrap();

        assert!(matches!(
            detect_type(&p),
            Err(ResumeParseError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn exe_without_signature_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let p = write(&dir, "setup.exe", b"MZ\x90\0\x03\0\0\0");
        let err = detect_type(&p).unwrap_err();
        assert!(
            matches!(err, ResumeParseError::UnsupportedFormat { .. }),
            "got: {err:?}"
        );
    }

    #[test]
    fn empty_file_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let p = write(&dir, "blank.dat", b"");
        assert!(matches!(
            detect_type(&p),
            Err(ResumeParseError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn missing_file_checked_first() {
        let err = detect_type("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, ResumeParseError::MissingSourceFile { .. }));
    }

    #[test]
    fn display_matches_tag() {
        assert_eq!(DocumentType::Jpeg.to_string(), "jpeg");
        assert!(DocumentType::Tiff.is_image());
        assert!(!DocumentType::Docx.is_image());
    }
}
