//! Format extractors: turn a document into raw text.
//!
//! One extractor per supported family, dispatched through the [`Extractor`]
//! enum rather than a trait object: the three decoders share nothing but
//! their `extract(path)` contract.
//!
//! ```text
//! pdf          ──▶ pdf    (pdfium, per-page text, true page count)
//! docx         ──▶ docx   (zip + WordprocessingML: body, tables, headers/footers)
//! jpg/png/tiff ──▶ image  (decode, grayscale PNG, tesseract)
//! ```
//!
//! Every extractor opens, fully reads, and releases its file before
//! returning. A decoder that cannot open the file at all yields
//! [`crate::error::ResumeParseError::ExtractionFailure`]; a document with no
//! text yields an empty string.

pub mod docx;
pub mod image;
pub mod pdf;

use crate::config::ParserConfig;
use crate::detect::DocumentType;
use crate::error::Result;
use std::path::Path;

pub use self::docx::DocxExtractor;
pub use self::image::ImageExtractor;
pub use self::pdf::PdfExtractor;

/// Separator placed between extracted fragments (pages, DOCX part groups).
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Raw text produced by an extractor, plus the page count it observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    /// True page count for PDFs; always 1 for DOCX and images.
    pub page_count: usize,
}

/// The extractor selected for one [`DocumentType`].
#[derive(Debug, Clone)]
pub enum Extractor {
    Pdf(PdfExtractor),
    Docx(DocxExtractor),
    Image(ImageExtractor),
}

impl Extractor {
    /// Pick the extractor for `kind`, configured from `config`.
    pub fn for_type(kind: DocumentType, config: &ParserConfig) -> Self {
        match kind {
            DocumentType::Pdf => Extractor::Pdf(PdfExtractor::new(config.resolved_pdfium_path())),
            DocumentType::Docx => Extractor::Docx(DocxExtractor),
            DocumentType::Jpg | DocumentType::Jpeg | DocumentType::Png | DocumentType::Tiff => {
                Extractor::Image(ImageExtractor::new(
                    kind,
                    &config.tesseract_command,
                    &config.ocr_language,
                ))
            }
        }
    }

    /// Short backend name, for logging.
    pub fn backend(&self) -> &'static str {
        match self {
            Extractor::Pdf(_) => "pdfium",
            Extractor::Docx(_) => "wordprocessingml",
            Extractor::Image(_) => "tesseract",
        }
    }

    /// Extract raw text from `path`.
    pub fn extract(&self, path: &Path) -> Result<ExtractedText> {
        match self {
            Extractor::Pdf(e) => e.extract(path),
            Extractor::Docx(e) => e.extract(path),
            Extractor::Image(e) => e.extract(path),
        }
    }
}

/// Concatenate fragments with a blank line between each.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    fragments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_keeps_empty_fragments() {
        assert_eq!(join_fragments(&["a", "", "b"]), "a\n\n\n\nb");
        assert_eq!(join_fragments::<&str>(&[]), "");
    }

    #[test]
    fn dispatch_by_type() {
        let config = ParserConfig::default();
        assert!(matches!(
            Extractor::for_type(DocumentType::Pdf, &config),
            Extractor::Pdf(_)
        ));
        assert!(matches!(
            Extractor::for_type(DocumentType::Docx, &config),
            Extractor::Docx(_)
        ));
        for kind in [
            DocumentType::Jpg,
            DocumentType::Jpeg,
            DocumentType::Png,
            DocumentType::Tiff,
        ] {
            let e = Extractor::for_type(kind, &config);
            assert_eq!(e.backend(), "tesseract");
        }
    }
}
