//! PDF text extraction via pdfium.
//!
//! libpdfium is bound inside each [`PdfExtractor::extract`] call and
//! released when it returns, together with the document and its pages.
//! Nothing is shared between calls, so each call honours its own
//! `library_path`.

use super::{join_fragments, ExtractedText};
use crate::detect::DocumentType;
use crate::error::{ResumeParseError, Result};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extracts per-page text and the true page count from a PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    library_path: Option<PathBuf>,
}

impl PdfExtractor {
    /// `library_path` may name libpdfium itself or the directory holding it.
    /// `None` binds the system library.
    pub fn new(library_path: Option<PathBuf>) -> Self {
        Self { library_path }
    }

    pub fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let pdfium = bind(self.library_path.as_deref())
            .map_err(|detail| ResumeParseError::extraction(path, DocumentType::Pdf, detail))?;

        let document = pdfium.load_pdf_from_file(path, None).map_err(|e| {
            ResumeParseError::extraction(path, DocumentType::Pdf, format!("{e:?}"))
        })?;

        let pages = document.pages();
        let page_count = pages.len() as usize;
        info!("PDF loaded: {} pages", page_count);

        let mut fragments = Vec::with_capacity(page_count);
        for (idx, page) in pages.iter().enumerate() {
            // A page without a text layer contributes an empty fragment.
            let text = match page.text() {
                Ok(text) => text.all(),
                Err(e) => {
                    warn!("No text layer on page {}: {:?}", idx + 1, e);
                    String::new()
                }
            };
            debug!("Page {} → {} chars", idx + 1, text.len());
            fragments.push(text);
        }

        Ok(ExtractedText {
            text: join_fragments(&fragments),
            page_count,
        })
    }
}

/// Whether libpdfium can be bound with the given (or default) location.
pub fn pdfium_available(library_path: Option<&Path>) -> bool {
    bind(library_path).is_ok()
}

fn bind(library_path: Option<&Path>) -> std::result::Result<Pdfium, String> {
    let bindings = match library_path {
        Some(p) if p.is_dir() => {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(p))
        }
        Some(p) => Pdfium::bind_to_library(p),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| {
        format!("failed to bind libpdfium ({e:?}); set PDFIUM_LIB_PATH or pass --pdfium-lib")
    })?;
    debug!("Bound libpdfium");
    Ok(Pdfium::new(bindings))
}
