//! Image text extraction: decode, normalise to grayscale PNG, run tesseract.
//!
//! Decoding happens in-process with the `image` crate so a corrupt or
//! mislabelled upload fails fast as an extraction error instead of reaching
//! the OCR engine. Tesseract always receives a lossless PNG regardless of the
//! source format, which keeps its input handling uniform across JPEG, PNG and
//! TIFF.

use super::ExtractedText;
use crate::detect::DocumentType;
use crate::error::{ResumeParseError, Result};
use image::{DynamicImage, ImageReader};
use std::io::{Cursor, Write};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// OCR extractor backed by the tesseract executable.
#[derive(Debug, Clone)]
pub struct ImageExtractor {
    kind: DocumentType,
    command: String,
    language: String,
}

impl ImageExtractor {
    pub fn new(kind: DocumentType, command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            kind,
            command: command.into(),
            language: language.into(),
        }
    }

    /// Recognise all text in the image. Images have no page concept: the
    /// page count is always 1.
    pub fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let fail = |e: Box<dyn std::error::Error + Send + Sync>| {
            ResumeParseError::extraction(path, self.kind, e)
        };

        let img = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| fail(e.into()))?
            .decode()
            .map_err(|e| fail(e.into()))?;
        debug!("Decoded {} → {}x{} px", self.kind, img.width(), img.height());

        let png = encode_for_ocr(&img).map_err(|e| fail(e.into()))?;
        let mut staged = tempfile::Builder::new()
            .prefix("resume-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| fail(e.into()))?;
        staged.write_all(&png).map_err(|e| fail(e.into()))?;
        staged.flush().map_err(|e| fail(e.into()))?;

        let text = self.run_tesseract(staged.path()).map_err(fail)?;
        debug!("OCR → {} chars", text.len());

        Ok(ExtractedText {
            text,
            page_count: 1,
        })
    }

    fn run_tesseract(
        &self,
        png: &Path,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new(&self.command)
            .arg(png)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| format!("could not run '{}': {e}", self.command))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Encode a decoded image as an 8-bit grayscale PNG.
///
/// Colour carries no information for OCR and dropping it shrinks the file
/// tesseract has to read.
pub fn encode_for_ocr(img: &DynamicImage) -> std::result::Result<Vec<u8>, image::ImageError> {
    let gray = DynamicImage::ImageLuma8(img.to_luma8());
    let mut buf = Vec::new();
    gray.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    Ok(buf)
}
