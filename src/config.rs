//! Configuration types for résumé parsing.
//!
//! All parsing behaviour is controlled through [`ParserConfig`], built via
//! its [`ParserConfigBuilder`]. Native backends (libpdfium, the tesseract
//! executable) are located from here so the pipeline itself never reads the
//! environment.

use crate::error::ResumeParseError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default value written to `meta.parser_version`.
pub const DEFAULT_PARSER_VERSION: &str = "0.4.0";

/// Configuration for a single `parse_resume` call.
///
/// # Example
/// ```rust
/// use resume_ingest::ParserConfig;
///
/// let config = ParserConfig::builder()
///     .convert_to_markdown(false)
///     .ocr_language("eng+deu")
///     .build()
///     .unwrap();
/// assert!(!config.convert_to_markdown);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Run the markup converter on the normalised text. Default: true.
    pub convert_to_markdown: bool,

    /// Explicit path to libpdfium (file or containing directory).
    ///
    /// When `None`, `PDFIUM_LIB_PATH` is consulted, then the system library.
    pub pdfium_library_path: Option<PathBuf>,

    /// Tesseract executable used for image OCR. Default: `"tesseract"`.
    pub tesseract_command: String,

    /// Tesseract language pack(s), passed as `-l`. Default: `"eng"`.
    pub ocr_language: String,

    /// Version string recorded in `meta.parser_version`.
    pub parser_version: String,

    /// How many leading `misc` lines are searched for contact details. Default: 15.
    pub contact_window: usize,

    /// Longest opening line, in words, still accepted as a full name. Default: 5.
    pub max_name_words: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            convert_to_markdown: true,
            pdfium_library_path: None,
            tesseract_command: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            parser_version: DEFAULT_PARSER_VERSION.to_string(),
            contact_window: 15,
            max_name_words: crate::structure::DEFAULT_MAX_NAME_WORDS,
        }
    }
}

impl ParserConfig {
    /// Create a new builder for `ParserConfig`.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder {
            config: Self::default(),
        }
    }

    /// The libpdfium location to bind, if one was configured.
    pub fn resolved_pdfium_path(&self) -> Option<PathBuf> {
        self.pdfium_library_path.clone().or_else(|| {
            std::env::var_os("PDFIUM_LIB_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }
}

/// Builder for [`ParserConfig`].
#[derive(Debug)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    pub fn convert_to_markdown(mut self, v: bool) -> Self {
        self.config.convert_to_markdown = v;
        self
    }

    pub fn pdfium_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library_path = Some(path.into());
        self
    }

    pub fn tesseract_command(mut self, cmd: impl Into<String>) -> Self {
        self.config.tesseract_command = cmd.into();
        self
    }

    pub fn ocr_language(mut self, lang: impl Into<String>) -> Self {
        self.config.ocr_language = lang.into();
        self
    }

    pub fn parser_version(mut self, version: impl Into<String>) -> Self {
        self.config.parser_version = version.into();
        self
    }

    pub fn contact_window(mut self, lines: usize) -> Self {
        self.config.contact_window = lines;
        self
    }

    pub fn max_name_words(mut self, words: usize) -> Self {
        self.config.max_name_words = words;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ParserConfig, ResumeParseError> {
        let c = &self.config;
        if c.tesseract_command.trim().is_empty() {
            return Err(ResumeParseError::InvalidConfig(
                "Tesseract command must not be empty".into(),
            ));
        }
        if c.ocr_language.trim().is_empty() {
            return Err(ResumeParseError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        if c.parser_version.trim().is_empty() {
            return Err(ResumeParseError::InvalidConfig(
                "Parser version must not be empty".into(),
            ));
        }
        if c.contact_window == 0 {
            return Err(ResumeParseError::InvalidConfig(
                "Contact window must be ≥ 1 line".into(),
            ));
        }
        if c.max_name_words == 0 {
            return Err(ResumeParseError::InvalidConfig(
                "Name word limit must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
