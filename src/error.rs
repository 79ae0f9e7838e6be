//! Error types for the resume-ingest library.
//!
//! Every error here is **fatal for one document**: the pipeline stops and the
//! caller decides whether to skip the file, retry with other settings, or
//! abort a batch. Heuristic misses (no e-mail, no date range, no name) are
//! never errors; they surface as empty fields in the structured record.

use std::path::PathBuf;
use thiserror::Error;

use crate::detect::DocumentType;

/// Boxed cause carried by [`ResumeParseError::ExtractionFailure`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors returned by the resume-ingest library.
#[derive(Debug, Error)]
pub enum ResumeParseError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The given path does not exist. Checked before any extraction.
    #[error("Résumé file not found: '{path}'\nCheck the path exists and is readable.")]
    MissingSourceFile { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Neither the extension nor the leading bytes identify a supported type.
    #[error(
        "Unsupported file type: '{path}'\nSupported formats: pdf, docx, jpg, jpeg, png, tiff."
    )]
    UnsupportedFormat { path: PathBuf },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The decoder for the detected format could not open or read the file.
    #[error("Failed to extract text from {format} '{path}': {source}")]
    ExtractionFailure {
        path: PathBuf,
        format: DocumentType,
        #[source]
        source: BoxedCause,
    },

    /// The raw bytes could not be read for the content checksum.
    #[error("Failed to checksum '{path}': {source}")]
    ChecksumFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the JSON output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parsed record could not be serialised.
    #[error("Failed to serialise parsed résumé: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResumeParseError {
    /// Wrap any decoder error as an [`ResumeParseError::ExtractionFailure`].
    pub(crate) fn extraction(
        path: impl Into<PathBuf>,
        format: DocumentType,
        source: impl Into<BoxedCause>,
    ) -> Self {
        ResumeParseError::ExtractionFailure {
            path: path.into(),
            format,
            source: source.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ResumeParseError>;
