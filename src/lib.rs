//! # resume-ingest
//!
//! Turn a résumé document (PDF, DOCX, or a scanned image) into cleaned text
//! and a structured record ready for downstream scoring and feedback.
//!
//! ## Pipeline Overview
//!
//! ```text
//! résumé file
//!  │
//!  ├─ 1. Detect     extension, then magic bytes → DocumentType
//!  ├─ 2. Extract    pdfium (PDF) · WordprocessingML (DOCX) · tesseract (images)
//!  ├─ 3. Normalise  line endings, invisible chars, boilerplate, blank lines
//!  ├─ 4. Markup     optional ATX headings + `-` bullets
//!  ├─ 5. Structure  sections, contact, experience, skills, checksum
//!  └─ 6. Assemble   ParsedResume { text, metadata, structured }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_ingest::{parse_resume, ParserConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ParserConfig::default();
//!     let parsed = parse_resume("jane_doe.docx", &config)?;
//!     println!("{}", parsed.structured().candidate.full_name);
//!     println!("{}", parsed.to_json()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Native Backends
//!
//! PDF extraction binds libpdfium at runtime: set
//! [`ParserConfig::pdfium_library_path`] or `PDFIUM_LIB_PATH`, otherwise the
//! system library is used. Image OCR runs the `tesseract` executable.
//! DOCX needs neither.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume-parse` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! resume-ingest = { version = "0.4", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod clean;
pub mod config;
pub mod detect;
pub mod error;
pub mod extract;
pub mod handoff;
pub mod markup;
pub mod output;
pub mod parse;
pub mod schema;
pub mod structure;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ParserConfig, ParserConfigBuilder};
pub use detect::{detect_type, DocumentType};
pub use error::{ResumeParseError, Result};
pub use handoff::{FeedbackRequest, InsightsRequest, ScoringRequest};
pub use output::{ParsedResume, ResumeMetadata};
pub use parse::{parse_resume, parse_resume_bytes, parse_resume_to_file};
pub use schema::StructuredSchema;
