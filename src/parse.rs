//! Parse entry points: run the full pipeline for one document.
//!
//! ```text
//! detect ─▶ extract ─▶ normalise ─▶ [markdown] ─▶ structure ─▶ ParsedResume
//! ```
//!
//! Everything runs on the calling thread. The extractors are the only stage
//! with native dependencies; every other stage is a pure function of its
//! input text.

use crate::clean;
use crate::config::ParserConfig;
use crate::detect::detect_type;
use crate::error::{ResumeParseError, Result};
use crate::extract::Extractor;
use crate::markup;
use crate::output::{ParsedResume, ResumeMetadata};
use crate::structure;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Parse a résumé file into text, metadata and a structured record.
///
/// # Errors
/// Fatal for this document only:
/// - file missing or unreadable
/// - type not one of pdf, docx, jpg, jpeg, png, tiff
/// - the format's decoder cannot open the file
///
/// A readable document that yields little or no text is *not* an error; the
/// structured record simply has empty fields.
pub fn parse_resume(path: impl AsRef<Path>, config: &ParserConfig) -> Result<ParsedResume> {
    let start = Instant::now();
    let path = path.as_ref();
    info!("Parsing résumé: {}", path.display());

    // ── Step 1: Detect ───────────────────────────────────────────────────
    let filetype = detect_type(path)?;
    let source = resolve_source(path)?;
    debug!("Detected {} for {}", filetype, source.display());

    // ── Step 2: Extract ──────────────────────────────────────────────────
    let extractor = Extractor::for_type(filetype, config);
    let extracted = extractor.extract(&source)?;
    info!(
        "Extracted {} chars from {} page(s) via {}",
        extracted.text.len(),
        extracted.page_count,
        extractor.backend()
    );

    // ── Step 3: Normalise ────────────────────────────────────────────────
    let mut text = clean::normalize(&extracted.text);

    // ── Step 4: Markup (optional) ────────────────────────────────────────
    if config.convert_to_markdown {
        text = markup::to_markdown(&text, config.max_name_words);
    }

    // ── Step 5: Structure ────────────────────────────────────────────────
    let mut structured = structure::to_schema(&text, &source, config)?;
    structured.meta.page_count = extracted.page_count;

    info!(
        "Parsed {} in {}ms: {} experience block(s), {} skill(s)",
        structured.meta.file_name,
        start.elapsed().as_millis(),
        structured.sections.experience.len(),
        structured.sections.skills.hard.len()
    );

    // ── Step 6: Assemble ─────────────────────────────────────────────────
    Ok(ParsedResume::new(
        text,
        ResumeMetadata { filetype, source },
        structured,
    ))
}

/// Parse a résumé held in memory.
///
/// The bytes are written to a managed temporary directory as `file_name`,
/// so the extension still drives detection and `meta.file_name` is the
/// caller's name. The directory is removed on return, so
/// [`ParsedResume::source`] names a path that no longer exists.
pub fn parse_resume_bytes(
    bytes: &[u8],
    file_name: &str,
    config: &ParserConfig,
) -> Result<ParsedResume> {
    let name = Path::new(file_name)
        .file_name()
        .filter(|n| n.len() == file_name.len())
        .ok_or_else(|| {
            ResumeParseError::InvalidConfig(format!(
                "'{file_name}' is not a bare file name"
            ))
        })?;

    let dir = tempfile::TempDir::new()
        .map_err(|e| ResumeParseError::Internal(format!("tempdir: {e}")))?;
    let path = dir.path().join(name);
    std::fs::write(&path, bytes)
        .map_err(|e| ResumeParseError::Internal(format!("tempfile write: {e}")))?;
    // `dir` is dropped (and the file deleted) after parsing returns
    parse_resume(&path, config)
}

/// Parse a résumé and write its JSON view to `output_path`.
///
/// Uses atomic write (temp file + rename) so readers never see a partial
/// file. Parent directories are created as needed.
pub fn parse_resume_to_file(
    path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ParserConfig,
) -> Result<ParsedResume> {
    let parsed = parse_resume(path, config)?;
    let out = output_path.as_ref();
    let json = parsed.to_json()?;

    let write_err = |source| ResumeParseError::OutputWriteFailed {
        path: out.to_path_buf(),
        source,
    };

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = out.with_extension("json.tmp");
    std::fs::write(&tmp_path, json).map_err(write_err)?;
    std::fs::rename(&tmp_path, out).map_err(write_err)?;
    info!("Wrote {}", out.display());

    Ok(parsed)
}

fn resolve_source(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => ResumeParseError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ResumeParseError::MissingSourceFile {
            path: path.to_path_buf(),
        },
    })
}
