//! CLI binary for resume-ingest.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ParserConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use resume_ingest::{detect_type, parse_resume, parse_resume_to_file, ParsedResume, ParserConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Markdown text with a metadata header (stdout)
  resume-parse jane_doe.pdf

  # Plain normalised text, no heading conversion
  resume-parse --plain jane_doe.docx

  # Full record as JSON
  resume-parse --json scan.png > jane.json

  # Write the JSON record to a file
  resume-parse jane_doe.pdf -o out/jane.json

  # Just report the detected type
  resume-parse --detect-only upload.bin

SUPPORTED FORMATS:
  pdf               text layer via libpdfium
  docx              body, tables, headers and footers
  jpg jpeg png tiff OCR via the tesseract executable

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH           Path to libpdfium (file or directory)
  TESSERACT_CMD             Tesseract executable
  RESUME_PARSE_OCR_LANG     Tesseract language pack(s), e.g. eng+deu
  RUST_LOG                  Overrides -v / -q log filtering
"#;

/// Parse résumés (PDF, DOCX, images) into cleaned text and a structured record.
#[derive(Parser, Debug)]
#[command(
    name = "resume-parse",
    version,
    about = "Parse résumés (PDF, DOCX, images) into cleaned text and a structured record",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Résumé file: pdf, docx, jpg, jpeg, png or tiff.
    input: PathBuf,

    /// Skip markdown conversion; keep the normalised plain text.
    #[arg(long, env = "RESUME_PARSE_PLAIN")]
    plain: bool,

    /// Print the full parsed record as JSON instead of text.
    #[arg(long, env = "RESUME_PARSE_JSON")]
    json: bool,

    /// Write the JSON record to this file instead of stdout.
    #[arg(short, long, env = "RESUME_PARSE_OUTPUT")]
    output: Option<PathBuf>,

    /// Tesseract executable used for image OCR.
    #[arg(long = "tesseract", env = "TESSERACT_CMD", default_value = "tesseract")]
    tesseract: String,

    /// Tesseract language pack(s), passed as `-l`.
    #[arg(long, env = "RESUME_PARSE_OCR_LANG", default_value = "eng")]
    ocr_lang: String,

    /// Path to libpdfium (file or containing directory).
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Print the detected file type only, no parsing.
    #[arg(long)]
    detect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUME_PARSE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "RESUME_PARSE_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Detect-only mode ─────────────────────────────────────────────────
    if cli.detect_only {
        let kind = detect_type(&cli.input)
            .with_context(|| format!("Failed to detect type of {}", cli.input.display()))?;
        println!("{kind}");
        return Ok(());
    }

    let config = build_config(&cli)?;

    // ── Run parse ────────────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let parsed = parse_resume_to_file(&cli.input, output_path, &config)
            .context("Parsing failed")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} ({}, {} page(s))  →  {}",
                green("✔"),
                parsed.structured().meta.file_name,
                parsed.filetype(),
                parsed.structured().meta.page_count,
                bold(&output_path.display().to_string()),
            );
        }
        return Ok(());
    }

    let parsed = parse_resume(&cli.input, &config).context("Parsing failed")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.json {
        let json = parsed.to_json().context("Failed to serialise output")?;
        writeln!(handle, "{json}").context("Failed to write to stdout")?;
    } else {
        write_human(&mut handle, &parsed).context("Failed to write to stdout")?;
    }

    Ok(())
}

/// Map CLI args to `ParserConfig`.
fn build_config(cli: &Cli) -> Result<ParserConfig> {
    let mut builder = ParserConfig::builder()
        .convert_to_markdown(!cli.plain)
        .tesseract_command(&cli.tesseract)
        .ocr_language(&cli.ocr_lang);

    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_library_path(lib);
    }

    builder.build().context("Invalid configuration")
}

/// `[META]` line, `[TEXT]` marker, then the text.
fn write_human(out: &mut impl Write, parsed: &ParsedResume) -> io::Result<()> {
    writeln!(
        out,
        "[META] filetype={} source={}",
        parsed.filetype(),
        parsed.source().display()
    )?;
    writeln!(out, "[TEXT]")?;
    out.write_all(parsed.text().as_bytes())?;
    if !parsed.text().ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}
