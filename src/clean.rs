//! Text normalisation: deterministic cleanup of extracted résumé text.
//!
//! Extractors hand over text with whatever the backend left in it: CRLF line
//! endings from pdfium, zero-width characters from PDF generators, page
//! numbers and "Curriculum Vitae" banners repeated on every page, and runs
//! of blank lines from OCR. The structurer's section and block detection
//! assumes none of that is present.
//!
//! ## Rule Order
//!
//! Boilerplate lines are stripped before whitespace is collapsed, so the gap
//! a removed line leaves behind is folded into the surrounding blank lines.
//! The whole pass is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all normalisation rules to raw extracted text.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF/CR → LF)
/// 2. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, etc.)
/// 3. Remove boilerplate lines (page numbers, "Curriculum Vitae" banners)
/// 4. Trim trailing whitespace per line
/// 5. Collapse 3+ consecutive newlines to one blank line
/// 6. Trim the whole document
pub fn normalize(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = remove_invisible_chars(&s);
    let s = strip_boilerplate(&s);
    normalize_whitespace(&s)
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 3: Strip boilerplate lines ──────────────────────────────────────────

static RE_BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:page\s+\d+(?:\s+of\s+\d+)?|curriculum\s+vitae)\s*$").unwrap()
});

/// Drop whole lines that are only a page number or a "Curriculum Vitae" header.
///
/// The pattern is anchored at both ends: "Page 2" and "page 3 of 4" go,
/// "Page 2 of a larger discussion" stays.
pub fn strip_boilerplate(input: &str) -> String {
    input
        .lines()
        .filter(|line| !RE_BOILERPLATE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rules 4–6: Whitespace ────────────────────────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Trim line ends, fold runs of blank lines to one, trim the document.
pub fn normalize_whitespace(input: &str) -> String {
    let s = trim_trailing_whitespace(input);
    let s = collapse_blank_lines(&s);
    s.trim().to_string()
}

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────
