//! Heuristic structuring: normalised text → [`StructuredSchema`].
//!
//! ## Algorithm
//!
//! 1. Split into lines, NFC-normalise, strip ATX heading markers.
//! 2. Scan: a section header line switches the current [`SectionTag`];
//!    every other non-empty line is appended to the current section
//!    (default [`SectionTag::Misc`]). Blank lines inside a section are kept
//!    as block boundaries.
//! 3. Candidate: name from the opening line, contact details from the first
//!    `contact_window` lines of `misc`.
//! 4. Experience: one entry per blank-line-separated block, with a
//!    normalised date range and its bullet lines.
//! 5. Skills: every comma/slash/semicolon separated token, as `hard`.
//! 6. Meta: checksum of the source bytes, UTC timestamp. `page_count` is
//!    left at 0 for the caller to fill from the extractor.
//!
//! Heuristic misses never fail the call; only reading the source file for
//! the checksum can.

use crate::config::ParserConfig;
use crate::error::{ResumeParseError, Result};
use crate::schema::{
    Candidate, Contact, ExperienceEntry, Meta, Sections, Skills, StructuredSchema,
};
use chrono::{Month, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

/// Default longest opening line, in words, accepted as a name.
pub const DEFAULT_MAX_NAME_WORDS: usize = 5;

/// Heading under which a line was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionTag {
    Misc,
    Experience,
    Education,
    Skills,
}

static RE_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(experience|work\s+history|education|skills?)[:\s]*$").unwrap()
});

static RE_ATX_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s+").unwrap());

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").unwrap());

static RE_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d ()-]{7,}").unwrap());

static RE_LINKEDIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/in/[a-z0-9_%-]+/?").unwrap()
});

static RE_GITHUB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[a-z0-9][a-z0-9-]*/?").unwrap()
});

static RE_DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\w+\s+\d{4})\s*[-–]\s*(present|\w+\s+\d{4})").unwrap()
});

/// Classify a whole line as a section header.
///
/// `work history` maps to [`SectionTag::Experience`].
pub fn section_tag(line: &str) -> Option<SectionTag> {
    let caps = RE_SECTION.captures(line.trim())?;
    let word = caps[1].to_lowercase();
    Some(if word == "experience" || word.starts_with("work") {
        SectionTag::Experience
    } else if word == "education" {
        SectionTag::Education
    } else {
        SectionTag::Skills
    })
}

/// Build the structured record for `text`, extracted from `source`.
pub fn to_schema(text: &str, source: &Path, config: &ParserConfig) -> Result<StructuredSchema> {
    let scan = scan_sections(text);
    debug!(
        "Structurer: {} lines, {} section(s)",
        scan.lines.len(),
        scan.sections.len()
    );

    let candidate = extract_candidate(&scan, config);
    let experience = extract_experience(scan.section(SectionTag::Experience));
    let skills = extract_skills(scan.section(SectionTag::Skills));

    let meta = Meta {
        checksum: checksum_file(source)?,
        parsed_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        file_name: source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        page_count: 0,
        parser_version: config.parser_version.clone(),
    };

    Ok(StructuredSchema {
        meta,
        candidate,
        sections: Sections {
            experience,
            skills,
            ..Sections::default()
        },
        ..StructuredSchema::default()
    })
}

// ── Line scan ────────────────────────────────────────────────────────────

/// Result of the section scan.
#[derive(Debug, Default)]
struct SectionScan {
    /// Every non-empty normalised line, headers included.
    lines: Vec<String>,
    /// Lines per section. An empty string marks a blank-line boundary.
    sections: BTreeMap<SectionTag, Vec<String>>,
}

impl SectionScan {
    fn section(&self, tag: SectionTag) -> &[String] {
        self.sections.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty lines of a section.
    fn content(&self, tag: SectionTag) -> impl Iterator<Item = &str> {
        self.section(tag)
            .iter()
            .map(String::as_str)
            .filter(|l| !l.is_empty())
    }
}

fn normalize_line(line: &str) -> String {
    let line: String = line.trim().nfc().collect();
    RE_ATX_MARKER.replace(&line, "").trim().to_string()
}

fn scan_sections(text: &str) -> SectionScan {
    let mut scan = SectionScan::default();
    let mut current = SectionTag::Misc;

    for raw in text.lines() {
        let line = normalize_line(raw);
        if line.is_empty() {
            // Boundary only between content; never leading or doubled.
            if let Some(lines) = scan.sections.get_mut(&current) {
                if lines.last().is_some_and(|l| !l.is_empty()) {
                    lines.push(String::new());
                }
            }
            continue;
        }

        scan.lines.push(line.clone());
        if let Some(tag) = section_tag(&line) {
            current = tag;
            continue;
        }
        scan.sections.entry(current).or_default().push(line);
    }

    scan
}

// ── Candidate ────────────────────────────────────────────────────────────

fn extract_candidate(scan: &SectionScan, config: &ParserConfig) -> Candidate {
    let window = scan
        .content(SectionTag::Misc)
        .take(config.contact_window)
        .collect::<Vec<_>>()
        .join("\n");

    let first_match = |re: &Regex| {
        re.find(&window)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };

    let full_name = scan
        .lines
        .first()
        .filter(|l| l.split_whitespace().count() <= config.max_name_words)
        .cloned()
        .unwrap_or_default();

    Candidate {
        full_name,
        contact: Contact {
            email: first_match(&RE_EMAIL),
            phone: first_match(&RE_PHONE),
            location: String::new(),
            linkedin: first_match(&RE_LINKEDIN),
            github: first_match(&RE_GITHUB),
        },
        summary: String::new(),
    }
}

// ── Experience ───────────────────────────────────────────────────────────

fn extract_experience(lines: &[String]) -> Vec<ExperienceEntry> {
    let joined = lines.join("\n");
    joined
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(experience_entry)
        .collect()
}

fn experience_entry(block: &str) -> ExperienceEntry {
    let (start_date, end_date) = match RE_DATE_RANGE.captures(block) {
        Some(caps) => {
            let start = normalize_date(&caps[1]);
            let end = normalize_date(&caps[2]);
            if start.is_empty() || end.is_empty() {
                warn!("Unparseable date range '{}'", &caps[0]);
            }
            (start, end)
        }
        None => (String::new(), String::new()),
    };

    let bullets = block
        .lines()
        .filter(|l| l.starts_with('-') || l.starts_with('•'))
        .map(|l| {
            l.trim_start_matches(|c| matches!(c, '-' | '•' | ' '))
                .to_string()
        })
        .collect();

    ExperienceEntry {
        start_date,
        end_date,
        bullets,
        ..ExperienceEntry::default()
    }
}

/// Normalise one end of a date range to `YYYY-MM`, `present`, or `""`.
///
/// Accepts a month name (full or three-letter, any case, `Sept` too) or a
/// month number, followed by a four-digit year.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("present") {
        return "present".to_string();
    }
    parse_month_year(raw)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

fn parse_month_year(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split_whitespace();
    let (month, year) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month_number(month)?, 1)
}

fn month_number(token: &str) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let token = token.trim_end_matches('.');
    let token = if token.eq_ignore_ascii_case("sept") {
        "sep"
    } else {
        token
    };
    token.parse::<Month>().ok().map(|m| m.number_from_month())
}

// ── Skills ───────────────────────────────────────────────────────────────

fn extract_skills(lines: &[String]) -> Skills {
    let joined = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    let hard = joined
        .split(|c| matches!(c, ',' | '/' | ';'))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Skills {
        hard,
        soft: Vec::new(),
    }
}

// ── Checksum ─────────────────────────────────────────────────────────────

/// `sha256:<hex>` of the file's raw bytes, streamed.
pub fn checksum_file(path: &Path) -> Result<String> {
    let fail = |source| ResumeParseError::ChecksumFailed {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(fail)?;
    let mut reader = BufReader::with_capacity(8192, file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(fail)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("sha256:{:x}", hasher.finalize()))
}
