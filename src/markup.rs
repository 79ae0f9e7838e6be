//! Markup conversion: normalised plain text → ATX-heading markdown.
//!
//! Line-oriented and conservative. Only three kinds of line are rewritten:
//!
//! | Input line                      | Output                 |
//! |---------------------------------|------------------------|
//! | section header (`Experience:`)  | `## Experience`        |
//! | opening line passing name test  | `# Jane Doe`           |
//! | `•` bullet                      | `- <item>`             |
//!
//! Everything else passes through unchanged, and a blank line is placed
//! before each section heading. The structurer strips heading markers and
//! accepts both `-` and `•` bullets, so converted and plain text produce
//! the same record. Markers it would not read as bullets (`*`, `·`) are
//! left alone for the same reason.

use crate::structure::section_tag;

/// One converted line, and whether it opens a section.
struct Converted {
    text: String,
    opens_section: bool,
}

/// Convert normalised text to markdown.
///
/// `max_name_words` is the longest opening line promoted to a `#` title.
pub fn to_markdown(text: &str, max_name_words: usize) -> String {
    let mut converted = Vec::new();
    let mut seen_content = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            converted.push(Converted {
                text: String::new(),
                opens_section: false,
            });
            continue;
        }

        let (out, opens_section) = if let Some(title) = atx_heading(trimmed) {
            (trimmed.to_string(), section_tag(title).is_some())
        } else if section_tag(trimmed).is_some() {
            (format!("## {}", header_title(trimmed)), true)
        } else if let Some(item) = bullet_item(trimmed) {
            (format!("- {item}"), false)
        } else if !seen_content && trimmed.split_whitespace().count() <= max_name_words {
            (format!("# {trimmed}"), false)
        } else {
            (line.to_string(), false)
        };
        seen_content = true;
        converted.push(Converted {
            text: out,
            opens_section,
        });
    }

    normalise_heading_spacing(&converted)
}

/// `"Skills :"` → `"Skills"`.
fn header_title(line: &str) -> &str {
    line.trim_end_matches(|c: char| c == ':' || c.is_whitespace())
}

/// The title of an existing ATX heading (`#` to `######` then whitespace).
///
/// `#1 ranked seller` is content, not a heading.
fn atx_heading(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches('#');
    let level = line.len() - rest.len();
    if (1..=6).contains(&level) && rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// The item text of a `•` bullet line.
///
/// `-` bullets are already markdown and are left alone.
fn bullet_item(line: &str) -> Option<&str> {
    line.strip_prefix('•').map(str::trim_start)
}

/// Ensure exactly one blank line before each section heading (except at the
/// start). Other lines keep their spacing.
fn normalise_heading_spacing(lines: &[Converted]) -> String {
    let len: usize = lines.iter().map(|l| l.text.len() + 1).sum();
    let mut result = String::with_capacity(len + 64);
    for line in lines {
        if line.opens_section {
            let trimmed = result.trim_end_matches('\n');
            result.truncate(trimmed.len());
            if !result.is_empty() {
                result.push_str("\n\n");
            }
        }
        result.push_str(&line.text);
        result.push('\n');
    }
    result.trim_end().to_string()
}
