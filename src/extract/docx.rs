//! DOCX text extraction.
//!
//! A DOCX file is a zip of WordprocessingML parts. Output order is fixed and
//! downstream heuristics rely on it:
//!
//! 1. body paragraphs (non-empty, document order)
//! 2. table cell text (row-major, non-empty)
//! 3. section header then footer paragraphs (non-empty, section order)
//!
//! Lines inside a group are joined with `\n`; the groups themselves are
//! separated by a blank line.

use super::{join_fragments, ExtractedText};
use crate::detect::DocumentType;
use crate::error::{ResumeParseError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";

/// Extracts body, table, and header/footer text from a DOCX package.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let fail = |e: Box<dyn std::error::Error + Send + Sync>| {
            ResumeParseError::extraction(path, DocumentType::Docx, e)
        };

        let file = File::open(path).map_err(|e| fail(e.into()))?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| fail(e.into()))?;

        let body_xml = read_part(&mut archive, DOCUMENT_PART).map_err(fail)?;
        let body = parse_part(&body_xml).map_err(|e| fail(e.into()))?;
        debug!(
            "DOCX body: {} paragraphs, {} cells, {} sections",
            body.paragraphs.len(),
            body.cells.len(),
            body.sections.len()
        );

        let relationships = match read_part(&mut archive, DOCUMENT_RELS) {
            Ok(xml) => parse_relationships(&xml).map_err(|e| fail(e.into()))?,
            Err(_) => HashMap::new(),
        };
        let boilerplate = section_boilerplate(&mut archive, &body.sections, &relationships);

        let groups: Vec<String> = [body.paragraphs, body.cells, boilerplate]
            .into_iter()
            .filter(|lines| !lines.is_empty())
            .map(|lines| lines.join("\n"))
            .collect();

        Ok(ExtractedText {
            text: join_fragments(&groups),
            page_count: 1,
        })
    }
}

// ── Part parsing ─────────────────────────────────────────────────────────

/// Default header/footer relationship ids declared by one `w:sectPr`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SectionRefs {
    header: Option<String>,
    footer: Option<String>,
}

/// Text collected from one WordprocessingML part.
#[derive(Debug, Default)]
struct PartText {
    /// Top-level paragraphs (outside tables and text boxes), trimmed, non-empty.
    paragraphs: Vec<String>,
    /// Top-level table cells, row-major, trimmed, non-empty.
    cells: Vec<String>,
    sections: Vec<SectionRefs>,
}

fn parse_part(xml: &str) -> std::result::Result<PartText, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut out = PartText::default();

    let mut table_depth = 0usize;
    let mut textbox_depth = 0usize;
    let mut in_text = false;
    let mut paragraph: Option<String> = None;
    let mut cell: Option<Vec<String>> = None;
    let mut section: Option<SectionRefs> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:txbxContent" => textbox_depth += 1,
                b"w:tc" if table_depth == 1 => cell = Some(Vec::new()),
                b"w:p" if textbox_depth == 0 => paragraph = Some(String::new()),
                b"w:t" => in_text = true,
                b"w:sectPr" => section = Some(SectionRefs::default()),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" if textbox_depth == 0 => push_char(&mut paragraph, '\t'),
                b"w:br" | b"w:cr" if textbox_depth == 0 => push_char(&mut paragraph, '\n'),
                b"w:headerReference" | b"w:footerReference" => {
                    if let Some(refs) = section.as_mut() {
                        record_reference(refs, &e)?;
                    }
                }
                b"w:sectPr" => out.sections.push(SectionRefs::default()),
                _ => {}
            },
            Event::Text(t) if in_text && textbox_depth == 0 => {
                if let Some(p) = paragraph.as_mut() {
                    p.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" if textbox_depth == 0 => {
                    if let Some(p) = paragraph.take() {
                        match table_depth {
                            0 => push_trimmed(&mut out.paragraphs, &p),
                            1 => {
                                if let Some(c) = cell.as_mut() {
                                    c.push(p);
                                }
                            }
                            // nested tables are not part of the outer cell text
                            _ => {}
                        }
                    }
                }
                b"w:tc" if table_depth == 1 => {
                    if let Some(c) = cell.take() {
                        push_trimmed(&mut out.cells, &c.join("\n"));
                    }
                }
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:txbxContent" => textbox_depth = textbox_depth.saturating_sub(1),
                b"w:sectPr" => {
                    if let Some(refs) = section.take() {
                        out.sections.push(refs);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

fn push_char(paragraph: &mut Option<String>, c: char) {
    if let Some(p) = paragraph.as_mut() {
        p.push(c);
    }
}

fn push_trimmed(lines: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        lines.push(text.to_string());
    }
}

/// Keep only `default` (or untyped) header/footer references.
fn record_reference(
    refs: &mut SectionRefs,
    e: &BytesStart<'_>,
) -> std::result::Result<(), quick_xml::Error> {
    let mut kind = None;
    let mut id = None;
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        match attr.key.as_ref() {
            b"w:type" => kind = Some(attr.unescape_value()?.into_owned()),
            b"r:id" => id = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }
    if kind.as_deref().is_some_and(|k| k != "default") {
        return Ok(());
    }
    match e.name().as_ref() {
        b"w:headerReference" => refs.header = id,
        _ => refs.footer = id,
    }
    Ok(())
}

/// Map relationship id → zip entry name for `word/document.xml`.
fn parse_relationships(xml: &str) -> std::result::Result<HashMap<String, String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    match attr.key.as_ref() {
                        b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, part_name(&target));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(targets)
}

/// Resolve a relationship target relative to `word/`.
fn part_name(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("word/{target}"),
    }
}

// ── Headers & footers ────────────────────────────────────────────────────

/// Header then footer paragraphs for every section, in section order.
///
/// A section without its own reference inherits the previous section's.
/// Each part contributes once even when several sections share it.
fn section_boilerplate<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    sections: &[SectionRefs],
    relationships: &HashMap<String, String>,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut seen = HashSet::new();
    let mut current = SectionRefs::default();

    for refs in sections {
        if refs.header.is_some() {
            current.header = refs.header.clone();
        }
        if refs.footer.is_some() {
            current.footer = refs.footer.clone();
        }

        for id in [&current.header, &current.footer].into_iter().flatten() {
            let Some(name) = relationships.get(id) else {
                warn!("DOCX section references unknown relationship '{}'", id);
                continue;
            };
            if !seen.insert(name.clone()) {
                continue;
            }
            match read_part(archive, name).map(|xml| parse_part(&xml)) {
                Ok(Ok(part)) => lines.extend(part.paragraphs),
                Ok(Err(e)) => warn!("Skipping malformed DOCX part '{}': {}", name, e),
                Err(e) => warn!("Skipping missing DOCX part '{}': {}", name, e),
            }
        }
    }

    lines
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut entry = archive.by_name(name)?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}
