//! Fixture builders shared by the integration tests.
//!
//! Every fixture is generated into a `TempDir` at test time; nothing binary
//! is checked in.

#![allow(dead_code, unused_macros)]

use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const JANE_LINES: &[&str] = &[
    "Jane Doe",
    "jane@x.com",
    "+1 555-0100",
    "",
    "Experience:",
    "Acme Corp",
    "June 2020 - Present",
    "- Built thing",
    "",
    "Skills:",
    "Python, SQL",
];

const W_NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `<w:p>` for one line of text; an empty line becomes an empty paragraph.
pub fn paragraph(text: &str) -> String {
    if text.is_empty() {
        "<w:p/>".to_string()
    } else {
        format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", escape(text))
    }
}

/// A one-row table with one cell per entry.
pub fn table_row(cells: &[&str]) -> String {
    let cells: String = cells
        .iter()
        .map(|c| format!("<w:tc>{}</w:tc>", paragraph(c)))
        .collect();
    format!("<w:tbl><w:tr>{cells}</w:tr></w:tbl>")
}

/// Minimal DOCX builder.
#[derive(Default)]
pub struct DocxFixture {
    body: String,
    footer: Option<String>,
}

impl DocxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(mut self, lines: &[&str]) -> Self {
        for line in lines {
            self.body.push_str(&paragraph(line));
        }
        self
    }

    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    pub fn footer(mut self, text: &str) -> Self {
        self.footer = Some(text.to_string());
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let opts = SimpleFileOptions::default();

        let sect = if self.footer.is_some() {
            r#"<w:sectPr><w:footerReference w:type="default" r:id="rIdFooter1"/></w:sectPr>"#
        } else {
            "<w:sectPr/>"
        };
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document {W_NS}><w:body>{}{sect}</w:body></w:document>"#,
            self.body
        );

        zip.start_file("[Content_Types].xml", opts).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
            .unwrap();
        zip.start_file("word/document.xml", opts).unwrap();
        zip.write_all(document.as_bytes()).unwrap();

        if let Some(footer) = &self.footer {
            zip.start_file("word/_rels/document.xml.rels", opts).unwrap();
            zip.write_all(
                br#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rIdFooter1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/></Relationships>"#,
            )
            .unwrap();
            zip.start_file("word/footer1.xml", opts).unwrap();
            let xml = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><w:ftr {W_NS}>{}</w:ftr>"#,
                paragraph(footer)
            );
            zip.write_all(xml.as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }

    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.bytes()).unwrap();
        path
    }
}

/// The Jane Doe résumé as a DOCX.
pub fn jane_docx(dir: &Path, name: &str) -> PathBuf {
    DocxFixture::new().lines(JANE_LINES).write(dir, name)
}

// ── PDF ──────────────────────────────────────────────────────────────────

fn pdf_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// A text-only PDF, one entry of `pages` per page, Helvetica 12pt.
pub fn minimal_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let page_count = pages.len();
    let mut objects: Vec<String> = Vec::new();

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
        kids.join(" ")
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, lines) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        let mut content = String::from("BT /F1 12 Tf 16 TL 72 720 Td\n");
        for line in lines.iter() {
            if !line.is_empty() {
                content.push_str(&format!("({}) Tj\n", pdf_string(line)));
            }
            content.push_str("T*\n");
        }
        content.push_str("ET");
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }
    let xref = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for off in offsets {
        out.extend_from_slice(format!("{off:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}

// ── Native backend gates ─────────────────────────────────────────────────

pub fn pdfium_ready() -> bool {
    let config = resume_ingest::ParserConfig::default();
    resume_ingest::extract::pdf::pdfium_available(config.resolved_pdfium_path().as_deref())
}

pub fn tesseract_ready() -> bool {
    std::process::Command::new("tesseract")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Skip this test unless the named native backend is usable.
macro_rules! skip_unless {
    ($ready:expr, $what:literal) => {{
        if !$ready {
            println!("SKIP — {} not available", $what);
            return;
        }
    }};
}
