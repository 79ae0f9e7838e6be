//! The structured résumé record handed to downstream scoring, feedback and
//! insight services.
//!
//! Field declaration order is the serialised key order. Every key is always
//! emitted: empty strings and empty lists stand in for anything the
//! heuristics did not find, and `target_role` serialises as `null` until a
//! caller sets it.

use serde::{Deserialize, Serialize};

/// Root of the structured record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuredSchema {
    pub meta: Meta,
    pub candidate: Candidate,
    pub sections: Sections,
    /// Free-form diagnostics from the structurer.
    pub parser_notes: Vec<String>,
    /// References to embedded media (logos, photos, charts).
    pub media_refs: Vec<MediaRef>,
    /// Role the résumé is being evaluated against; set by callers.
    pub target_role: Option<String>,
}

/// Parse provenance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Meta {
    /// `sha256:<hex>` digest of the source file's raw bytes.
    pub checksum: String,
    /// UTC, second precision, e.g. `2024-05-01T12:30:00Z`.
    pub parsed_at: String,
    pub file_name: String,
    pub page_count: usize,
    pub parser_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Candidate {
    pub full_name: String,
    pub contact: Contact,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sections {
    pub experience: Vec<ExperienceEntry>,
    // The next four are reserved; the heuristic structurer leaves them empty
    // and their entry shape is owned by whichever stage first fills them.
    pub education: Vec<serde_json::Value>,
    pub skills: Skills,
    pub certifications: Vec<serde_json::Value>,
    pub languages: Vec<serde_json::Value>,
    pub awards: Vec<serde_json::Value>,
}

/// One block of the experience section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub employer: String,
    pub location: String,
    /// `YYYY-MM`, `present`, or empty.
    pub start_date: String,
    /// `YYYY-MM`, `present`, or empty.
    pub end_date: String,
    /// Bullet lines in source order, marker removed.
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skills {
    pub hard: Vec<String>,
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaRef {
    /// e.g. `image`, `chart`.
    pub kind: String,
    /// Part name or page anchor inside the source document.
    pub target: String,
}
