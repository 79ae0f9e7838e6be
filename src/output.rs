//! Result types returned by the parse entry points.

use crate::detect::DocumentType;
use crate::error::Result;
use crate::schema::StructuredSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Basic file facts recorded alongside the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeMetadata {
    /// Type chosen by the detector.
    pub filetype: DocumentType,
    /// Resolved (absolute) path of the source file.
    pub source: PathBuf,
}

/// The complete result of parsing one résumé.
///
/// Immutable once built: fields are private and only readable through
/// accessors. [`ParsedResume::with_target_role`] consumes and returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    text: String,
    metadata: ResumeMetadata,
    structured: StructuredSchema,
}

impl ParsedResume {
    pub(crate) fn new(text: String, metadata: ResumeMetadata, structured: StructuredSchema) -> Self {
        Self {
            text,
            metadata,
            structured,
        }
    }

    /// Normalised text, markdown-converted when that stage ran.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &ResumeMetadata {
        &self.metadata
    }

    pub fn filetype(&self) -> DocumentType {
        self.metadata.filetype
    }

    pub fn source(&self) -> &Path {
        &self.metadata.source
    }

    pub fn structured(&self) -> &StructuredSchema {
        &self.structured
    }

    /// This result with `structured.target_role` set.
    pub fn with_target_role(mut self, role: impl Into<String>) -> Self {
        self.structured.target_role = Some(role.into());
        self
    }

    /// `{text, metadata, structured}` as a JSON value tree.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty-printed UTF-8 JSON, two-space indent, non-ASCII kept as-is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Single-line JSON.
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedResume {
        let mut structured = StructuredSchema::default();
        structured.candidate.full_name = "Zoë Müller".into();
        structured.meta.page_count = 2;
        ParsedResume::new(
            "Zoë Müller\nzoe@x.de".into(),
            ResumeMetadata {
                filetype: DocumentType::Pdf,
                source: PathBuf::from("/cv/zoe.pdf"),
            },
            structured,
        )
    }

    #[test]
    fn value_view_has_three_keys() {
        let v = sample().to_value().unwrap();
        let keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["text", "metadata", "structured"]);
        assert_eq!(v["metadata"]["filetype"], "pdf");
        assert_eq!(v["metadata"]["source"], "/cv/zoe.pdf");
        assert_eq!(v["structured"]["meta"]["page_count"], 2);
    }

    #[test]
    fn json_keeps_non_ascii_and_indents() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("Zoë Müller"));
        assert!(!json.contains("\\u00eb"));
        assert!(json.contains("\n  \"metadata\": {"));
    }

    #[test]
    fn json_round_trips_to_equal_value() {
        let original = sample();
        let back: ParsedResume = serde_json::from_str(&original.to_json().unwrap()).unwrap();
        assert_eq!(back, original);
        assert!(!original.to_json_compact().unwrap().contains('\n'));
    }

    #[test]
    fn target_role_leaves_other_fields() {
        let base = sample();
        let tagged = base.clone().with_target_role("Data Engineer");
        assert_eq!(base.structured().target_role, None);
        assert_eq!(tagged.structured().target_role.as_deref(), Some("Data Engineer"));
        assert_eq!(tagged.text(), base.text());
    }
}
