//! Request bodies for the downstream scoring, feedback and insights services.
//!
//! The services themselves are out of reach of this crate; these types only
//! pin down the shape each one accepts so callers serialise a parsed résumé
//! the same way every time. Each request borrows from the [`ParsedResume`]
//! it was built from.

use crate::output::ParsedResume;
use crate::schema::StructuredSchema;
use serde::Serialize;

/// Body for the rubric scoring service.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringRequest<'a> {
    pub role: String,
    pub structured_json: &'a StructuredSchema,
    pub raw_text: &'a str,
}

impl<'a> ScoringRequest<'a> {
    pub fn new(resume: &'a ParsedResume, role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            structured_json: resume.structured(),
            raw_text: resume.text(),
        }
    }
}

/// Body for the feedback service.
///
/// `evaluation_report` is whatever the scoring service returned; it is passed
/// through untouched.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest<'a> {
    pub role: String,
    pub evaluation_report: serde_json::Value,
    pub structured_resume: &'a StructuredSchema,
}

impl<'a> FeedbackRequest<'a> {
    pub fn new(
        resume: &'a ParsedResume,
        role: impl Into<String>,
        evaluation_report: serde_json::Value,
    ) -> Self {
        Self {
            role: role.into(),
            evaluation_report,
            structured_resume: resume.structured(),
        }
    }
}

/// Body for the market insights service.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsRequest<'a> {
    pub role: String,
    pub country: String,
    pub structured_json: &'a StructuredSchema,
}

impl<'a> InsightsRequest<'a> {
    pub fn new(
        resume: &'a ParsedResume,
        role: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            country: country.into(),
            structured_json: resume.structured(),
        }
    }
}
