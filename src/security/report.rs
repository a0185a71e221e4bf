//! CSP violation reports sent by browsers to the `report-uri` endpoint.

use serde::Deserialize;
use thiserror::Error;

/// Placeholder logged for report fields the browser left out.
pub const MISSING_FIELD: &str = "undefined";

/// Name logged in place of a document URI that points at a directory.
pub const DIRECTORY_INDEX: &str = "index.html";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report body is not valid JSON: {0}")]
    BadRequest(#[from] serde_json::Error),

    #[error("report body has no `csp-report` object")]
    MissingReport,
}

#[derive(Debug, Deserialize)]
struct ReportEnvelope {
    #[serde(rename = "csp-report")]
    csp_report: Option<CspViolationReport>,
}

/// The `csp-report` object of a violation report.
///
/// Every field is optional; browsers differ in what they send.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CspViolationReport {
    pub document_uri: Option<String>,
    pub blocked_uri: Option<String>,
    pub effective_directive: Option<String>,
    pub violated_directive: Option<String>,
    pub original_policy: Option<String>,
    pub referrer: Option<String>,
    pub disposition: Option<String>,
    pub source_file: Option<String>,
    pub status_code: Option<u16>,
    pub line_number: Option<u64>,
}

impl CspViolationReport {
    /// Parse a raw request body.
    pub fn from_body(body: &[u8]) -> Result<Self, ReportError> {
        let envelope: ReportEnvelope = serde_json::from_slice(body)?;
        envelope.csp_report.ok_or(ReportError::MissingReport)
    }

    /// The document that triggered the violation. A URI ending in `/` is the
    /// directory index, so it is reported as `index.html`.
    pub fn file(&self) -> &str {
        match self.document_uri.as_deref() {
            Some(uri) if uri.ends_with('/') => DIRECTORY_INDEX,
            Some(uri) => uri,
            None => MISSING_FIELD,
        }
    }

    pub fn blocked(&self) -> &str {
        self.blocked_uri.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn directive(&self) -> &str {
        self.effective_directive.as_deref().unwrap_or(MISSING_FIELD)
    }

    /// One-line human readable description of the violation.
    pub fn summary(&self) -> String {
        format!(
            "{} attempted to access {} which violates the {} CSP directive.",
            self.file(),
            self.blocked(),
            self.directive()
        )
    }
}
