//! `POST /csp-report`: receives browser CSP violation reports.
//!
//! The reply never depends on the report. Well-formed reports are logged as
//! a one-line summary; malformed, oversized or unreadable bodies are logged
//! as a rejection. All of them get 403.

use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::security::report::CspViolationReport;

/// Body of every reply from the report endpoint.
pub const CSP_VIOLATION_BODY: &str = "CSP violation";

pub async fn csp_report(body: Result<Bytes, BytesRejection>) -> Response {
    match body {
        Ok(body) => log_report(&body),
        Err(rejection) => {
            tracing::warn!(
                error = %rejection,
                status = rejection.status().as_u16(),
                "Unreadable CSP report body"
            );
        }
    }

    (StatusCode::FORBIDDEN, CSP_VIOLATION_BODY).into_response()
}

fn log_report(body: &[u8]) {
    match CspViolationReport::from_body(body) {
        Ok(report) => {
            tracing::warn!(
                document_uri = report.document_uri.as_deref(),
                blocked_uri = report.blocked_uri.as_deref(),
                effective_directive = report.effective_directive.as_deref(),
                "{}",
                report.summary()
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, body_len = body.len(), "Rejected CSP report");
        }
    }
}
