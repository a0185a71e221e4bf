//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Reject CSP directives that would corrupt the joined policy
//! - Detect report paths that collide with fixed routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::EdgeConfig;
use crate::http::{RELOAD_PATH, VALIDATE_IP_PATH};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.environment.as_str().trim().is_empty() {
        errors.push(ValidationError::new("environment", "must not be empty"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!(
                "invalid address '{}', expected 'host:port' (e.g. '127.0.0.1:3000')",
                config.listener.bind_address
            ),
        ));
    }

    if config.static_files.root.as_os_str().is_empty() {
        errors.push(ValidationError::new("static_files.root", "must not be empty"));
    }

    validate_directives(&config.security.csp_directives, &mut errors);

    let report_path = &config.security.report_path;
    if let Err(message) = check_route_path(report_path) {
        errors.push(ValidationError::new("security.report_path", message));
    } else if report_path == VALIDATE_IP_PATH || report_path == RELOAD_PATH || report_path == "/" {
        errors.push(ValidationError::new(
            "security.report_path",
            format!("'{}' collides with a built-in route", report_path),
        ));
    } else if !reports_reach(&config.security.csp_directives, report_path) {
        errors.push(ValidationError::new(
            "security.csp_directives",
            format!("report-uri does not name the report path '{}'", report_path),
        ));
    }

    if config.security.max_report_bytes == 0 {
        errors.push(ValidationError::new("security.max_report_bytes", "must be greater than 0"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that `path` is a literal route: it starts with `/` and holds no
/// capture (`:x`), wildcard (`*x`) or brace syntax the router would reject.
pub fn check_route_path(path: &str) -> Result<(), String> {
    if !path.starts_with('/') {
        return Err(format!("'{}' must start with '/'", path));
    }
    if path.contains(['{', '}']) {
        return Err(format!("'{}' must not contain '{{' or '}}'", path));
    }
    if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(format!(
            "'{}' has a segment starting with ':' or '*'",
            path
        ));
    }
    Ok(())
}

/// True unless a `report-uri` directive exists and none of its URIs ends up at
/// `report_path`. Without any `report-uri` the browser sends no reports.
fn reports_reach(directives: &[String], report_path: &str) -> bool {
    let mut uris = directives
        .iter()
        .flat_map(|d| {
            let mut tokens = d.split_whitespace();
            let is_report_uri = tokens.next() == Some("report-uri");
            tokens.filter(move |_| is_report_uri)
        })
        .peekable();

    if uris.peek().is_none() {
        return true;
    }

    uris.any(|uri| uri_path(uri) == report_path)
}

/// Path part of a relative or absolute URI.
fn uri_path(uri: &str) -> &str {
    match uri.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => uri,
    }
}

fn validate_directives(directives: &[String], errors: &mut Vec<ValidationError>) {
    if directives.iter().all(|d| d.trim().is_empty()) {
        errors.push(ValidationError::new(
            "security.csp_directives",
            "at least one directive is required",
        ));
        return;
    }

    for (i, directive) in directives.iter().enumerate() {
        if directive.contains(';') {
            errors.push(ValidationError::new(
                "security.csp_directives",
                format!("directive {} contains ';', list directives separately", i),
            ));
        }
        if directive.chars().any(|c| c.is_control()) {
            errors.push(ValidationError::new(
                "security.csp_directives",
                format!("directive {} contains control characters", i),
            ));
        }
    }
}
