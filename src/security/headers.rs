//! Security response headers.
//!
//! # Responsibilities
//! - Attach Content-Security-Policy to every response
//! - Attach Strict-Transport-Security outside development
//! - Attach X-Content-Type-Options: nosniff
//!
//! # Design Decisions
//! - Header values are built once at startup; the middleware only copies them
//! - HSTS is withheld in development so plain-HTTP local testing keeps working
//! - Headers are set after the inner service runs, so they also cover
//!   fallbacks and extractor rejections

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{CONTENT_SECURITY_POLICY, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};

use crate::config::{Environment, SecurityConfig};
use crate::security::policy::{ContentSecurityPolicy, PolicyError};

/// Precomputed security headers for one process lifetime.
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    environment: Environment,
    policy: ContentSecurityPolicy,
    headers: HeaderMap,
}

impl SecurityHeaders {
    pub fn new(config: &SecurityConfig, environment: Environment) -> Result<Self, PolicyError> {
        let policy = ContentSecurityPolicy::from_directives(&config.csp_directives)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_SECURITY_POLICY, policy.header_value().clone());

        if !environment.is_development() {
            let hsts = if config.hsts_include_subdomains {
                format!("max-age={}; includeSubDomains", config.hsts_max_age_secs)
            } else {
                format!("max-age={}", config.hsts_max_age_secs)
            };
            headers.insert(STRICT_TRANSPORT_SECURITY, HeaderValue::from_str(&hsts)?);
        }

        headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));

        Ok(Self {
            environment,
            policy,
            headers,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn policy(&self) -> &ContentSecurityPolicy {
        &self.policy
    }

    /// Overwrite the security headers on `target`.
    pub fn apply(&self, target: &mut HeaderMap) {
        for (name, value) in self.headers.iter() {
            target.insert(name.clone(), value.clone());
        }
    }
}

/// Middleware that stamps the precomputed security headers on every response.
pub async fn security_headers_middleware(
    State(headers): State<Arc<SecurityHeaders>>,
    request: Request,
    next: Next,
) -> Response {
    tracing::info!(environment = %headers.environment(), "Applying security headers");

    let mut response = next.run(request).await;
    headers.apply(response.headers_mut());
    response
}
