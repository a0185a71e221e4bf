//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge server.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root configuration for the edge server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Deployment environment. Only `development` relaxes HSTS and asset caching.
    pub environment: Environment,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static asset directory and caching.
    pub static_files: StaticFilesConfig,

    /// Security header and CSP report settings.
    pub security: SecurityConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Name of the environment the server runs in.
///
/// Any name other than `development` is treated as a production-like
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Environment(String);

impl Environment {
    pub const DEVELOPMENT: &'static str = "development";
    pub const PRODUCTION: &'static str = "production";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn development() -> Self {
        Self::new(Self::DEVELOPMENT)
    }

    pub fn production() -> Self {
        Self::new(Self::PRODUCTION)
    }

    /// Exact, case-sensitive match on `development`.
    pub fn is_development(&self) -> bool {
        self.0 == Self::DEVELOPMENT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::production()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory that request paths are resolved against.
    pub root: PathBuf,

    /// `max-age` advertised in `X-Cache-Control` outside development.
    pub cache_max_age_secs: u64,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./public"),
            cache_max_age_secs: 900,
        }
    }
}

/// Security header and CSP report configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Ordered Content-Security-Policy directives, joined with `; `.
    pub csp_directives: Vec<String>,

    /// Path that accepts CSP violation reports. Should match `report-uri`.
    pub report_path: String,

    /// HSTS `max-age` in seconds.
    pub hsts_max_age_secs: u64,

    /// Append `includeSubDomains` to HSTS.
    pub hsts_include_subdomains: bool,

    /// Maximum accepted CSP report body size in bytes.
    pub max_report_bytes: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            csp_directives: default_csp_directives(),
            report_path: "/csp-report".to_string(),
            hsts_max_age_secs: 31_536_000, // one year
            hsts_include_subdomains: true,
            max_report_bytes: 64 * 1024,
        }
    }
}

fn default_csp_directives() -> Vec<String> {
    [
        "report-uri /csp-report",
        "default-src 'self'",
        // ws: lets the development reload socket connect
        "connect-src 'self' https://jsonplaceholder.typicode.com ws:",
        "script-src-elem 'self'",
        "style-src-elem 'self' 'unsafe-inline'",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_development_is_exact_match() {
        assert!(Environment::development().is_development());
        assert!(!Environment::production().is_development());
        assert!(!Environment::new("Development").is_development());
        assert!(!Environment::new("dev").is_development());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: EdgeConfig = toml::from_str("").unwrap();
        assert_eq!(config.environment, Environment::production());
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.static_files.cache_max_age_secs, 900);
        assert_eq!(config.security.csp_directives.len(), 5);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: EdgeConfig = toml::from_str(
            r#"
            environment = "development"

            [static_files]
            root = "./assets"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert!(config.environment.is_development());
        assert_eq!(config.static_files.root, PathBuf::from("./assets"));
        assert_eq!(config.static_files.cache_max_age_secs, 900);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
