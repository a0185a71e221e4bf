//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     → policy.rs (join CSP directives once)
//!     → headers.rs (build CSP / HSTS / nosniff header set)
//!
//! Every response:
//!     → headers.rs middleware copies the prebuilt header set
//!
//! Browser violation reports:
//!     → report.rs (parse, normalize, summarize)
//! ```

pub mod headers;
pub mod policy;
pub mod report;

pub use headers::{security_headers_middleware, SecurityHeaders};
pub use policy::{ContentSecurityPolicy, PolicyError};
pub use report::{CspViolationReport, ReportError};
