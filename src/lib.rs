//! Minimal HTTP edge server.
//!
//! Serves static assets, stamps security headers (CSP, HSTS, nosniff) on every
//! response, accepts CSP violation reports and answers a demo IP-address
//! shape check.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod validation;

pub use config::EdgeConfig;
pub use http::EdgeServer;
pub use lifecycle::Shutdown;
