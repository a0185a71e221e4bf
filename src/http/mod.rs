//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower layers)
//!     → request.rs (x-request-id)
//!     → security headers middleware
//!     → exact routes: csp_report.rs, validate_ip.rs, reload.rs (development)
//!     → otherwise static_files.rs
//!     → response.rs (default not-found)
//! ```

pub mod csp_report;
pub mod reload;
pub mod request;
pub mod response;
pub mod server;
pub mod static_files;
pub mod validate_ip;

/// Demo endpoint answering whether `ip-address` looks like an address.
pub const VALIDATE_IP_PATH: &str = "/validate-ip-address";

/// Live-reload WebSocket, routed only in development.
pub const RELOAD_PATH: &str = "/reload";

pub use request::{request_span, MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, EdgeServer, ServerError};
pub use static_files::X_CACHE_CONTROL;
