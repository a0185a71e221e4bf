//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, timeout, security headers)
//! - Bind server to listener
//! - Graceful shutdown on the shared broadcast signal

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::header::InvalidHeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{check_route_path, EdgeConfig, Environment};
use crate::http::csp_report::csp_report;
use crate::http::reload::reload_socket;
use crate::http::request::{request_span, MakeRequestUuid, X_REQUEST_ID};
use crate::http::static_files::{serve_static, StaticFiles};
use crate::http::validate_ip::validate_ip_address;
use crate::http::{RELOAD_PATH, VALIDATE_IP_PATH};
use crate::lifecycle::Shutdown;
use crate::security::{security_headers_middleware, PolicyError, SecurityHeaders};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid content security policy: {0}")]
    Policy(#[from] PolicyError),

    #[error("invalid static cache header: {0}")]
    CacheHeader(#[from] InvalidHeaderValue),

    #[error("invalid report path: {0}")]
    ReportPath(String),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub environment: Environment,
    pub static_files: Arc<StaticFiles>,
    pub shutdown: Shutdown,
}

/// HTTP server for the edge.
pub struct EdgeServer {
    router: Router,
    config: EdgeConfig,
    headers: Arc<SecurityHeaders>,
    shutdown: Shutdown,
}

impl EdgeServer {
    /// Build the server. The CSP and header set are computed here, once.
    pub fn new(config: EdgeConfig, shutdown: Shutdown) -> Result<Self, ServerError> {
        check_route_path(&config.security.report_path).map_err(ServerError::ReportPath)?;

        let headers = Arc::new(SecurityHeaders::new(
            &config.security,
            config.environment.clone(),
        )?);
        let static_files = Arc::new(StaticFiles::new(
            &config.static_files,
            config.environment.clone(),
        )?);

        tracing::info!(
            environment = %config.environment,
            static_root = %static_files.root().display(),
            content_security_policy = %headers.policy().as_str(),
            "Security policy built"
        );

        let state = AppState {
            environment: config.environment.clone(),
            static_files,
            shutdown: shutdown.clone(),
        };

        let router = Self::build_router(&config, state, headers.clone());
        Ok(Self {
            router,
            config,
            headers,
            shutdown,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState, headers: Arc<SecurityHeaders>) -> Router {
        let mut router = Router::new()
            .route(
                &config.security.report_path,
                post(csp_report).layer(DefaultBodyLimit::max(config.security.max_report_bytes)),
            )
            .route(VALIDATE_IP_PATH, get(validate_ip_address));

        if state.environment.is_development() {
            router = router.route(RELOAD_PATH, get(reload_socket));
        }

        router
            .fallback(serve_static)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            // Outside the timeout so 408 responses carry the headers too.
            .layer(middleware::from_fn_with_state(
                headers,
                security_headers_middleware,
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// A clone of the router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    pub fn security_headers(&self) -> &SecurityHeaders {
        &self.headers
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(self, listener: TcpListener) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(self.shutdown.signalled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
