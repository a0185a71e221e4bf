//! Static asset serving.
//!
//! # Responsibilities
//! - Resolve request paths beneath the configured root
//! - Refuse paths that leave the root, lexically or through symlinks
//! - Serve file contents (MIME, ranges, conditional requests, index.html)
//! - Mark hits as briefly cacheable outside development
//!
//! # Design Decisions
//! - Containment is checked here before `ServeDir` ever sees the request
//! - A miss is logged and answered with the default not-found response

use std::path::{Component, Path, PathBuf};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::InvalidHeaderValue, HeaderName, HeaderValue, Method, StatusCode},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::config::{Environment, StaticFilesConfig};
use crate::http::response::not_found;
use crate::http::server::AppState;

/// Cache hint attached to static hits outside development.
pub const X_CACHE_CONTROL: HeaderName = HeaderName::from_static("x-cache-control");

/// Static file server rooted at one directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    canonical_root: Option<PathBuf>,
    serve_dir: ServeDir,
    cache_control: HeaderValue,
    environment: Environment,
}

impl StaticFiles {
    pub fn new(
        config: &StaticFilesConfig,
        environment: Environment,
    ) -> Result<Self, InvalidHeaderValue> {
        let canonical_root = match std::fs::canonicalize(&config.root) {
            Ok(root) => Some(root),
            Err(e) => {
                tracing::warn!(
                    root = %config.root.display(),
                    error = %e,
                    "Static root is not accessible yet"
                );
                None
            }
        };

        let cache_control = HeaderValue::from_str(&format!(
            "public, immutable, max-age={}",
            config.cache_max_age_secs
        ))?;

        Ok(Self {
            root: config.root.clone(),
            canonical_root,
            serve_dir: ServeDir::new(&config.root),
            cache_control,
            environment,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serve `request` from the root, or return the default not-found response.
    pub async fn serve(&self, request: Request) -> Response {
        if !matches!(*request.method(), Method::GET | Method::HEAD) {
            return not_found();
        }

        let request_path = request.uri().path().to_owned();
        let Some(relative) = relative_path(&request_path) else {
            tracing::warn!(request_path = %request_path, "Rejected static path outside root");
            return not_found();
        };

        let path = self.root.join(&relative);
        if !self.is_contained(&path).await {
            tracing::warn!(
                path = %path.display(),
                request_path = %request_path,
                "Rejected static path resolving outside root"
            );
            return not_found();
        }

        let response = match self.serve_dir.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let mut response = response.map(Body::new);

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!(
                path = %path.display(),
                request_path = %request_path,
                "File not found"
            );
            return not_found();
        }

        if (status.is_success() || status == StatusCode::NOT_MODIFIED)
            && !self.environment.is_development()
        {
            response
                .headers_mut()
                .insert(X_CACHE_CONTROL, self.cache_control.clone());
        }

        response
    }

    /// Paths that do not exist are "contained"; `ServeDir` answers them with 404.
    async fn is_contained(&self, path: &Path) -> bool {
        let Ok(resolved) = tokio::fs::canonicalize(path).await else {
            return true;
        };

        let root = match &self.canonical_root {
            Some(root) => root.clone(),
            None => match tokio::fs::canonicalize(&self.root).await {
                Ok(root) => root,
                Err(_) => return false,
            },
        };

        resolved.starts_with(root)
    }
}

/// Turn a URI path into a path relative to the static root.
///
/// Returns `None` for anything that could address a file outside the root:
/// parent components, absolute or prefixed segments, backslashes, NUL bytes,
/// or undecodable percent escapes.
pub fn relative_path(request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    if decoded.contains('\0') || decoded.contains('\\') {
        return None;
    }

    let mut relative = PathBuf::new();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(relative)
}

/// Fallback handler: everything without an exact route is a static lookup.
pub async fn serve_static(State(state): State<AppState>, request: Request) -> Response {
    state.static_files.serve(request).await
}
