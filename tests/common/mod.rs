//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use edge_server::config::{EdgeConfig, Environment};
use edge_server::{EdgeServer, Shutdown};
use tower::ServiceExt;
use tracing_subscriber::layer::SubscriberExt;

/// A throwaway static root under the system temp dir, removed on drop.
pub struct StaticRoot {
    path: PathBuf,
}

impl StaticRoot {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("edge-server-test-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let file = self.path.join(relative);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(file, contents).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StaticRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

pub fn config(environment: Environment, root: &Path) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.environment = environment;
    config.static_files.root = root.to_path_buf();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

pub fn router(environment: Environment, root: &Path) -> Router {
    EdgeServer::new(config(environment, root), Shutdown::new())
        .unwrap()
        .router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(router: Router, uri: &str) -> TestResponse {
    send(
        router,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post(router: Router, uri: &str, body: &str) -> TestResponse {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/csp-report")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Log output of a thread-local subscriber, formatted without colour.
///
/// Only sees events on the installing thread, so use it from a
/// current-thread `#[tokio::test]`.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        );
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
