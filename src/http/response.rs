//! Shared response builders.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Body of the default not-found response.
pub const NOT_FOUND_BODY: &str = "404 Not Found";

/// The response used when nothing (including the static root) handled a request.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}
