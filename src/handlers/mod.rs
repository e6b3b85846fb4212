//! HTTP handlers for GraphQL execution and unmatched routes.

pub mod graphql;

use crate::response::error_response;
use axum::{http::StatusCode, response::Response};

/// Fallback for every route not mounted on the router.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "no route was found!")
}
