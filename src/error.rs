//! Typed errors, HTTP mapping, and GraphQL error extensions.

use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorBody;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Stable machine-readable code and the HTTP status it corresponds to.
    pub fn code_and_status(&self) -> (&'static str, StatusCode) {
        match self {
            AppError::Config(_) => ("CONFIG_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
            AppError::NotFound(_) => ("NOT_FOUND", StatusCode::NOT_FOUND),
            AppError::Validation(_) => ("VALIDATION", StatusCode::UNPROCESSABLE_ENTITY),
            AppError::Db(sqlx::Error::RowNotFound) => ("NOT_FOUND", StatusCode::NOT_FOUND),
            AppError::Db(_) => ("DATABASE_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
            AppError::Conflict(_) => ("CONFLICT", StatusCode::CONFLICT),
            AppError::BadRequest(_) => ("BAD_REQUEST", StatusCode::BAD_REQUEST),
            AppError::PayloadTooLarge(_) => ("PAYLOAD_TOO_LARGE", StatusCode::PAYLOAD_TOO_LARGE),
            AppError::MethodNotAllowed(_) => ("METHOD_NOT_ALLOWED", StatusCode::METHOD_NOT_ALLOWED),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (_, status) = self.code_and_status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let (code, status) = self.code_and_status();
        if status.is_server_error() {
            tracing::error!(error = %self, "resolver failed");
        }
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);
            e.set("status", status.as_u16());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let (code, status) = AppError::Db(sqlx::Error::RowNotFound).code_and_status();
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn graphql_error_carries_code_and_status() {
        let err = AppError::Conflict("author has books".into()).extend();
        assert_eq!(err.message, "conflict: author has books");
        let ext = err.extensions.expect("extensions set");
        assert_eq!(ext.get("code"), Some(&async_graphql::Value::from("CONFLICT")));
        assert_eq!(ext.get("status"), Some(&async_graphql::Value::from(409u16)));
    }
}
