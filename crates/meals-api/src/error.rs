use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meals_db::StoreError;
use serde_json::json;
use std::fmt;

use crate::cache::CacheError;

/// Request error that converts to an HTTP response
#[derive(Debug)]
pub enum AppError {
    MalformedRequest(String),
    Store(StoreError),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MalformedRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(e) => {
                tracing::error!(error = %e, "Store error");
                (StatusCode::INTERNAL_SERVER_ERROR, e.inner().to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

/// Fatal errors while bringing the service up
#[derive(Debug)]
pub enum StartupError {
    Config(String),
    Store(StoreError),
    Cache(CacheError),
    Io(std::io::Error),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(msg) => write!(f, "Configuration error: {}", msg),
            StartupError::Store(e) => write!(f, "{}", e),
            StartupError::Cache(e) => write!(f, "{}", e),
            StartupError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Store(e) => Some(e),
            StartupError::Cache(e) => Some(e),
            StartupError::Io(e) => Some(e),
            StartupError::Config(_) => None,
        }
    }
}

impl From<StoreError> for StartupError {
    fn from(e: StoreError) -> Self {
        StartupError::Store(e)
    }
}

impl From<sqlx::Error> for StartupError {
    fn from(e: sqlx::Error) -> Self {
        StartupError::Store(e.into())
    }
}

impl From<CacheError> for StartupError {
    fn from(e: CacheError) -> Self {
        StartupError::Cache(e)
    }
}

impl From<std::io::Error> for StartupError {
    fn from(e: std::io::Error) -> Self {
        StartupError::Io(e)
    }
}

impl From<tracing_subscriber::filter::ParseError> for StartupError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        StartupError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StartupError>;
