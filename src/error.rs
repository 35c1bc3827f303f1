//! Typed errors and HTTP mapping.
//!
//! Every user-facing failure is an [`AppError`]: a message plus a status code. Turning an
//! `AppError` into a response does not render anything; it tags the response so the
//! error presenter (see [`crate::middleware::present_errors`]) renders it exactly once.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Message shown when a failure carries no message of its own.
pub const DEFAULT_MESSAGE: &str = "Oh No, Something Went Wrong!";

/// Message for unmatched routes and methods.
pub const PAGE_NOT_FOUND: &str = "Page Not Found";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("invalid database url: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// HTTP-status-carrying error. Status defaults to 500 and is always a 4xx or 5xx.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{status}: {message}")]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let status = if status.is_client_error() || status.is_server_error() {
            status
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let message = message.into();
        let message = if message.trim().is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            message
        };
        Self { status, message }
    }

    /// 400 with every violation joined by a comma.
    pub fn validation<S: AsRef<str>>(violations: &[S]) -> Self {
        let joined = violations
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        Self::new(StatusCode::BAD_REQUEST, joined)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, DEFAULT_MESSAGE)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "store operation failed");
        AppError::internal()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Plain body stays in place if no presenter is installed.
        let mut response = (self.status, self.message.clone()).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
