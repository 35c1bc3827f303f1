//! Error presenter: the only stage that turns a failure into a user-visible page.

use crate::error::{AppError, PAGE_NOT_FOUND};
use crate::views::{render, ErrorView};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Render any response tagged with an [`AppError`] as the error view.
pub async fn present_errors(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<AppError>() {
        Some(err) => present(err),
        None => response,
    }
}

/// Catch-all for unmatched routes and methods.
pub async fn not_found() -> AppError {
    AppError::not_found(PAGE_NOT_FOUND)
}

fn present(err: AppError) -> Response {
    if err.status.is_server_error() {
        tracing::error!(status = err.status.as_u16(), reason = %err.message, "request failed");
    } else {
        tracing::warn!(status = err.status.as_u16(), reason = %err.message, "request rejected");
    }
    let view = ErrorView {
        status: err.status.as_u16(),
        message: &err.message,
    };
    match render(&view) {
        Ok(page) => (err.status, page).into_response(),
        Err(render_err) => {
            tracing::error!(error = %render_err, "error view failed to render");
            (err.status, err.message).into_response()
        }
    }
}
