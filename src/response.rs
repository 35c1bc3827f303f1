//! Redirect helpers.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// `302 Found` to `location`.
pub fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => crate::error::AppError::internal().into_response(),
    }
}

pub fn campground_path(id: Uuid) -> String {
    format!("/campgrounds/{}", id)
}
