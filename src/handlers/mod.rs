//! HTTP handlers for campgrounds and their reviews.
//!
//! Every handler that touches the store returns [`HandlerResult`]; store failures are
//! forwarded with `?` and end up at the error presenter.

pub mod campground;
pub mod review;
pub use campground::*;
pub use review::*;

use crate::error::AppError;
use uuid::Uuid;

pub type HandlerResult<T> = Result<T, AppError>;

pub(crate) const CAMPGROUND_NOT_FOUND: &str = "Campground Not Found";
pub(crate) const REVIEW_NOT_FOUND: &str = "Review Not Found";

/// An id that does not parse cannot name a record, so it is a 404 like any unknown id.
pub(crate) fn parse_id(raw: &str, not_found: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(not_found))
}
