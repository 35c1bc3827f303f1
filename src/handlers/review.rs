//! Review handlers. Reviews only exist under a campground.

use super::{parse_id, HandlerResult, CAMPGROUND_NOT_FOUND, REVIEW_NOT_FOUND};
use crate::error::AppError;
use crate::extractors::{EntityPath, ValidatedForm};
use crate::models::ReviewInput;
use crate::response::{campground_path, found};
use crate::state::AppState;
use axum::{
    extract::State,
    response::Response,
};

pub async fn create_review(
    State(state): State<AppState>,
    EntityPath(id): EntityPath<String>,
    ValidatedForm(input): ValidatedForm<ReviewInput>,
) -> HandlerResult<Response> {
    let campground_id = parse_id(&id, CAMPGROUND_NOT_FOUND)?;
    state
        .store
        .create_review(campground_id, input)
        .await?
        .ok_or_else(|| AppError::not_found(CAMPGROUND_NOT_FOUND))?;
    Ok(found(&campground_path(campground_id)))
}

pub async fn delete_review(
    State(state): State<AppState>,
    EntityPath((id, review_id)): EntityPath<(String, String)>,
) -> HandlerResult<Response> {
    let campground_id = parse_id(&id, CAMPGROUND_NOT_FOUND)?;
    let review_id = parse_id(&review_id, REVIEW_NOT_FOUND)?;
    state
        .store
        .delete_review(campground_id, review_id)
        .await?
        .ok_or_else(|| AppError::not_found(REVIEW_NOT_FOUND))?;
    Ok(found(&campground_path(campground_id)))
}
