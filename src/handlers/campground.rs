//! Campground handlers: list, forms, create, show, update, delete.

use super::{parse_id, HandlerResult, CAMPGROUND_NOT_FOUND};
use crate::error::AppError;
use crate::extractors::{EntityPath, ValidatedForm};
use crate::models::CampgroundInput;
use crate::response::{campground_path, found};
use crate::state::AppState;
use crate::views::{render, EditView, HomeView, IndexView, NewView, ShowView};
use axum::{
    extract::State,
    response::{Html, Response},
};

pub async fn home() -> HandlerResult<Html<String>> {
    render(&HomeView)
}

pub async fn index(State(state): State<AppState>) -> HandlerResult<Html<String>> {
    let campgrounds = state.store.list_campgrounds().await?;
    render(&IndexView {
        campgrounds: &campgrounds,
    })
}

pub async fn new_form() -> HandlerResult<Html<String>> {
    render(&NewView)
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedForm(input): ValidatedForm<CampgroundInput>,
) -> HandlerResult<Response> {
    let campground = state.store.create_campground(input).await?;
    Ok(found(&campground_path(campground.id)))
}

pub async fn show(
    State(state): State<AppState>,
    EntityPath(id): EntityPath<String>,
) -> HandlerResult<Html<String>> {
    let id = parse_id(&id, CAMPGROUND_NOT_FOUND)?;
    let detail = state
        .store
        .find_campground_with_reviews(id)
        .await?
        .ok_or_else(|| AppError::not_found(CAMPGROUND_NOT_FOUND))?;
    render(&ShowView { detail: &detail })
}

pub async fn edit_form(
    State(state): State<AppState>,
    EntityPath(id): EntityPath<String>,
) -> HandlerResult<Html<String>> {
    let id = parse_id(&id, CAMPGROUND_NOT_FOUND)?;
    let campground = state
        .store
        .find_campground(id)
        .await?
        .ok_or_else(|| AppError::not_found(CAMPGROUND_NOT_FOUND))?;
    render(&EditView {
        campground: &campground,
    })
}

pub async fn update(
    State(state): State<AppState>,
    EntityPath(id): EntityPath<String>,
    ValidatedForm(input): ValidatedForm<CampgroundInput>,
) -> HandlerResult<Response> {
    let id = parse_id(&id, CAMPGROUND_NOT_FOUND)?;
    let campground = state
        .store
        .update_campground(id, input)
        .await?
        .ok_or_else(|| AppError::not_found(CAMPGROUND_NOT_FOUND))?;
    Ok(found(&campground_path(campground.id)))
}

pub async fn delete(
    State(state): State<AppState>,
    EntityPath(id): EntityPath<String>,
) -> HandlerResult<Response> {
    let id = parse_id(&id, CAMPGROUND_NOT_FOUND)?;
    state
        .store
        .delete_campground(id)
        .await?
        .ok_or_else(|| AppError::not_found(CAMPGROUND_NOT_FOUND))?;
    Ok(found("/campgrounds"))
}
