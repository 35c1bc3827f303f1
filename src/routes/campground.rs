//! Campground and review routes. Every path also answers unsupported methods with the
//! not-found page.

use crate::handlers::{
    create, create_review, delete as delete_handler, delete_review, edit_form, home, index,
    new_form, show, update,
};
use crate::middleware::not_found;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn campground_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home).fallback(not_found))
        .route("/campgrounds", get(index).post(create).fallback(not_found))
        .route("/campgrounds/new", get(new_form).fallback(not_found))
        .route(
            "/campgrounds/:id",
            get(show).put(update).delete(delete_handler).fallback(not_found),
        )
        .route("/campgrounds/:id/edit", get(edit_form).fallback(not_found))
        .route(
            "/campgrounds/:id/reviews",
            post(create_review).fallback(not_found),
        )
        .route(
            "/campgrounds/:id/reviews/:review_id",
            delete(delete_review).fallback(not_found),
        )
        .with_state(state)
}
