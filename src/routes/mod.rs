//! Router assembly: routes, the catch-all, and the pipeline stages that wrap them.

mod campground;
mod common;

pub use campground::campground_routes;
pub use common::common_routes;

use crate::middleware::{
    catch_panic_layer, not_found, present_errors, MethodOverride, MethodOverrideLayer,
};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use tower::Layer;
use tower_http::trace::TraceLayer;

/// Largest accepted form body.
pub const MAX_FORM_BYTES: usize = 64 * 1024;

/// All routes with the 404 catch-all, panic catching and the error presenter.
///
/// Stage order per request: trace → presenter → panic catch → body limit → extractors
/// (validation) → handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(campground_routes(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .layer(catch_panic_layer())
        .layer(from_fn(present_errors))
        .layer(TraceLayer::new_for_http())
}

/// [`build_router`] behind the method-override layer; this is what gets served.
pub fn build_app(state: AppState) -> MethodOverride<Router> {
    MethodOverrideLayer.layer(build_router(state))
}
