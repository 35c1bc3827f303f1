//! Askama views. Templates live under `templates/`.

use crate::error::AppError;
use crate::models::{Campground, CampgroundDetail};
use askama::Template;
use axum::response::Html;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeView;

#[derive(Template)]
#[template(path = "campgrounds/index.html")]
pub struct IndexView<'a> {
    pub campgrounds: &'a [Campground],
}

#[derive(Template)]
#[template(path = "campgrounds/new.html")]
pub struct NewView;

#[derive(Template)]
#[template(path = "campgrounds/show.html")]
pub struct ShowView<'a> {
    pub detail: &'a CampgroundDetail,
}

#[derive(Template)]
#[template(path = "campgrounds/edit.html")]
pub struct EditView<'a> {
    pub campground: &'a Campground,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView<'a> {
    pub status: u16,
    pub message: &'a str,
}

pub fn render<T: Template>(view: &T) -> Result<Html<String>, AppError> {
    view.render().map(Html).map_err(|e| {
        tracing::error!(error = %e, "template render failed");
        AppError::internal()
    })
}
