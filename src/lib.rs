//! Campground listings with reviews: form-driven CRUD over an injected store, with
//! schema validation ahead of every mutation and a single error presenter.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use models::{Campground, CampgroundDetail, CampgroundInput, Review, ReviewInput};
pub use routes::{build_app, build_router};
pub use state::AppState;
pub use store::{CampgroundStore, MemoryStore, PgStore};
