//! Campground and review persistence.
//!
//! [`CampgroundStore`] is the seam handlers talk to. [`PgStore`] keeps records in
//! PostgreSQL; [`MemoryStore`] keeps them in process. Both keep a campground's review
//! list and the review records consistent: every mutation that touches both is atomic.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::StoreError;
use crate::models::{Campground, CampgroundDetail, CampgroundInput, Review, ReviewInput};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CampgroundStore: Send + Sync {
    /// All campgrounds in creation order. No pagination.
    async fn list_campgrounds(&self) -> Result<Vec<Campground>, StoreError>;

    async fn find_campground(&self, id: Uuid) -> Result<Option<Campground>, StoreError>;

    /// Campground with its reviews resolved, in reference-list order.
    async fn find_campground_with_reviews(
        &self,
        id: Uuid,
    ) -> Result<Option<CampgroundDetail>, StoreError>;

    async fn create_campground(&self, input: CampgroundInput) -> Result<Campground, StoreError>;

    /// Replace the editable fields. `None` if no such campground.
    async fn update_campground(
        &self,
        id: Uuid,
        input: CampgroundInput,
    ) -> Result<Option<Campground>, StoreError>;

    /// Remove the campground and every review it owns. Returns the removed campground.
    async fn delete_campground(&self, id: Uuid) -> Result<Option<Campground>, StoreError>;

    /// Persist a review and append it to the campground's list. `None` if no such campground.
    async fn create_review(
        &self,
        campground_id: Uuid,
        input: ReviewInput,
    ) -> Result<Option<Review>, StoreError>;

    /// Detach the review from the campground and delete it. `None` if the campground does
    /// not exist or does not own the review.
    async fn delete_review(
        &self,
        campground_id: Uuid,
        review_id: Uuid,
    ) -> Result<Option<Review>, StoreError>;

    async fn find_review(&self, id: Uuid) -> Result<Option<Review>, StoreError>;

    /// Readiness check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release connections. The store is not used afterwards.
    async fn close(&self) {}
}
