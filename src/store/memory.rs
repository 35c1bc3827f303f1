//! In-process store. One lock guards both collections, so two-step mutations are atomic.

use super::CampgroundStore;
use crate::error::StoreError;
use crate::models::{Campground, CampgroundDetail, CampgroundInput, Review, ReviewInput};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Collections {
    campgrounds: Vec<Campground>,
    reviews: HashMap<Uuid, Review>,
}

impl Collections {
    fn campground(&self, id: Uuid) -> Option<&Campground> {
        self.campgrounds.iter().find(|c| c.id == id)
    }

    fn campground_mut(&mut self, id: Uuid) -> Option<&mut Campground> {
        self.campgrounds.iter_mut().find(|c| c.id == id)
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn campground_count(&self) -> usize {
        self.inner.read().await.campgrounds.len()
    }

    pub async fn review_count(&self) -> usize {
        self.inner.read().await.reviews.len()
    }
}

#[async_trait]
impl CampgroundStore for MemoryStore {
    async fn list_campgrounds(&self) -> Result<Vec<Campground>, StoreError> {
        Ok(self.inner.read().await.campgrounds.clone())
    }

    async fn find_campground(&self, id: Uuid) -> Result<Option<Campground>, StoreError> {
        Ok(self.inner.read().await.campground(id).cloned())
    }

    async fn find_campground_with_reviews(
        &self,
        id: Uuid,
    ) -> Result<Option<CampgroundDetail>, StoreError> {
        let guard = self.inner.read().await;
        let Some(campground) = guard.campground(id) else {
            return Ok(None);
        };
        let reviews = campground
            .reviews
            .iter()
            .filter_map(|rid| guard.reviews.get(rid).cloned())
            .collect();
        Ok(Some(CampgroundDetail {
            campground: campground.clone(),
            reviews,
        }))
    }

    async fn create_campground(&self, input: CampgroundInput) -> Result<Campground, StoreError> {
        let campground = Campground::from_input(Uuid::new_v4(), input);
        self.inner.write().await.campgrounds.push(campground.clone());
        tracing::info!(campground_id = %campground.id, "campground created");
        Ok(campground)
    }

    async fn update_campground(
        &self,
        id: Uuid,
        input: CampgroundInput,
    ) -> Result<Option<Campground>, StoreError> {
        let mut guard = self.inner.write().await;
        let Some(campground) = guard.campground_mut(id) else {
            return Ok(None);
        };
        campground.apply(input);
        tracing::info!(campground_id = %id, "campground updated");
        Ok(Some(campground.clone()))
    }

    async fn delete_campground(&self, id: Uuid) -> Result<Option<Campground>, StoreError> {
        let mut guard = self.inner.write().await;
        let Some(pos) = guard.campgrounds.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let removed = guard.campgrounds.remove(pos);
        for review_id in &removed.reviews {
            guard.reviews.remove(review_id);
        }
        tracing::info!(
            campground_id = %id,
            reviews = removed.reviews.len(),
            "campground deleted with its reviews"
        );
        Ok(Some(removed))
    }

    async fn create_review(
        &self,
        campground_id: Uuid,
        input: ReviewInput,
    ) -> Result<Option<Review>, StoreError> {
        let mut guard = self.inner.write().await;
        let review = Review {
            id: Uuid::new_v4(),
            rating: input.rating,
            body: input.body,
        };
        let Some(campground) = guard.campground_mut(campground_id) else {
            return Ok(None);
        };
        campground.reviews.push(review.id);
        guard.reviews.insert(review.id, review.clone());
        tracing::info!(campground_id = %campground_id, review_id = %review.id, "review created");
        Ok(Some(review))
    }

    async fn delete_review(
        &self,
        campground_id: Uuid,
        review_id: Uuid,
    ) -> Result<Option<Review>, StoreError> {
        let mut guard = self.inner.write().await;
        let Some(campground) = guard.campground_mut(campground_id) else {
            return Ok(None);
        };
        let Some(pos) = campground.reviews.iter().position(|r| *r == review_id) else {
            return Ok(None);
        };
        campground.reviews.remove(pos);
        let removed = guard.reviews.remove(&review_id);
        tracing::info!(campground_id = %campground_id, review_id = %review_id, "review deleted");
        Ok(removed)
    }

    async fn find_review(&self, id: Uuid) -> Result<Option<Review>, StoreError> {
        Ok(self.inner.read().await.reviews.get(&id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
