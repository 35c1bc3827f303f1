//! Path parameters that reject through the error presenter instead of axum's plain body.

use crate::error::AppError;
use crate::handlers::CAMPGROUND_NOT_FOUND;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Every id route is rooted at a campground, so a segment that cannot be decoded
/// (bad percent-encoding, invalid UTF-8) is reported as an unknown campground.
#[derive(Clone, Debug)]
pub struct EntityPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for EntityPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(reason = %rejection.body_text(), "path rejected");
                AppError::not_found(CAMPGROUND_NOT_FOUND)
            })?;
        Ok(EntityPath(value))
    }
}
