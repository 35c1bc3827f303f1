//! Validation stage: parse a form body and check it against the payload's schema before
//! the handler runs. A rejected payload never reaches the store.

use crate::error::AppError;
use crate::service::FormSchema;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Form,
};
use std::collections::HashMap;

/// Form payload that passed its schema.
#[derive(Clone, Debug)]
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: FormSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::new(rejection.status(), rejection.body_text()))?;

        let schema = T::schema();
        let normalized = schema.validate(&fields).map_err(|violations| {
            tracing::debug!(entity = schema.entity, ?violations, "payload rejected");
            AppError::validation(&violations)
        })?;
        let payload = serde_json::from_value(normalized)
            .map_err(|e| AppError::validation(&[e.to_string()]))?;
        Ok(ValidatedForm(payload))
    }
}
