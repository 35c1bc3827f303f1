//! Payload validation: per-entity schemas checked before any store mutation.

mod validation;
pub use validation::{
    FieldKind, FieldRule, FormSchema, Schema, CAMPGROUND_SCHEMA, REVIEW_SCHEMA,
};
