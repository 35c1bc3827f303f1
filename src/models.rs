//! Campground and review records as stored, plus the validated inputs that create them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Campground {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    /// Owned reviews, in the order they were added.
    pub reviews: Vec<Uuid>,
}

impl Campground {
    pub fn from_input(id: Uuid, input: CampgroundInput) -> Self {
        Self {
            id,
            title: input.title,
            location: input.location,
            description: input.description,
            image: input.image,
            price: input.price,
            reviews: Vec::new(),
        }
    }

    /// Overwrite the editable fields; the review list is untouched.
    pub fn apply(&mut self, input: CampgroundInput) {
        self.title = input.title;
        self.location = input.location;
        self.description = input.description;
        self.image = input.image;
        self.price = input.price;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub rating: i32,
    pub body: String,
}

/// A campground with its review references resolved into full records.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CampgroundDetail {
    pub campground: Campground,
    pub reviews: Vec<Review>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CampgroundInput {
    pub title: String,
    pub location: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReviewInput {
    pub rating: i32,
    pub body: String,
}
