//! PostgreSQL store. Campgrounds keep their review references in an ordered `UUID[]`
//! column; reviews live in their own table. Mutations touching both run in one transaction.

use super::CampgroundStore;
use crate::error::StoreError;
use crate::models::{Campground, CampgroundDetail, CampgroundInput, Review, ReviewInput};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

const CREATE_CAMPGROUNDS: &str = r#"
    CREATE TABLE IF NOT EXISTS campgrounds (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        location TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        image TEXT NOT NULL DEFAULT '',
        price DOUBLE PRECISION NOT NULL,
        reviews UUID[] NOT NULL DEFAULT '{}',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const CREATE_REVIEWS: &str = r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id UUID PRIMARY KEY,
        rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
        body TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create the database if needed, open a pool and ensure tables exist.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        ensure_database_exists(database_url).await?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::from_pool(pool);
        store.ensure_tables().await?;
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Idempotent DDL for both collections.
    pub async fn ensure_tables(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_CAMPGROUNDS).execute(&self.pool).await?;
        sqlx::query(CREATE_REVIEWS).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CampgroundStore for PgStore {
    async fn list_campgrounds(&self) -> Result<Vec<Campground>, StoreError> {
        let rows = sqlx::query_as::<_, Campground>(
            "SELECT id, title, location, description, image, price, reviews \
             FROM campgrounds ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_campground(&self, id: Uuid) -> Result<Option<Campground>, StoreError> {
        let row = sqlx::query_as::<_, Campground>(
            "SELECT id, title, location, description, image, price, reviews \
             FROM campgrounds WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_campground_with_reviews(
        &self,
        id: Uuid,
    ) -> Result<Option<CampgroundDetail>, StoreError> {
        let Some(campground) = self.find_campground(id).await? else {
            return Ok(None);
        };
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT r.id, r.rating, r.body \
             FROM unnest($1::uuid[]) WITH ORDINALITY AS refs(id, position) \
             JOIN reviews r ON r.id = refs.id \
             ORDER BY refs.position",
        )
        .bind(&campground.reviews)
        .fetch_all(&self.pool)
        .await?;
        Ok(Some(CampgroundDetail { campground, reviews }))
    }

    async fn create_campground(&self, input: CampgroundInput) -> Result<Campground, StoreError> {
        let campground = sqlx::query_as::<_, Campground>(
            "INSERT INTO campgrounds (id, title, location, description, image, price) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, title, location, description, image, price, reviews",
        )
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.location)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.price)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(campground_id = %campground.id, "campground created");
        Ok(campground)
    }

    async fn update_campground(
        &self,
        id: Uuid,
        input: CampgroundInput,
    ) -> Result<Option<Campground>, StoreError> {
        let row = sqlx::query_as::<_, Campground>(
            "UPDATE campgrounds \
             SET title = $2, location = $3, description = $4, image = $5, price = $6 \
             WHERE id = $1 \
             RETURNING id, title, location, description, image, price, reviews",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.location)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.price)
        .fetch_optional(&self.pool)
        .await?;
        if row.is_some() {
            tracing::info!(campground_id = %id, "campground updated");
        }
        Ok(row)
    }

    async fn delete_campground(&self, id: Uuid) -> Result<Option<Campground>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let removed = sqlx::query_as::<_, Campground>(
            "DELETE FROM campgrounds WHERE id = $1 \
             RETURNING id, title, location, description, image, price, reviews",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(removed) = removed else {
            tx.rollback().await?;
            return Ok(None);
        };
        sqlx::query("DELETE FROM reviews WHERE id = ANY($1)")
            .bind(&removed.reviews)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
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
        let mut tx = self.pool.begin().await?;
        let review = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (id, rating, body) VALUES ($1, $2, $3) \
             RETURNING id, rating, body",
        )
        .bind(Uuid::new_v4())
        .bind(input.rating)
        .bind(&input.body)
        .fetch_one(&mut *tx)
        .await?;
        let attached = sqlx::query(
            "UPDATE campgrounds SET reviews = array_append(reviews, $2) WHERE id = $1",
        )
        .bind(campground_id)
        .bind(review.id)
        .execute(&mut *tx)
        .await?;
        if attached.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }
        tx.commit().await?;
        tracing::info!(campground_id = %campground_id, review_id = %review.id, "review created");
        Ok(Some(review))
    }

    async fn delete_review(
        &self,
        campground_id: Uuid,
        review_id: Uuid,
    ) -> Result<Option<Review>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let detached = sqlx::query(
            "UPDATE campgrounds SET reviews = array_remove(reviews, $2) \
             WHERE id = $1 AND $2 = ANY(reviews)",
        )
        .bind(campground_id)
        .bind(review_id)
        .execute(&mut *tx)
        .await?;
        if detached.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }
        let removed = sqlx::query_as::<_, Review>(
            "DELETE FROM reviews WHERE id = $1 RETURNING id, rating, body",
        )
        .bind(review_id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        tracing::info!(campground_id = %campground_id, review_id = %review_id, "review deleted");
        Ok(removed)
    }

    async fn find_review(&self, id: Uuid) -> Result<Option<Review>, StoreError> {
        let row = sqlx::query_as::<_, Review>("SELECT id, rating, body FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| StoreError::InvalidUrl("missing scheme".into()))?
        + 3;
    let path_start = match url[scheme_end..].find('/') {
        Some(i) => scheme_end + i + 1,
        None => return Ok((url.to_string(), String::new())),
    };
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let query = path_and_query
        .find('?')
        .map(|i| &path_and_query[i..])
        .unwrap_or("");
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
